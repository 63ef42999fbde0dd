use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::*;

use time::{Date, Month};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersementDateUtilsError {
    #[error("Invalid date: {0}")]
    DateError(#[from] time::error::ComponentRange),

    #[error("Invalid month key: {0}")]
    InvalidMonthKey(String),
}

/// Canonical `YYYY-MM` key of a calendar month.
///
/// Automatic deposits are de-duplicated per month key, so two keys are only
/// equal if they name the same year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthKey {
    year: i32,
    month: Month,
}

impl MonthKey {
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Date of the given day inside this month.
    ///
    /// Fails if the month is too short for `day`, there is no rollover into
    /// the next month.
    pub fn date_of_day(&self, day: u8) -> Result<Date, VersementDateUtilsError> {
        Ok(Date::from_calendar_date(self.year, self.month, day)?)
    }

    /// `YYYY-MM-DD` string of the given day, built from the key and the
    /// zero padded day.
    pub fn format_day(&self, day: u8) -> String {
        format!("{}-{:02}", self, day)
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month as u8)
    }
}

impl FromStr for MonthKey {
    type Err = VersementDateUtilsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || VersementDateUtilsError::InvalidMonthKey(value.to_string());
        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        Ok(Self {
            year,
            month: Month::try_from(month)?,
        })
    }
}

impl From<Date> for MonthKey {
    fn from(date: Date) -> Self {
        MonthKey::from_date(date)
    }
}

/// The calendar day a cycle runs for, already resolved in the reference
/// time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleDate {
    date: Date,
}

impl CycleDate {
    pub fn new(date: Date) -> Self {
        Self { date }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    pub fn day_of_month(&self) -> u8 {
        self.date.day()
    }
}

impl From<Date> for CycleDate {
    fn from(date: Date) -> Self {
        CycleDate::new(date)
    }
}

impl Display for CycleDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.month_key().format_day(self.date.day()))
    }
}
