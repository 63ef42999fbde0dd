//! Decides whether an account is due for its automatic deposit.
//!
//! Everything in here is pure: the current month and day are passed in, so
//! evaluating an account any number of times with the same inputs always
//! gives the same answer.

use rust_decimal::Decimal;
use versement_utils::MonthKey;

use crate::account::Account;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotEligibleReason {
    /// Amount missing, zero or negative.
    AmountNotConfigured,
    /// Day missing, zero or negative.
    DayNotConfigured,
    /// The deposit for the month was already applied.
    AlreadyApplied,
    /// The configured day is still ahead, or the month has fewer days.
    DayNotReached,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DueDeposit {
    pub amount: Decimal,
    pub month_key: MonthKey,
    pub occurrence_date: time::Date,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Eligibility {
    Eligible(DueDeposit),
    NotEligible(NotEligibleReason),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible(_))
    }
}

/// Evaluates the rules in order, the first one that rejects the account wins:
/// amount configured, day configured, month not yet applied, day reached.
///
/// The month guard compares the stored marker with the month key as plain
/// strings. An `auto_day` beyond the end of the month is never reached in
/// that month.
pub fn evaluate(account: &Account, month_key: MonthKey, day_of_month: u8) -> Eligibility {
    let amount = match account.auto_amount {
        Some(amount) if amount > Decimal::ZERO => amount,
        _ => return Eligibility::NotEligible(NotEligibleReason::AmountNotConfigured),
    };
    let auto_day = match account.auto_day {
        Some(day) if day > 0 => day,
        _ => return Eligibility::NotEligible(NotEligibleReason::DayNotConfigured),
    };
    let current_key = month_key.to_string();
    if account.last_auto_occurrence.as_deref() == Some(current_key.as_str()) {
        return Eligibility::NotEligible(NotEligibleReason::AlreadyApplied);
    }
    if i64::from(day_of_month) < auto_day {
        return Eligibility::NotEligible(NotEligibleReason::DayNotReached);
    }
    let occurrence_date = u8::try_from(auto_day)
        .ok()
        .and_then(|day| month_key.date_of_day(day).ok());
    match occurrence_date {
        Some(occurrence_date) => Eligibility::Eligible(DueDeposit {
            amount,
            month_key,
            occurrence_date,
        }),
        None => Eligibility::NotEligible(NotEligibleReason::DayNotReached),
    }
}
