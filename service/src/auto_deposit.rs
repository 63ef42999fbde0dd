use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;
use versement_utils::MonthKey;

use crate::ServiceError;

/// Result of one batch cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleReport {
    pub month: MonthKey,
    pub day_of_month: u8,
    /// Accounts seen in the snapshot.
    pub processed: u32,
    /// Accounts that received their automatic deposit in this cycle.
    pub applied: u32,
    /// Accounts that were not due, or already claimed by an overlapping cycle.
    pub skipped: u32,
    pub failed: u32,
    pub failed_accounts: Arc<[Uuid]>,
}

impl CycleReport {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[automock]
#[async_trait]
pub trait AutoDepositService {
    /// Runs one cycle for the calendar day `now` falls on in the configured
    /// time zone.
    ///
    /// Per account failures are counted in the report. Only a failure to load
    /// the accounts, or an invalid configuration, fails the whole cycle.
    async fn run_cycle(&self, now: time::OffsetDateTime) -> Result<CycleReport, ServiceError>;
}
