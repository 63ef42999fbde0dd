use crate::ServiceError;
use async_trait::async_trait;
use mockall::automock;

#[automock]
#[async_trait]
pub trait SchedulerService {
    /// Registers all jobs with their configured cadence.
    /// After calling this, scheduled jobs run automatically in the background.
    async fn start(&self) -> Result<(), ServiceError>;

    /// Schedules the daily automatic deposit cycle.
    /// The `cron` parameter is a cron expression with seconds (e.g. `"0 0 8 * * *"` for 08:00),
    /// evaluated in the IANA zone `timezone`.
    async fn schedule_auto_deposit(&self, cron: &str, timezone: &str) -> Result<(), ServiceError>;
}
