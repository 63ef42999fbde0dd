use crate::gen_service_impl;
use async_trait::async_trait;
use chrono_tz::Tz;
use service::{
    auto_deposit::{AutoDepositService, CycleReport},
    clock::ClockService,
    config::ConfigService,
    scheduler::SchedulerService,
    ServiceError,
};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron::{Job, Scheduler};
use tracing::{error, info};

const AUTO_DEPOSIT_JOB: &str = "auto-deposit";

gen_service_impl! {
    struct SchedulerServiceImpl: service::scheduler::SchedulerService = SchedulerServiceDeps {
        AutoDepositService: service::auto_deposit::AutoDepositService = auto_deposit_service,
        ConfigService: service::config::ConfigService = config_service,
        ClockService: service::clock::ClockService = clock_service
    }
    ; custom_fields {
        scheduler: Arc<Mutex<Option<Scheduler<Tz>>>> = scheduler
    }
}

impl<Deps: SchedulerServiceDeps> SchedulerServiceImpl<Deps> {
    pub fn new(
        auto_deposit_service: Arc<Deps::AutoDepositService>,
        config_service: Arc<Deps::ConfigService>,
        clock_service: Arc<Deps::ClockService>,
    ) -> Self {
        Self {
            scheduler: Arc::new(Mutex::new(None)),
            auto_deposit_service,
            config_service,
            clock_service,
        }
    }
}

/// Parses the cron expression and makes sure it fires at least once more in
/// `tz`. The scheduler panics on anything else.
fn validate_cron(cron: &str, tz: Tz) -> Result<(), ServiceError> {
    let schedule = cron::Schedule::from_str(cron)
        .map_err(|err| ServiceError::InvalidCron(format!("{cron}: {err}").into()))?;
    if schedule.upcoming(tz).next().is_none() {
        return Err(ServiceError::InvalidCron(
            format!("{cron}: never fires again").into(),
        ));
    }
    Ok(())
}

/// Body of the scheduled job: one cycle for the current time.
pub async fn run_scheduled_cycle<A, C>(
    auto_deposit_service: &A,
    clock_service: &C,
) -> Result<CycleReport, ServiceError>
where
    A: AutoDepositService + ?Sized,
    C: ClockService + ?Sized,
{
    let now = clock_service.offset_date_time_now();
    match auto_deposit_service.run_cycle(now).await {
        Ok(report) => {
            if report.has_failures() {
                error!(
                    month = %report.month,
                    failed = report.failed,
                    failed_accounts = ?report.failed_accounts,
                    "Automatic deposit cycle finished with failures (cron job)"
                );
            } else {
                info!(
                    month = %report.month,
                    applied = report.applied,
                    "Successfully ran automatic deposit cycle (cron job)"
                );
            }
            Ok(report)
        }
        Err(e) => {
            error!("Automatic deposit cycle failed: {:?}", e);
            Err(e)
        }
    }
}

#[async_trait]
impl<Deps: SchedulerServiceDeps> SchedulerService for SchedulerServiceImpl<Deps> {
    async fn start(&self) -> Result<(), ServiceError> {
        let config = self.config_service.get_config().await?;
        self.schedule_auto_deposit(&config.auto_deposit_cron, &config.timezone)
            .await?;
        Ok(())
    }

    async fn schedule_auto_deposit(&self, cron: &str, timezone: &str) -> Result<(), ServiceError> {
        let tz = Tz::from_str(timezone).map_err(|_| ServiceError::InvalidTimezone(timezone.into()))?;
        validate_cron(cron, tz)?;

        let mut scheduler = self.scheduler.lock().await;
        let sched = scheduler.get_or_insert_with(|| Scheduler::new_in_timezone(tz));

        let auto_deposit_service = self.auto_deposit_service.clone();
        let clock_service = self.clock_service.clone();

        sched.add(Job::named(AUTO_DEPOSIT_JOB, cron, move || {
            let auto_deposit_service = auto_deposit_service.clone();
            let clock_service = clock_service.clone();
            async move {
                // Outcome is logged inside.
                let _ = run_scheduled_cycle(auto_deposit_service.as_ref(), clock_service.as_ref())
                    .await;
            }
        }));

        info!(
            "Scheduled automatic deposits with cron expression {} in {}",
            cron, timezone
        );
        Ok(())
    }
}
