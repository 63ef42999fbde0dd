use std::collections::HashMap;
use std::sync::Arc;

use crate::gen_service_impl;
use async_trait::async_trait;
use dao::{account::AccountDao, deposit::DepositDao, TransactionDao};
use service::{
    account::Account,
    auto_deposit::{AutoDepositService, CycleReport},
    clock::ClockService,
    config::ConfigService,
    deposit::Deposit,
    eligibility::{evaluate, DueDeposit, Eligibility},
    uuid_service::UuidService,
    ServiceError,
};
use time_tz::{timezones, OffsetDateTimeExt};
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use versement_utils::{CycleDate, MonthKey};

const AUTO_DEPOSIT_SERVICE_PROCESS: &str = "auto-deposit-service";

gen_service_impl! {
    struct AutoDepositServiceImpl: AutoDepositService = AutoDepositServiceDeps {
        AccountDao: AccountDao<Transaction = Self::Transaction> = account_dao,
        DepositDao: DepositDao<Transaction = Self::Transaction> = deposit_dao,
        ConfigService: ConfigService = config_service,
        ClockService: ClockService = clock_service,
        UuidService: UuidService = uuid_service,
        TransactionDao: TransactionDao<Transaction = Self::Transaction> = transaction_dao,
    }
}

/// Resolves the calendar day of `now` in the named time zone.
pub fn resolve_cycle_date(
    now: time::OffsetDateTime,
    timezone: &str,
) -> Result<CycleDate, ServiceError> {
    let tz = timezones::get_by_name(timezone)
        .ok_or_else(|| ServiceError::InvalidTimezone(timezone.into()))?;
    Ok(CycleDate::new(now.to_timezone(tz).date()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AccountOutcome {
    Applied,
    Skipped,
    Failed,
}

/// Everything a single account needs, detached from the service so it can
/// run on its own task.
struct AccountTask<Deps: AutoDepositServiceDeps> {
    account_dao: Arc<Deps::AccountDao>,
    deposit_dao: Arc<Deps::DepositDao>,
    clock_service: Arc<Deps::ClockService>,
    uuid_service: Arc<Deps::UuidService>,
    transaction_dao: Arc<Deps::TransactionDao>,
    note: Arc<str>,
}

impl<Deps: AutoDepositServiceDeps> AccountTask<Deps> {
    async fn process(&self, account: &Account, month_key: MonthKey, day_of_month: u8) -> AccountOutcome {
        if let Some(marker) = account.last_auto_occurrence.as_deref() {
            // Compared verbatim below, an unreadable marker never matches.
            if let Err(err) = marker.parse::<MonthKey>() {
                warn!(account_id = %account.id, marker, error = %err, "Unreadable automatic deposit marker");
            }
        }

        let due = match evaluate(account, month_key, day_of_month) {
            Eligibility::Eligible(due) => due,
            Eligibility::NotEligible(reason) => {
                debug!(account_id = %account.id, ?reason, "No automatic deposit due");
                return AccountOutcome::Skipped;
            }
        };

        match self.apply(account.id, &due).await {
            Ok(Some(deposit)) => {
                info!(
                    account_id = %account.id,
                    amount = %deposit.amount,
                    date = %deposit.occurrence_date,
                    "Automatic deposit applied"
                );
                AccountOutcome::Applied
            }
            Ok(None) => {
                warn!(
                    account_id = %account.id,
                    month = %due.month_key,
                    "Automatic deposit already applied by another cycle"
                );
                AccountOutcome::Skipped
            }
            Err(err) => {
                error!(account_id = %account.id, error = %err, "Automatic deposit failed");
                AccountOutcome::Failed
            }
        }
    }

    /// Appends the deposit and then claims the month, both in one
    /// transaction. Nothing is committed unless the claim succeeds, so a
    /// failed account keeps its marker and is retried on the next cycle.
    ///
    /// Returns `None` if the month was already claimed.
    async fn apply(&self, account_id: Uuid, due: &DueDeposit) -> Result<Option<Deposit>, ServiceError> {
        let tx = self.transaction_dao.new_transaction().await?;
        let deposit = Deposit {
            id: self.uuid_service.new_uuid("auto-deposit-id"),
            account_id,
            amount: due.amount,
            occurrence_date: due.occurrence_date,
            note: self.note.clone(),
            is_automatic: true,
            created: self.clock_service.date_time_now(),
        };
        self.deposit_dao
            .create(&(&deposit).into(), AUTO_DEPOSIT_SERVICE_PROCESS, tx.clone())
            .await?;

        let claimed = self
            .account_dao
            .claim_auto_occurrence(
                account_id,
                &due.month_key.to_string(),
                AUTO_DEPOSIT_SERVICE_PROCESS,
                tx.clone(),
            )
            .await?;
        if !claimed {
            self.transaction_dao.rollback(tx).await?;
            return Ok(None);
        }

        self.transaction_dao.commit(tx).await?;
        Ok(Some(deposit))
    }
}

#[async_trait]
impl<Deps: AutoDepositServiceDeps + 'static> AutoDepositService for AutoDepositServiceImpl<Deps> {
    async fn run_cycle(&self, now: time::OffsetDateTime) -> Result<CycleReport, ServiceError> {
        let config = self.config_service.get_config().await?;
        let cycle_date = resolve_cycle_date(now, &config.timezone)?;
        let month_key = cycle_date.month_key();
        let day_of_month = cycle_date.day_of_month();
        info!(
            day = day_of_month,
            month = %month_key,
            "Starting automatic deposit cycle"
        );

        // Snapshot of the population, writes of this cycle are not seen.
        let tx = self.transaction_dao.new_transaction().await?;
        let accounts = self.account_dao.all(tx.clone()).await?;
        self.transaction_dao.commit(tx).await?;

        let semaphore = Arc::new(Semaphore::new(config.auto_deposit_concurrency.max(1)));
        let mut join_set = JoinSet::new();
        let mut task_accounts = HashMap::new();
        for account in accounts.iter().map(Account::from) {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|err| ServiceError::InternalError(err.to_string().into()))?;
            let task = AccountTask::<Deps> {
                account_dao: self.account_dao.clone(),
                deposit_dao: self.deposit_dao.clone(),
                clock_service: self.clock_service.clone(),
                uuid_service: self.uuid_service.clone(),
                transaction_dao: self.transaction_dao.clone(),
                note: config.auto_deposit_note.clone(),
            };
            let account_id = account.id;
            let handle = join_set.spawn(async move {
                let outcome = task.process(&account, month_key, day_of_month).await;
                drop(permit);
                (account.id, outcome)
            });
            task_accounts.insert(handle.id(), account_id);
        }

        let mut processed = 0;
        let mut applied = 0;
        let mut skipped = 0;
        let mut failed = 0;
        let mut failed_accounts = Vec::new();
        while let Some(result) = join_set.join_next().await {
            processed += 1;
            match result {
                Ok((_, AccountOutcome::Applied)) => applied += 1,
                Ok((_, AccountOutcome::Skipped)) => skipped += 1,
                Ok((account_id, AccountOutcome::Failed)) => {
                    failed += 1;
                    failed_accounts.push(account_id);
                }
                Err(err) => {
                    failed += 1;
                    match task_accounts.get(&err.id()) {
                        Some(account_id) => {
                            error!(account_id = %account_id, error = %err, "Automatic deposit task aborted");
                            failed_accounts.push(*account_id);
                        }
                        None => error!(error = %err, "Automatic deposit task aborted"),
                    }
                }
            }
        }
        failed_accounts.sort();

        let report = CycleReport {
            month: month_key,
            day_of_month,
            processed,
            applied,
            skipped,
            failed,
            failed_accounts: failed_accounts.into(),
        };
        info!(
            month = %report.month,
            processed = report.processed,
            applied = report.applied,
            skipped = report.skipped,
            failed = report.failed,
            "Finished automatic deposit cycle"
        );
        Ok(report)
    }
}
