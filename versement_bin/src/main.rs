
use std::process::ExitCode;
use std::sync::Arc;

use dao_impl_sqlite::{
    account::AccountDaoImpl, deposit::DepositDaoImpl, TransactionDaoImpl, TransactionImpl,
};
use service::account::AccountService as _;
use service::scheduler::SchedulerService as _;
use service_impl::scheduler::{run_scheduled_cycle, SchedulerServiceImpl};
use sqlx::SqlitePool;
#[cfg(feature = "json_logging")]
use tracing_subscriber::fmt::format::FmtSpan;

const DEFAULT_DATABASE_URL: &str = "sqlite:./versement.sqlite3?mode=rwc";

type Transaction = TransactionImpl;
type TransactionDao = TransactionDaoImpl;
type AccountDao = AccountDaoImpl;
type DepositDao = DepositDaoImpl;

type ClockService = service_impl::clock::ClockServiceImpl;
type UuidService = service_impl::uuid_service::UuidServiceImpl;
type ConfigService = service_impl::config::ConfigServiceImpl;

pub struct AccountServiceDependencies;
impl service_impl::account::AccountServiceDeps for AccountServiceDependencies {
    type Transaction = Transaction;
    type AccountDao = AccountDao;
    type ClockService = ClockService;
    type UuidService = UuidService;
    type TransactionDao = TransactionDao;
}
type AccountService = service_impl::account::AccountServiceImpl<AccountServiceDependencies>;

pub struct AutoDepositServiceDependencies;
impl service_impl::auto_deposit::AutoDepositServiceDeps for AutoDepositServiceDependencies {
    type Transaction = Transaction;
    type AccountDao = AccountDao;
    type DepositDao = DepositDao;
    type ConfigService = ConfigService;
    type ClockService = ClockService;
    type UuidService = UuidService;
    type TransactionDao = TransactionDao;
}
type AutoDepositService =
    service_impl::auto_deposit::AutoDepositServiceImpl<AutoDepositServiceDependencies>;

pub struct SchedulerServiceDependencies;
impl service_impl::scheduler::SchedulerServiceDeps for SchedulerServiceDependencies {
    type Transaction = Transaction;
    type AutoDepositService = AutoDepositService;
    type ConfigService = ConfigService;
    type ClockService = ClockService;
}
type SchedulerService = SchedulerServiceImpl<SchedulerServiceDependencies>;

pub struct ServiceState {
    pub account_service: Arc<AccountService>,
    pub auto_deposit_service: Arc<AutoDepositService>,
    pub scheduler_service: Arc<SchedulerService>,
    pub clock_service: Arc<ClockService>,
}

impl ServiceState {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        let transaction_dao = Arc::new(TransactionDao::new(pool.clone()));
        let account_dao = Arc::new(AccountDao::new(pool.clone()));
        let deposit_dao = Arc::new(DepositDao::new(pool.clone()));

        let clock_service = Arc::new(service_impl::clock::ClockServiceImpl);
        let uuid_service = Arc::new(service_impl::uuid_service::UuidServiceImpl);
        let config_service = Arc::new(service_impl::config::ConfigServiceImpl);

        let account_service = Arc::new(service_impl::account::AccountServiceImpl {
            account_dao: account_dao.clone(),
            clock_service: clock_service.clone(),
            uuid_service: uuid_service.clone(),
            transaction_dao: transaction_dao.clone(),
        });
        let auto_deposit_service = Arc::new(service_impl::auto_deposit::AutoDepositServiceImpl {
            account_dao,
            deposit_dao,
            config_service: config_service.clone(),
            clock_service: clock_service.clone(),
            uuid_service,
            transaction_dao,
        });
        let scheduler_service = Arc::new(SchedulerServiceImpl::new(
            auto_deposit_service.clone(),
            config_service,
            clock_service.clone(),
        ));

        Self {
            account_service,
            auto_deposit_service,
            scheduler_service,
            clock_service,
        }
    }
}

/// Runs a single cycle for the current time.
async fn run_once(state: &ServiceState) -> ExitCode {
    match run_scheduled_cycle(
        state.auto_deposit_service.as_ref(),
        state.clock_service.as_ref(),
    )
    .await
    {
        Ok(report) if !report.has_failures() => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let version = env!("CARGO_PKG_VERSION");

    #[cfg(feature = "local_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::TRACE)
        .pretty()
        .with_file(true)
        .finish();

    #[cfg(feature = "json_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_span_list(true)
        .with_file(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    tracing::info!("Versement batch version: {}", version);
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or(DEFAULT_DATABASE_URL.to_string());
    let pool = Arc::new(
        SqlitePool::connect(&database_url)
            .await
            .expect("Could not connect to database"),
    );

    sqlx::migrate!("../migrations/sqlite")
        .run(pool.as_ref())
        .await
        .expect("Failed to run migrations");

    let state = ServiceState::new(pool);
    match state.account_service.get_all(None).await {
        Ok(accounts) => tracing::info!(
            accounts = accounts.len(),
            automatic = accounts
                .iter()
                .filter(|account| account.auto_amount.is_some() && account.auto_day.is_some())
                .count(),
            "Loaded accounts"
        ),
        Err(err) => {
            tracing::error!("Could not load accounts: {}", err);
            return ExitCode::FAILURE;
        }
    }

    if std::env::args().nth(1).as_deref() == Some("run-once") {
        return run_once(&state).await;
    }

    if let Err(err) = state.scheduler_service.start().await {
        tracing::error!("Could not start the scheduler: {}", err);
        return ExitCode::FAILURE;
    }
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
    tracing::info!("Shutting down");
    ExitCode::SUCCESS
}
