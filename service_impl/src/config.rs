use std::{env, sync::Arc};

use async_trait::async_trait;
use service::{
    config::{Config, ConfigService},
    ServiceError,
};
use tracing::warn;

pub const DEFAULT_TIMEZONE: &str = "Europe/Paris";
pub const DEFAULT_AUTO_DEPOSIT_CRON: &str = "0 0 8 * * *";
pub const DEFAULT_AUTO_DEPOSIT_CONCURRENCY: usize = 8;
pub const DEFAULT_AUTO_DEPOSIT_NOTE: &str = "Versement automatique";

pub struct ConfigServiceImpl;

fn parse_concurrency(value: Option<String>) -> usize {
    match value.map(|value| value.trim().parse::<usize>()) {
        None => DEFAULT_AUTO_DEPOSIT_CONCURRENCY,
        Some(Ok(concurrency)) => concurrency.max(1),
        Some(Err(err)) => {
            warn!(
                "Invalid AUTO_DEPOSIT_CONCURRENCY ({}), using {}",
                err, DEFAULT_AUTO_DEPOSIT_CONCURRENCY
            );
            DEFAULT_AUTO_DEPOSIT_CONCURRENCY
        }
    }
}

#[async_trait]
impl ConfigService for ConfigServiceImpl {
    async fn get_config(&self) -> Result<Config, ServiceError> {
        let timezone = env::var("TIMEZONE").unwrap_or(DEFAULT_TIMEZONE.to_string());
        let auto_deposit_cron =
            env::var("AUTO_DEPOSIT_CRON").unwrap_or(DEFAULT_AUTO_DEPOSIT_CRON.to_string());
        let auto_deposit_concurrency = parse_concurrency(env::var("AUTO_DEPOSIT_CONCURRENCY").ok());
        let auto_deposit_note =
            env::var("AUTO_DEPOSIT_NOTE").unwrap_or(DEFAULT_AUTO_DEPOSIT_NOTE.to_string());

        Ok(Config {
            timezone: Arc::from(timezone),
            auto_deposit_cron: Arc::from(auto_deposit_cron),
            auto_deposit_concurrency,
            auto_deposit_note: Arc::from(auto_deposit_note),
        })
    }
}
