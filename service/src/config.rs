use std::sync::Arc;

use crate::ServiceError;
use async_trait::async_trait;
use mockall::automock;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// IANA name of the zone the cycle date is resolved in.
    pub timezone: Arc<str>,
    pub auto_deposit_cron: Arc<str>,
    /// Number of accounts processed in parallel, at least 1.
    pub auto_deposit_concurrency: usize,
    pub auto_deposit_note: Arc<str>,
}

#[automock]
#[async_trait]
pub trait ConfigService {
    async fn get_config(&self) -> Result<Config, ServiceError>;
}
