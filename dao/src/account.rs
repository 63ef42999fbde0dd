use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{DaoError, Transaction};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountEntity {
    pub id: Uuid,
    pub name: Arc<str>,
    pub auto_amount: Option<Decimal>,
    pub auto_day: Option<i64>,
    pub last_auto_occurrence: Option<Arc<str>>,
    pub created: time::PrimitiveDateTime,
    pub version: Uuid,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait AccountDao {
    type Transaction: Transaction;

    async fn all(&self, tx: Self::Transaction) -> Result<Arc<[AccountEntity]>, DaoError>;

    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<AccountEntity>, DaoError>;

    async fn create(
        &self,
        entity: &AccountEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;

    /// Writes name and automatic deposit settings.
    ///
    /// `last_auto_occurrence` is left untouched, it is only advanced by
    /// `claim_auto_occurrence`.
    async fn update(
        &self,
        entity: &AccountEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;

    /// Sets `last_auto_occurrence` to `month_key` unless it already holds
    /// that key.
    ///
    /// Returns `false` if no row was changed, which means the month was
    /// already claimed for this account (or the account does not exist).
    async fn claim_auto_occurrence(
        &self,
        id: Uuid,
        month_key: &str,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<bool, DaoError>;
}
