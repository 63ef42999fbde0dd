use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{DaoError, Transaction};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositEntity {
    pub id: Uuid,
    pub account_id: Uuid,
    pub amount: Decimal,
    pub occurrence_date: time::Date,
    pub note: Arc<str>,
    pub is_automatic: bool,
    pub created: time::PrimitiveDateTime,
}

#[automock(type Transaction = crate::MockTransaction;)]
#[async_trait]
pub trait DepositDao {
    type Transaction: Transaction;

    async fn find_by_account_id(
        &self,
        account_id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Arc<[DepositEntity]>, DaoError>;

    /// Appends a deposit to the history of its account. Deposits are never
    /// updated or deleted.
    async fn create(
        &self,
        entity: &DepositEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError>;
}
