use std::sync::Arc;

use async_trait::async_trait;
use dao::deposit::DepositEntity;
use mockall::automock;
use rust_decimal::Decimal;
use uuid::Uuid;
use versement_utils::derive_from_reference;

use crate::ServiceError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deposit {
    pub id: Uuid,
    pub account_id: Uuid,
    pub amount: Decimal,
    pub occurrence_date: time::Date,
    pub note: Arc<str>,
    pub is_automatic: bool,
    pub created: time::PrimitiveDateTime,
}

impl From<&DepositEntity> for Deposit {
    fn from(entity: &DepositEntity) -> Self {
        Self {
            id: entity.id,
            account_id: entity.account_id,
            amount: entity.amount,
            occurrence_date: entity.occurrence_date,
            note: entity.note.clone(),
            is_automatic: entity.is_automatic,
            created: entity.created,
        }
    }
}
derive_from_reference!(DepositEntity, Deposit);

impl From<&Deposit> for DepositEntity {
    fn from(deposit: &Deposit) -> Self {
        Self {
            id: deposit.id,
            account_id: deposit.account_id,
            amount: deposit.amount,
            occurrence_date: deposit.occurrence_date,
            note: deposit.note.clone(),
            is_automatic: deposit.is_automatic,
            created: deposit.created,
        }
    }
}
derive_from_reference!(Deposit, DepositEntity);

#[automock(type Transaction = dao::MockTransaction;)]
#[async_trait]
pub trait DepositService {
    type Transaction: dao::Transaction;

    /// All deposits of the account ordered by occurrence date.
    async fn list_for_account(
        &self,
        account_id: Uuid,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[Deposit]>, ServiceError>;

    /// Records a deposit entered by hand. It is never treated as an
    /// automatic deposit.
    async fn add_manual(
        &self,
        account_id: Uuid,
        amount: Decimal,
        occurrence_date: time::Date,
        note: Arc<str>,
        tx: Option<Self::Transaction>,
    ) -> Result<Deposit, ServiceError>;
}
