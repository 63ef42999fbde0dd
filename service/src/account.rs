use std::sync::Arc;

use async_trait::async_trait;
use dao::account::AccountEntity;
use mockall::automock;
use rust_decimal::Decimal;
use uuid::Uuid;
use versement_utils::derive_from_reference;

use crate::ServiceError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub name: Arc<str>,
    pub auto_amount: Option<Decimal>,
    pub auto_day: Option<i64>,
    /// Month key of the last applied automatic deposit.
    pub last_auto_occurrence: Option<Arc<str>>,
    pub created: Option<time::PrimitiveDateTime>,
    pub version: Uuid,
}

impl From<&AccountEntity> for Account {
    fn from(entity: &AccountEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            auto_amount: entity.auto_amount,
            auto_day: entity.auto_day,
            last_auto_occurrence: entity.last_auto_occurrence.clone(),
            created: Some(entity.created),
            version: entity.version,
        }
    }
}
derive_from_reference!(AccountEntity, Account);

impl TryFrom<&Account> for AccountEntity {
    type Error = ServiceError;
    fn try_from(account: &Account) -> Result<Self, Self::Error> {
        Ok(Self {
            id: account.id,
            name: account.name.clone(),
            auto_amount: account.auto_amount,
            auto_day: account.auto_day,
            last_auto_occurrence: account.last_auto_occurrence.clone(),
            created: account
                .created
                .ok_or_else(|| ServiceError::InternalError("Account without created timestamp".into()))?,
            version: account.version,
        })
    }
}

#[automock(type Transaction = dao::MockTransaction;)]
#[async_trait]
pub trait AccountService {
    type Transaction: dao::Transaction;

    async fn get_all(
        &self,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[Account]>, ServiceError>;

    async fn get(&self, id: Uuid, tx: Option<Self::Transaction>)
        -> Result<Account, ServiceError>;

    async fn create(
        &self,
        account: &Account,
        tx: Option<Self::Transaction>,
    ) -> Result<Account, ServiceError>;

    /// Sets or clears the automatic deposit of an account.
    ///
    /// The amount must be positive and the day between 1 and 31. Passing
    /// `None` for either disables automatic deposits.
    async fn configure_auto_deposit(
        &self,
        id: Uuid,
        auto_amount: Option<Decimal>,
        auto_day: Option<u8>,
        tx: Option<Self::Transaction>,
    ) -> Result<Account, ServiceError>;
}
