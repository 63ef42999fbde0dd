use std::sync::Arc;

use async_trait::async_trait;
use dao::{
    account::{AccountDao, AccountEntity},
    TransactionDao,
};
use rust_decimal::Decimal;
use service::{
    account::{Account, AccountService},
    clock::ClockService,
    uuid_service::UuidService,
    ServiceError, ValidationFailureItem,
};
use tracing::info;
use uuid::Uuid;

use crate::gen_service_impl;

gen_service_impl! {
    struct AccountServiceImpl: AccountService = AccountServiceDeps {
        AccountDao: AccountDao<Transaction = Self::Transaction> = account_dao,
        ClockService: ClockService = clock_service,
        UuidService: UuidService = uuid_service,
        TransactionDao: TransactionDao<Transaction = Self::Transaction> = transaction_dao,
    }
}

const ACCOUNT_SERVICE_PROCESS: &str = "account-service";

fn validate_auto_deposit(
    auto_amount: Option<Decimal>,
    auto_day: Option<u8>,
) -> Result<(), ServiceError> {
    let mut validation = Vec::new();
    if matches!(auto_amount, Some(amount) if amount <= Decimal::ZERO) {
        validation.push(ValidationFailureItem::InvalidValue("auto_amount".into()));
    }
    if matches!(auto_day, Some(day) if !(1..=31).contains(&day)) {
        validation.push(ValidationFailureItem::InvalidValue("auto_day".into()));
    }
    if !validation.is_empty() {
        return Err(ServiceError::ValidationError(validation.into()));
    }
    Ok(())
}

#[async_trait]
impl<Deps: AccountServiceDeps> AccountService for AccountServiceImpl<Deps> {
    type Transaction = Deps::Transaction;

    async fn get_all(&self, tx: Option<Self::Transaction>) -> Result<Arc<[Account]>, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let accounts = self
            .account_dao
            .all(tx.clone())
            .await?
            .iter()
            .map(Account::from)
            .collect::<Arc<[Account]>>();
        self.transaction_dao.commit(tx).await?;
        Ok(accounts)
    }

    async fn get(&self, id: Uuid, tx: Option<Self::Transaction>) -> Result<Account, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let account = self
            .account_dao
            .find_by_id(id, tx.clone())
            .await?
            .as_ref()
            .map(Account::from)
            .ok_or(ServiceError::EntityNotFound(id))?;
        self.transaction_dao.commit(tx).await?;
        Ok(account)
    }

    async fn create(
        &self,
        account: &Account,
        tx: Option<Self::Transaction>,
    ) -> Result<Account, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        if account.id != Uuid::nil() {
            return Err(ServiceError::IdSetOnCreate);
        }
        if account.version != Uuid::nil() {
            return Err(ServiceError::VersionSetOnCreate);
        }

        let account = Account {
            id: self.uuid_service.new_uuid("account-id"),
            version: self.uuid_service.new_uuid("account-version"),
            created: Some(self.clock_service.date_time_now()),
            last_auto_occurrence: None,
            ..account.clone()
        };
        self.account_dao
            .create(
                &AccountEntity::try_from(&account)?,
                ACCOUNT_SERVICE_PROCESS,
                tx.clone(),
            )
            .await?;

        self.transaction_dao.commit(tx).await?;
        Ok(account)
    }

    async fn configure_auto_deposit(
        &self,
        id: Uuid,
        auto_amount: Option<Decimal>,
        auto_day: Option<u8>,
        tx: Option<Self::Transaction>,
    ) -> Result<Account, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        validate_auto_deposit(auto_amount, auto_day)?;

        let entity = self
            .account_dao
            .find_by_id(id, tx.clone())
            .await?
            .ok_or(ServiceError::EntityNotFound(id))?;
        let entity = AccountEntity {
            auto_amount,
            auto_day: auto_day.map(i64::from),
            version: self.uuid_service.new_uuid("account-version"),
            ..entity
        };
        self.account_dao
            .update(&entity, ACCOUNT_SERVICE_PROCESS, tx.clone())
            .await?;
        info!(
            account_id = %id,
            auto_amount = ?auto_amount,
            auto_day = ?auto_day,
            "Automatic deposit configured"
        );

        self.transaction_dao.commit(tx).await?;
        Ok(Account::from(&entity))
    }
}
