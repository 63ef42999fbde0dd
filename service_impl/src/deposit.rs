use std::sync::Arc;

use async_trait::async_trait;
use dao::{account::AccountDao, deposit::DepositDao, TransactionDao};
use rust_decimal::Decimal;
use service::{
    clock::ClockService,
    deposit::{Deposit, DepositService},
    uuid_service::UuidService,
    ServiceError, ValidationFailureItem,
};
use uuid::Uuid;

use crate::gen_service_impl;

gen_service_impl! {
    struct DepositServiceImpl: DepositService = DepositServiceDeps {
        DepositDao: DepositDao<Transaction = Self::Transaction> = deposit_dao,
        AccountDao: AccountDao<Transaction = Self::Transaction> = account_dao,
        ClockService: ClockService = clock_service,
        UuidService: UuidService = uuid_service,
        TransactionDao: TransactionDao<Transaction = Self::Transaction> = transaction_dao,
    }
}

const DEPOSIT_SERVICE_PROCESS: &str = "deposit-service";

#[async_trait]
impl<Deps: DepositServiceDeps> DepositService for DepositServiceImpl<Deps> {
    type Transaction = Deps::Transaction;

    async fn list_for_account(
        &self,
        account_id: Uuid,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[Deposit]>, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let deposits = self
            .deposit_dao
            .find_by_account_id(account_id, tx.clone())
            .await?
            .iter()
            .map(Deposit::from)
            .collect::<Arc<[Deposit]>>();
        self.transaction_dao.commit(tx).await?;
        Ok(deposits)
    }

    async fn add_manual(
        &self,
        account_id: Uuid,
        amount: Decimal,
        occurrence_date: time::Date,
        note: Arc<str>,
        tx: Option<Self::Transaction>,
    ) -> Result<Deposit, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        if amount <= Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                [ValidationFailureItem::InvalidValue("amount".into())].into(),
            ));
        }
        if self
            .account_dao
            .find_by_id(account_id, tx.clone())
            .await?
            .is_none()
        {
            return Err(ServiceError::EntityNotFound(account_id));
        }

        let deposit = Deposit {
            id: self.uuid_service.new_uuid("deposit-id"),
            account_id,
            amount,
            occurrence_date,
            note,
            is_automatic: false,
            created: self.clock_service.date_time_now(),
        };
        self.deposit_dao
            .create(&(&deposit).into(), DEPOSIT_SERVICE_PROCESS, tx.clone())
            .await?;

        self.transaction_dao.commit(tx).await?;
        Ok(deposit)
    }
}
