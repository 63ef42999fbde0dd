use std::str::FromStr;
use std::sync::Arc;

use crate::{ResultDbErrorExt, TransactionImpl};
use async_trait::async_trait;
use dao::{
    account::{AccountDao, AccountEntity},
    DaoError,
};
use rust_decimal::Decimal;
use sqlx::{query, query_as};
use time::{format_description::well_known::Iso8601, PrimitiveDateTime};
use tracing::debug;
use uuid::Uuid;

pub struct AccountDaoImpl {
    pub _pool: Arc<sqlx::SqlitePool>,
}
impl AccountDaoImpl {
    pub fn new(pool: Arc<sqlx::SqlitePool>) -> Self {
        Self { _pool: pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountDb {
    id: Vec<u8>,
    name: String,
    auto_amount: Option<String>,
    auto_day: Option<i64>,
    last_auto_occurrence: Option<String>,
    created: String,
    update_version: Vec<u8>,
}
impl TryFrom<&AccountDb> for AccountEntity {
    type Error = DaoError;
    fn try_from(account: &AccountDb) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::from_slice(account.id.as_ref())?,
            name: account.name.as_str().into(),
            auto_amount: account
                .auto_amount
                .as_deref()
                .map(Decimal::from_str)
                .transpose()?,
            auto_day: account.auto_day,
            last_auto_occurrence: account.last_auto_occurrence.as_deref().map(Arc::from),
            created: PrimitiveDateTime::parse(&account.created, &Iso8601::DATE_TIME)?,
            version: Uuid::from_slice(&account.update_version)?,
        })
    }
}

const SELECT_ACCOUNT: &str = "SELECT id, name, auto_amount, auto_day, last_auto_occurrence, created, update_version FROM account";

#[async_trait]
impl AccountDao for AccountDaoImpl {
    type Transaction = TransactionImpl;

    async fn all(&self, tx: Self::Transaction) -> Result<Arc<[AccountEntity]>, DaoError> {
        query_as::<_, AccountDb>(SELECT_ACCOUNT)
            .fetch_all(tx.tx.lock().await.as_mut())
            .await
            .map_db_error()?
            .iter()
            .map(AccountEntity::try_from)
            .collect::<Result<Arc<[AccountEntity]>, DaoError>>()
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Option<AccountEntity>, DaoError> {
        let id_vec = id.as_bytes().to_vec();
        let sql = format!("{SELECT_ACCOUNT} WHERE id = ?");
        query_as::<_, AccountDb>(&sql)
            .bind(id_vec)
            .fetch_optional(tx.tx.lock().await.as_mut())
            .await
            .map_db_error()?
            .as_ref()
            .map(AccountEntity::try_from)
            .transpose()
    }

    async fn create(
        &self,
        entity: &AccountEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError> {
        let id = entity.id.as_bytes().to_vec();
        let version = entity.version.as_bytes().to_vec();
        let name = entity.name.as_ref();
        let auto_amount = entity.auto_amount.map(|amount| amount.to_string());
        let last_auto_occurrence = entity.last_auto_occurrence.as_deref();
        let created = entity.created.format(&Iso8601::DATE_TIME)?;
        query("INSERT INTO account (id, name, auto_amount, auto_day, last_auto_occurrence, created, update_version, update_process) VALUES (?, ?, ?, ?, ?, ?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(auto_amount)
            .bind(entity.auto_day)
            .bind(last_auto_occurrence)
            .bind(created)
            .bind(version)
            .bind(process)
            .execute(tx.tx.lock().await.as_mut())
            .await
            .map_db_error()?;
        Ok(())
    }

    async fn update(
        &self,
        entity: &AccountEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError> {
        let id = entity.id.as_bytes().to_vec();
        let version = entity.version.as_bytes().to_vec();
        let name = entity.name.as_ref();
        let auto_amount = entity.auto_amount.map(|amount| amount.to_string());
        query("UPDATE account SET name = ?, auto_amount = ?, auto_day = ?, update_version = ?, update_process = ?, update_timestamp = CURRENT_TIMESTAMP WHERE id = ?")
            .bind(name)
            .bind(auto_amount)
            .bind(entity.auto_day)
            .bind(version)
            .bind(process)
            .bind(id)
            .execute(tx.tx.lock().await.as_mut())
            .await
            .map_db_error()?;
        Ok(())
    }

    async fn claim_auto_occurrence(
        &self,
        id: Uuid,
        month_key: &str,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<bool, DaoError> {
        let id_vec = id.as_bytes().to_vec();
        let rows = query("UPDATE account SET last_auto_occurrence = ?, update_process = ?, update_timestamp = CURRENT_TIMESTAMP WHERE id = ? AND last_auto_occurrence IS NOT ?")
            .bind(month_key)
            .bind(process)
            .bind(id_vec)
            .bind(month_key)
            .execute(tx.tx.lock().await.as_mut())
            .await
            .map_db_error()?
            .rows_affected();
        if rows == 0 {
            debug!(account_id = %id, month = month_key, "Month already claimed");
        }
        Ok(rows > 0)
    }
}
