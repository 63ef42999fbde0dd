use std::str::FromStr;
use std::sync::Arc;

use crate::{ResultDbErrorExt, TransactionImpl};
use async_trait::async_trait;
use dao::{
    deposit::{DepositDao, DepositEntity},
    DaoError,
};
use rust_decimal::Decimal;
use sqlx::{query, query_as};
use time::macros::format_description;
use time::{format_description::well_known::Iso8601, Date, PrimitiveDateTime};
use uuid::Uuid;

pub struct DepositDaoImpl {
    pub _pool: Arc<sqlx::SqlitePool>,
}
impl DepositDaoImpl {
    pub fn new(pool: Arc<sqlx::SqlitePool>) -> Self {
        Self { _pool: pool }
    }
}

#[derive(sqlx::FromRow)]
struct DepositDb {
    id: Vec<u8>,
    account_id: Vec<u8>,
    amount: String,
    occurrence_date: String,
    note: String,
    is_automatic: bool,
    created: String,
}

impl TryFrom<&DepositDb> for DepositEntity {
    type Error = DaoError;
    fn try_from(deposit: &DepositDb) -> Result<Self, Self::Error> {
        let date_format = format_description!("[year]-[month]-[day]");
        Ok(Self {
            id: Uuid::from_slice(&deposit.id)?,
            account_id: Uuid::from_slice(&deposit.account_id)?,
            amount: Decimal::from_str(&deposit.amount)?,
            occurrence_date: Date::parse(&deposit.occurrence_date, &date_format)?,
            note: deposit.note.as_str().into(),
            is_automatic: deposit.is_automatic,
            created: PrimitiveDateTime::parse(&deposit.created, &Iso8601::DATE_TIME)?,
        })
    }
}

#[async_trait]
impl DepositDao for DepositDaoImpl {
    type Transaction = TransactionImpl;

    async fn find_by_account_id(
        &self,
        account_id: Uuid,
        tx: Self::Transaction,
    ) -> Result<Arc<[DepositEntity]>, DaoError> {
        let account_id_vec = account_id.as_bytes().to_vec();
        query_as::<_, DepositDb>(
            r"
            SELECT id, account_id, amount, occurrence_date, note, is_automatic, created
            FROM deposit
            WHERE account_id = ?
            ORDER BY occurrence_date, created
            ",
        )
        .bind(account_id_vec)
        .fetch_all(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?
        .iter()
        .map(DepositEntity::try_from)
        .collect::<Result<Arc<[DepositEntity]>, DaoError>>()
    }

    async fn create(
        &self,
        entity: &DepositEntity,
        process: &str,
        tx: Self::Transaction,
    ) -> Result<(), DaoError> {
        let date_format = format_description!("[year]-[month]-[day]");
        let id = entity.id.as_bytes().to_vec();
        let account_id = entity.account_id.as_bytes().to_vec();
        let amount = entity.amount.to_string();
        let occurrence_date = entity.occurrence_date.format(&date_format)?;
        let note = entity.note.as_ref();
        let created = entity.created.format(&Iso8601::DATE_TIME)?;
        query(
            r"
            INSERT INTO deposit (id, account_id, amount, occurrence_date, note, is_automatic, created, update_process)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(id)
        .bind(account_id)
        .bind(amount)
        .bind(occurrence_date)
        .bind(note)
        .bind(entity.is_automatic)
        .bind(created)
        .bind(process)
        .execute(tx.tx.lock().await.as_mut())
        .await
        .map_db_error()?;
        Ok(())
    }
}
