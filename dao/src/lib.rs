use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

pub mod account;
pub mod deposit;

#[derive(Error, Debug)]
pub enum DaoError {
    #[error("Database query error: {0}")]
    DatabaseQueryError(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("Uuid error: {0}")]
    UuidError(#[from] uuid::Error),

    #[error("Date time parse error: {0}")]
    DateTimeParseError(#[from] time::error::Parse),

    #[error("Date time format error: {0}")]
    DateTimeFormatError(#[from] time::error::Format),

    #[error("Amount parse error: {0}")]
    AmountParseError(#[from] rust_decimal::Error),
}

pub trait Transaction {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockTransaction;
impl Transaction for MockTransaction {}

#[automock(type Transaction = MockTransaction;)]
#[async_trait]
pub trait TransactionDao {
    type Transaction: Transaction;

    async fn new_transaction(&self) -> Result<Self::Transaction, DaoError>;

    /// Returns the given transaction or opens a new one.
    async fn use_transaction(
        &self,
        tx: Option<Self::Transaction>,
    ) -> Result<Self::Transaction, DaoError>;

    /// Commits the transaction once the last clone of it is passed in.
    async fn commit(&self, transaction: Self::Transaction) -> Result<(), DaoError>;

    /// Discards every change of the transaction.
    async fn rollback(&self, transaction: Self::Transaction) -> Result<(), DaoError>;
}
