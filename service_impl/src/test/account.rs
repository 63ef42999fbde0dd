use super::error_test::*;
use crate::account::{AccountServiceDeps, AccountServiceImpl};
use dao::account::{AccountEntity, MockAccountDao};
use dao::{MockTransaction, MockTransactionDao};
use mockall::predicate::{always, eq};
use rust_decimal_macros::dec;
use service::account::{Account, AccountService};
use service::clock::MockClockService;
use service::uuid_service::MockUuidService;
use service::ValidationFailureItem;
use time::macros::datetime;
use uuid::{uuid, Uuid};

pub struct AccountServiceDependencies {
    pub account_dao: MockAccountDao,
    pub clock_service: MockClockService,
    pub uuid_service: MockUuidService,
    pub transaction_dao: MockTransactionDao,
}

impl AccountServiceDeps for AccountServiceDependencies {
    type Transaction = MockTransaction;
    type AccountDao = MockAccountDao;
    type ClockService = MockClockService;
    type UuidService = MockUuidService;
    type TransactionDao = MockTransactionDao;
}

impl AccountServiceDependencies {
    pub fn build_service(self) -> AccountServiceImpl<AccountServiceDependencies> {
        AccountServiceImpl {
            account_dao: self.account_dao.into(),
            clock_service: self.clock_service.into(),
            uuid_service: self.uuid_service.into(),
            transaction_dao: self.transaction_dao.into(),
        }
    }
}

pub fn build_dependencies() -> AccountServiceDependencies {
    let mut clock_service = MockClockService::new();
    clock_service
        .expect_date_time_now()
        .returning(generate_default_datetime);
    let mut transaction_dao = MockTransactionDao::new();
    transaction_dao
        .expect_use_transaction()
        .returning(|_| Ok(MockTransaction));
    transaction_dao.expect_commit().returning(|_| Ok(()));

    AccountServiceDependencies {
        account_dao: MockAccountDao::new(),
        clock_service,
        uuid_service: MockUuidService::new(),
        transaction_dao,
    }
}

pub fn default_id() -> Uuid {
    uuid!("3F2B8C1A-6D4E-4B7A-8E9F-0A1B2C3D4E50")
}
pub fn alternate_id() -> Uuid {
    uuid!("3F2B8C1A-6D4E-4B7A-8E9F-0A1B2C3D4E51")
}
pub fn default_version() -> Uuid {
    uuid!("A4C3E2F1-0B9D-4C8E-9A7B-6F5E4D3C2B10")
}
pub fn alternate_version() -> Uuid {
    uuid!("A4C3E2F1-0B9D-4C8E-9A7B-6F5E4D3C2B11")
}

pub fn default_account_entity() -> AccountEntity {
    AccountEntity {
        id: default_id(),
        name: "Camille".into(),
        auto_amount: Some(dec!(50)),
        auto_day: Some(5),
        last_auto_occurrence: Some("2024-05".into()),
        created: datetime!(2024-01-15 09:30:00),
        version: default_version(),
    }
}

pub fn default_account() -> Account {
    Account {
        id: default_id(),
        name: "Camille".into(),
        auto_amount: Some(dec!(50)),
        auto_day: Some(5),
        last_auto_occurrence: Some("2024-05".into()),
        created: Some(datetime!(2024-01-15 09:30:00)),
        version: default_version(),
    }
}

#[tokio::test]
async fn test_get_all() {
    let mut dependencies = build_dependencies();
    dependencies.account_dao.expect_all().returning(|_| {
        Ok([
            default_account_entity(),
            AccountEntity {
                id: alternate_id(),
                name: "Noah".into(),
                auto_amount: None,
                auto_day: None,
                last_auto_occurrence: None,
                ..default_account_entity()
            },
        ]
        .into())
    });
    let account_service = dependencies.build_service();
    let result = account_service.get_all(None).await.unwrap();
    assert_eq!(2, result.len());
    assert_eq!(result[0], default_account());
    assert_eq!(result[1].name.as_ref(), "Noah");
    assert_eq!(result[1].auto_amount, None);
}

#[tokio::test]
async fn test_get() {
    let mut dependencies = build_dependencies();
    dependencies
        .account_dao
        .expect_find_by_id()
        .with(eq(default_id()), always())
        .returning(|_, _| Ok(Some(default_account_entity())));
    let account_service = dependencies.build_service();
    let result = account_service.get(default_id(), None).await.unwrap();
    assert_eq!(result, default_account());
}

#[tokio::test]
async fn test_get_not_found() {
    let mut dependencies = build_dependencies();
    dependencies
        .account_dao
        .expect_find_by_id()
        .returning(|_, _| Ok(None));
    let account_service = dependencies.build_service();
    let result = account_service.get(default_id(), None).await;
    test_not_found(&result, &default_id());
}

#[tokio::test]
async fn test_get_database_error() {
    let mut dependencies = build_dependencies();
    dependencies
        .account_dao
        .expect_find_by_id()
        .returning(|_, _| Err(db_error()));
    let account_service = dependencies.build_service();
    let result = account_service.get(default_id(), None).await;
    test_database_error(&result);
}

#[tokio::test]
async fn test_create() {
    let mut dependencies = build_dependencies();
    dependencies
        .uuid_service
        .expect_new_uuid()
        .withf(|usage| usage == "account-id")
        .returning(|_| default_id());
    dependencies
        .uuid_service
        .expect_new_uuid()
        .withf(|usage| usage == "account-version")
        .returning(|_| default_version());
    dependencies
        .account_dao
        .expect_create()
        .with(
            eq(AccountEntity {
                last_auto_occurrence: None,
                created: generate_default_datetime(),
                ..default_account_entity()
            }),
            eq("account-service"),
            always(),
        )
        .times(1)
        .returning(|_, _, _| Ok(()));
    let account_service = dependencies.build_service();
    let result = account_service
        .create(
            &Account {
                id: Uuid::nil(),
                version: Uuid::nil(),
                created: None,
                ..default_account()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(
        result,
        Account {
            last_auto_occurrence: None,
            created: Some(generate_default_datetime()),
            ..default_account()
        }
    );
}

#[tokio::test]
async fn test_create_with_id() {
    let dependencies = build_dependencies();
    let account_service = dependencies.build_service();
    let result = account_service
        .create(
            &Account {
                version: Uuid::nil(),
                ..default_account()
            },
            None,
        )
        .await;
    test_zero_id_error(&result);
}

#[tokio::test]
async fn test_create_with_version() {
    let dependencies = build_dependencies();
    let account_service = dependencies.build_service();
    let result = account_service
        .create(
            &Account {
                id: Uuid::nil(),
                ..default_account()
            },
            None,
        )
        .await;
    test_zero_version_error(&result);
}

#[tokio::test]
async fn test_configure_auto_deposit() {
    let mut dependencies = build_dependencies();
    dependencies
        .account_dao
        .expect_find_by_id()
        .with(eq(default_id()), always())
        .returning(|_, _| Ok(Some(default_account_entity())));
    dependencies
        .uuid_service
        .expect_new_uuid()
        .withf(|usage| usage == "account-version")
        .returning(|_| alternate_version());
    dependencies
        .account_dao
        .expect_update()
        .with(
            eq(AccountEntity {
                auto_amount: Some(dec!(120.50)),
                auto_day: Some(28),
                version: alternate_version(),
                ..default_account_entity()
            }),
            eq("account-service"),
            always(),
        )
        .times(1)
        .returning(|_, _, _| Ok(()));
    dependencies.account_dao.expect_claim_auto_occurrence().never();
    let account_service = dependencies.build_service();
    let result = account_service
        .configure_auto_deposit(default_id(), Some(dec!(120.50)), Some(28), None)
        .await
        .unwrap();
    assert_eq!(result.auto_amount, Some(dec!(120.50)));
    assert_eq!(result.auto_day, Some(28));
    assert_eq!(result.last_auto_occurrence.as_deref(), Some("2024-05"));
    assert_eq!(result.version, alternate_version());
}

#[tokio::test]
async fn test_configure_auto_deposit_disable() {
    let mut dependencies = build_dependencies();
    dependencies
        .account_dao
        .expect_find_by_id()
        .returning(|_, _| Ok(Some(default_account_entity())));
    dependencies
        .uuid_service
        .expect_new_uuid()
        .returning(|_| alternate_version());
    dependencies
        .account_dao
        .expect_update()
        .withf(|entity, _, _| entity.auto_amount.is_none() && entity.auto_day.is_none())
        .times(1)
        .returning(|_, _, _| Ok(()));
    let account_service = dependencies.build_service();
    let result = account_service
        .configure_auto_deposit(default_id(), None, None, None)
        .await
        .unwrap();
    assert_eq!(result.auto_amount, None);
    assert_eq!(result.auto_day, None);
}

#[tokio::test]
async fn test_configure_auto_deposit_invalid_amount() {
    let mut dependencies = build_dependencies();
    dependencies.account_dao.expect_update().never();
    let account_service = dependencies.build_service();
    let result = account_service
        .configure_auto_deposit(default_id(), Some(dec!(0)), Some(5), None)
        .await;
    test_validation_error(
        &result,
        &ValidationFailureItem::InvalidValue("auto_amount".into()),
        1,
    );
}

#[tokio::test]
async fn test_configure_auto_deposit_invalid_values() {
    let mut dependencies = build_dependencies();
    dependencies.account_dao.expect_update().never();
    let account_service = dependencies.build_service();
    let result = account_service
        .configure_auto_deposit(default_id(), Some(dec!(-3)), Some(32), None)
        .await;
    test_validation_error(
        &result,
        &ValidationFailureItem::InvalidValue("auto_day".into()),
        2,
    );

    let result = account_service
        .configure_auto_deposit(default_id(), Some(dec!(10)), Some(0), None)
        .await;
    test_validation_error(
        &result,
        &ValidationFailureItem::InvalidValue("auto_day".into()),
        1,
    );
}

#[tokio::test]
async fn test_configure_auto_deposit_not_found() {
    let mut dependencies = build_dependencies();
    dependencies
        .account_dao
        .expect_find_by_id()
        .returning(|_, _| Ok(None));
    dependencies.account_dao.expect_update().never();
    let account_service = dependencies.build_service();
    let result = account_service
        .configure_auto_deposit(default_id(), Some(dec!(10)), Some(5), None)
        .await;
    test_not_found(&result, &default_id());
}
