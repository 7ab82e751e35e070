// Credit service behavior over the in-memory store

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use credit_application::core::AppError;
use credit_application::credits::CreditStatus;
use helpers::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

async fn setup() -> (Arc<InMemoryStore>, Services, i64, i64) {
    let store = Arc::new(InMemoryStore::new());
    let services = services(store.clone());

    let owner = services
        .customers
        .save(new_customer(CPF, EMAIL))
        .await
        .unwrap();
    let other = services
        .customers
        .save(new_customer(OTHER_CPF, OTHER_EMAIL))
        .await
        .unwrap();

    (store, services, owner.id, other.id)
}

#[tokio::test]
async fn test_save_valid_credit() {
    let (store, services, owner, _) = setup().await;

    let details = services
        .credits
        .save(new_credit(owner, days_from_today(10)))
        .await
        .unwrap();

    assert_eq!(store.credit_count(), 1);
    assert_eq!(details.credit.customer_id, owner);
    assert_eq!(details.customer.id, owner);
    assert_eq!(details.customer.email, EMAIL);
    assert_eq!(details.credit.status, CreditStatus::InProgress);
    assert_eq!(details.credit.credit_value, dec!(1500.0));
}

#[tokio::test]
async fn test_save_accepts_exactly_one_month_ahead() {
    let (_store, services, owner, _) = setup().await;

    let result = services
        .credits
        .save(new_credit(owner, months_from_today(1)))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_save_rejects_date_beyond_one_month() {
    let (store, services, owner, _) = setup().await;

    let err = services
        .credits
        .save(new_credit(owner, months_from_today(2)))
        .await
        .unwrap_err();

    match err {
        AppError::Business(msg) => assert_eq!(msg, "Invalid Date"),
        other => panic!("expected Business error, got {:?}", other),
    }
    assert_eq!(store.credit_count(), 0);
}

#[tokio::test]
async fn test_date_rule_is_checked_before_customer_lookup() {
    let (_store, services, _, _) = setup().await;

    let err = services
        .credits
        .save(new_credit(999, months_from_today(3)))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Business(_)));
}

#[tokio::test]
async fn test_save_for_unknown_customer() {
    let (store, services, _, _) = setup().await;

    let err = services
        .credits
        .save(new_credit(999, days_from_today(5)))
        .await
        .unwrap_err();

    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Id 999 not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert_eq!(store.credit_count(), 0);
}

#[tokio::test]
async fn test_find_all_by_customer_returns_only_owned_credits() {
    let (_store, services, owner, other) = setup().await;

    let a = services
        .credits
        .save(new_credit_with_value(owner, days_from_today(5), dec!(100)))
        .await
        .unwrap();
    let b = services
        .credits
        .save(new_credit_with_value(owner, days_from_today(6), dec!(200)))
        .await
        .unwrap();
    services
        .credits
        .save(new_credit(other, days_from_today(7)))
        .await
        .unwrap();

    let credits = services.credits.find_all_by_customer(owner).await.unwrap();
    let mut codes: Vec<Uuid> = credits.iter().map(|c| c.credit_code).collect();
    codes.sort();
    let mut expected = vec![a.credit.credit_code, b.credit.credit_code];
    expected.sort();

    assert_eq!(codes, expected);
    assert!(credits.iter().all(|c| c.customer_id == owner));
}

#[tokio::test]
async fn test_find_all_by_customer_without_credits_is_empty() {
    let (_store, services, owner, _) = setup().await;

    assert!(services
        .credits
        .find_all_by_customer(owner)
        .await
        .unwrap()
        .is_empty());
    assert!(services
        .credits
        .find_all_by_customer(12345)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_find_by_credit_code() {
    let (_store, services, owner, other) = setup().await;
    let saved = services
        .credits
        .save(new_credit(owner, days_from_today(10)))
        .await
        .unwrap();
    let code = saved.credit.credit_code;

    let found = services
        .credits
        .find_by_credit_code(owner, code)
        .await
        .unwrap();
    assert_eq!(found, saved);

    match services.credits.find_by_credit_code(other, code).await {
        Err(AppError::ConsistencyViolation(msg)) => assert_eq!(msg, "Contact admin"),
        other => panic!("expected ConsistencyViolation, got {:?}", other),
    }

    let unknown = Uuid::new_v4();
    match services.credits.find_by_credit_code(owner, unknown).await {
        Err(AppError::Business(msg)) => {
            assert_eq!(msg, format!("Creditcode {} not found", unknown))
        }
        other => panic!("expected Business error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_deleting_customer_cascades_to_credits() {
    let (store, services, owner, other) = setup().await;
    services
        .credits
        .save(new_credit(owner, days_from_today(3)))
        .await
        .unwrap();
    services
        .credits
        .save(new_credit(other, days_from_today(3)))
        .await
        .unwrap();

    services.customers.delete(owner).await.unwrap();

    assert_eq!(store.credit_count(), 1);
    assert!(services
        .credits
        .find_all_by_customer(owner)
        .await
        .unwrap()
        .is_empty());
}
