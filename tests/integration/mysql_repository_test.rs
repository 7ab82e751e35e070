// MySQL repository tests
//
// Require a disposable database at TEST_DATABASE_URL:
//   cargo test --test mysql_repository_test -- --ignored --test-threads=1

#[path = "../helpers/mod.rs"]
mod helpers;

use credit_application::core::AppError;
use credit_application::credits::{CreditRepository, CreditStatus, MySqlCreditRepository};
use credit_application::customers::{CustomerRepository, MySqlCustomerRepository};
use helpers::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[tokio::test]
#[ignore] // Requires test database
async fn test_customer_crud() {
    let pool = create_test_pool().await;
    clean_database(&pool).await;
    let repo = MySqlCustomerRepository::new(pool.clone());

    let created = repo.create(&new_customer(CPF, EMAIL)).await.unwrap();
    assert!(created.id > 0);

    let mut found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found, created);

    found.first_name = "Updated".to_string();
    found.income = dec!(2500.50);
    repo.update(&found).await.unwrap();
    let reloaded = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(reloaded.first_name, "Updated");
    assert_eq!(reloaded.income, dec!(2500.50));

    repo.delete(created.id).await.unwrap();
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore] // Requires test database
async fn test_unique_keys_map_to_conflict() {
    let pool = create_test_pool().await;
    clean_database(&pool).await;
    let repo = MySqlCustomerRepository::new(pool.clone());

    repo.create(&new_customer(CPF, EMAIL)).await.unwrap();

    let same_cpf = repo.create(&new_customer(CPF, OTHER_EMAIL)).await;
    let same_email = repo.create(&new_customer(OTHER_CPF, EMAIL)).await;

    assert!(matches!(same_cpf, Err(AppError::Conflict(_))));
    assert!(matches!(same_email, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore] // Requires test database
async fn test_credit_lookup_and_cascade() {
    let pool = create_test_pool().await;
    clean_database(&pool).await;
    let customers = MySqlCustomerRepository::new(pool.clone());
    let credits = MySqlCreditRepository::new(pool.clone());

    let owner = customers.create(&new_customer(CPF, EMAIL)).await.unwrap();
    let credit = credits
        .create(&new_credit(owner.id, days_from_today(10)))
        .await
        .unwrap();

    let by_code = credits
        .find_by_credit_code(credit.credit_code)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_code, credit);
    assert_eq!(by_code.status, CreditStatus::InProgress);

    assert!(credits
        .find_by_credit_code(Uuid::new_v4())
        .await
        .unwrap()
        .is_none());
    assert_eq!(credits.find_all_by_customer(owner.id).await.unwrap().len(), 1);

    customers.delete(owner.id).await.unwrap();
    assert!(credits
        .find_all_by_customer(owner.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
#[ignore] // Requires test database
async fn test_credit_for_missing_customer_conflicts() {
    let pool = create_test_pool().await;
    clean_database(&pool).await;
    let credits = MySqlCreditRepository::new(pool.clone());

    let result = credits.create(&new_credit(987654, days_from_today(10))).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}
