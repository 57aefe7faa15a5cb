// Integration tests for the MySQL store and catalog

#[path = "../helpers/mod.rs"]
mod helpers;

use carrito::cart::models::ProductId;
use carrito::cart::{CartStore, MySqlCartStore, MySqlProductCatalog, ProductCatalog};
use carrito::core::{AppError, Result};
use helpers::{create_test_pool, remove_products, seed_product, TestDataFactory};
use rust_decimal_macros::dec;

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_catalog_lookup() -> Result<()> {
    let pool = create_test_pool().await;
    let catalog = MySqlProductCatalog::new(pool.clone());
    let raw_id = TestDataFactory::random_product_id();
    let product_id = ProductId::parse(&raw_id)?;

    assert!(!catalog.exists(&product_id).await?);

    seed_product(&pool, &raw_id, "Monitor", dec!(19.99)).await;
    assert!(catalog.exists(&product_id).await?);

    let product = catalog.find_by_id(&product_id).await?.expect("seeded product");
    assert_eq!(product.name, "Monitor");
    assert_eq!(product.price, dec!(19.99));

    remove_products(&pool, &[raw_id.as_str()]).await;
    Ok(())
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_store_rows_affected() -> Result<()> {
    let pool = create_test_pool().await;
    let store = MySqlCartStore::new(pool.clone());
    let raw_id = TestDataFactory::random_product_id();
    let product_id = ProductId::parse(&raw_id)?;
    seed_product(&pool, &raw_id, "Cable", dec!(2.50)).await;

    assert!(store.find_line(&product_id).await?.is_none());
    assert_eq!(store.increment_quantity(&product_id, 1).await?, 0);
    assert_eq!(store.set_quantity(&product_id, Some(1)).await?, 0);
    assert_eq!(store.delete_line(&product_id).await?, 0);

    store.insert_line(&product_id, 2).await?;
    assert_eq!(store.increment_quantity(&product_id, 3).await?, 1);
    assert_eq!(store.find_line(&product_id).await?.unwrap().quantity, 5);

    store.upsert_line(&product_id, 2).await?;
    assert_eq!(store.find_line(&product_id).await?.unwrap().quantity, 7);

    let err = store.set_quantity(&product_id, None).await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));

    let line = store
        .list_joined()
        .await?
        .into_iter()
        .find(|line| line.product_id == raw_id)
        .expect("joined line");
    assert_eq!(line.unit_price, dec!(2.50));
    assert_eq!(line.line_total, dec!(17.50));

    assert_eq!(store.delete_line(&product_id).await?, 1);

    remove_products(&pool, &[raw_id.as_str()]).await;
    Ok(())
}

#[tokio::test]
#[ignore = "Clears every cart line in the test database"]
async fn test_delete_all_is_idempotent() -> Result<()> {
    let pool = create_test_pool().await;
    let store = MySqlCartStore::new(pool.clone());
    let raw_id = TestDataFactory::random_product_id();
    let product_id = ProductId::parse(&raw_id)?;
    seed_product(&pool, &raw_id, "Lapiz", dec!(1.00)).await;

    store.insert_line(&product_id, 1).await?;
    assert!(store.delete_all().await? >= 1);
    assert_eq!(store.delete_all().await?, 0);
    assert!(store.list_joined().await?.is_empty());

    remove_products(&pool, &[raw_id.as_str()]).await;
    Ok(())
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_insert_requires_catalog_product() -> Result<()> {
    let pool = create_test_pool().await;
    let store = MySqlCartStore::new(pool.clone());
    let product_id = ProductId::parse(&TestDataFactory::random_product_id())?;

    let err = store.insert_line(&product_id, 1).await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
    Ok(())
}
