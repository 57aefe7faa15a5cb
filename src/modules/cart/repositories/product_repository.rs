use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::cart::models::{Product, ProductId};

/// Read-only view of the product catalog
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Whether a product with this id exists
    async fn exists(&self, product_id: &ProductId) -> Result<bool>;

    /// Fetch a product by id
    async fn find_by_id(&self, product_id: &ProductId) -> Result<Option<Product>>;
}

/// Catalog backed by the `products` table
#[derive(Clone)]
pub struct MySqlProductCatalog {
    pool: MySqlPool,
}

impl MySqlProductCatalog {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCatalog for MySqlProductCatalog {
    async fn exists(&self, product_id: &ProductId) -> Result<bool> {
        let found: Option<String> = sqlx::query_scalar("SELECT id FROM products WHERE id = ?")
            .bind(product_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(found.is_some())
    }

    async fn find_by_id(&self, product_id: &ProductId) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price
            FROM products
            WHERE id = ?
            "#,
        )
        .bind(product_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }
}
