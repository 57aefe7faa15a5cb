// Cart line persistence
//
// Every method is a single statement. Mutations report the number of rows the
// statement matched so callers can tell a missing line from a successful write.
// The MySQL driver negotiates CLIENT_FOUND_ROWS, so an UPDATE that writes the
// value already stored still reports the row as affected.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::cart::models::{CartLine, CartLineDetail, ProductId};

/// Storage of cart lines
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Current line for a product, if any
    async fn find_line(&self, product_id: &ProductId) -> Result<Option<CartLine>>;

    /// Create a line stamped with the current time
    async fn insert_line(&self, product_id: &ProductId, quantity: i32) -> Result<()>;

    /// Add `delta` to an existing line's quantity
    async fn increment_quantity(&self, product_id: &ProductId, delta: i32) -> Result<u64>;

    /// Insert the line or add to its quantity in one statement.
    /// `added_at` is only written on insert.
    async fn upsert_line(&self, product_id: &ProductId, quantity: i32) -> Result<()>;

    /// Overwrite a line's quantity. `None` writes NULL.
    async fn set_quantity(&self, product_id: &ProductId, quantity: Option<i32>) -> Result<u64>;

    async fn delete_line(&self, product_id: &ProductId) -> Result<u64>;

    async fn delete_all(&self) -> Result<u64>;

    /// Every line joined with its product, in store order
    async fn list_joined(&self) -> Result<Vec<CartLineDetail>>;
}

/// Cart store backed by the `cart_lines` table
#[derive(Clone)]
pub struct MySqlCartStore {
    pool: MySqlPool,
}

impl MySqlCartStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStore for MySqlCartStore {
    async fn find_line(&self, product_id: &ProductId) -> Result<Option<CartLine>> {
        let line = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT product_id, quantity, added_at
            FROM cart_lines
            WHERE product_id = ?
            "#,
        )
        .bind(product_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(line)
    }

    async fn insert_line(&self, product_id: &ProductId, quantity: i32) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cart_lines (product_id, quantity, added_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(product_id.as_str())
        .bind(quantity)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn increment_quantity(&self, product_id: &ProductId, delta: i32) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE cart_lines
            SET quantity = quantity + ?
            WHERE product_id = ?
            "#,
        )
        .bind(delta)
        .bind(product_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn upsert_line(&self, product_id: &ProductId, quantity: i32) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cart_lines (product_id, quantity, added_at)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE quantity = quantity + VALUES(quantity)
            "#,
        )
        .bind(product_id.as_str())
        .bind(quantity)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_quantity(&self, product_id: &ProductId, quantity: Option<i32>) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE cart_lines
            SET quantity = ?
            WHERE product_id = ?
            "#,
        )
        .bind(quantity)
        .bind(product_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_line(&self, product_id: &ProductId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cart_lines WHERE product_id = ?")
            .bind(product_id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cart_lines")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_joined(&self) -> Result<Vec<CartLineDetail>> {
        let lines = sqlx::query_as::<_, CartLineDetail>(
            r#"
            SELECT
                p.id AS product_id,
                p.name AS name,
                p.price AS unit_price,
                c.quantity AS quantity,
                (p.price * c.quantity) AS line_total,
                c.added_at AS added_at
            FROM cart_lines c
            INNER JOIN products p ON c.product_id = p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }
}
