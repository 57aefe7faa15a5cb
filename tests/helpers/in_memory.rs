// In-memory catalog and cart store
//
// Mirror the MySQL implementations closely enough for service and HTTP tests:
// one map per table, rows-affected counts on mutations, joins on listing.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use carrito::cart::models::{CartLine, CartLineDetail, Product, ProductId};
use carrito::cart::{CartStore, ProductCatalog};
use carrito::core::{AppError, Result};

#[derive(Default)]
pub struct InMemoryCatalog {
    products: Mutex<BTreeMap<String, Product>>,
}

impl InMemoryCatalog {
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = Self::default();
        for product in products {
            catalog.add(product);
        }
        catalog
    }

    pub fn add(&self, product: Product) {
        self.products
            .lock()
            .unwrap()
            .insert(product.id.clone(), product);
    }

    fn get(&self, product_id: &str) -> Option<Product> {
        self.products.lock().unwrap().get(product_id).cloned()
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn exists(&self, product_id: &ProductId) -> Result<bool> {
        Ok(self.get(product_id.as_str()).is_some())
    }

    async fn find_by_id(&self, product_id: &ProductId) -> Result<Option<Product>> {
        Ok(self.get(product_id.as_str()))
    }
}

/// Cart rows keyed by product id. `quantity` is nullable here only so that a
/// NULL write can fail the way the NOT NULL column does.
pub struct InMemoryCartStore {
    catalog: Arc<InMemoryCatalog>,
    lines: Mutex<BTreeMap<String, CartLine>>,
    fail_next: Mutex<bool>,
}

impl InMemoryCartStore {
    pub fn new(catalog: Arc<InMemoryCatalog>) -> Self {
        Self {
            catalog,
            lines: Mutex::new(BTreeMap::new()),
            fail_next: Mutex::new(false),
        }
    }

    /// Make the next store call fail with a database error
    pub fn fail_next_call(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    pub fn line(&self, product_id: &str) -> Option<CartLine> {
        self.lines.lock().unwrap().get(product_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().unwrap().len()
    }

    fn check_failure(&self) -> Result<()> {
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn out_of_range() -> AppError {
        AppError::Database(sqlx::Error::Protocol(
            "Out of range value for column 'quantity'".to_string(),
        ))
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn find_line(&self, product_id: &ProductId) -> Result<Option<CartLine>> {
        self.check_failure()?;
        Ok(self.line(product_id.as_str()))
    }

    async fn insert_line(&self, product_id: &ProductId, quantity: i32) -> Result<()> {
        self.check_failure()?;
        let mut lines = self.lines.lock().unwrap();
        if lines.contains_key(product_id.as_str()) {
            return Err(AppError::Database(sqlx::Error::Protocol(format!(
                "Duplicate entry '{}' for key 'PRIMARY'",
                product_id
            ))));
        }
        lines.insert(
            product_id.as_str().to_string(),
            CartLine {
                product_id: product_id.as_str().to_string(),
                quantity,
                added_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn increment_quantity(&self, product_id: &ProductId, delta: i32) -> Result<u64> {
        self.check_failure()?;
        let mut lines = self.lines.lock().unwrap();
        match lines.get_mut(product_id.as_str()) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(delta)
                    .ok_or_else(Self::out_of_range)?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn upsert_line(&self, product_id: &ProductId, quantity: i32) -> Result<()> {
        self.check_failure()?;
        let mut lines = self.lines.lock().unwrap();
        match lines.get_mut(product_id.as_str()) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(Self::out_of_range)?;
            }
            None => {
                lines.insert(
                    product_id.as_str().to_string(),
                    CartLine {
                        product_id: product_id.as_str().to_string(),
                        quantity,
                        added_at: Utc::now(),
                    },
                );
            }
        }
        Ok(())
    }

    async fn set_quantity(&self, product_id: &ProductId, quantity: Option<i32>) -> Result<u64> {
        self.check_failure()?;
        let mut lines = self.lines.lock().unwrap();
        let Some(line) = lines.get_mut(product_id.as_str()) else {
            return Ok(0);
        };
        let Some(quantity) = quantity else {
            return Err(AppError::Database(sqlx::Error::Protocol(
                "Column 'quantity' cannot be null".to_string(),
            )));
        };
        line.quantity = quantity;
        Ok(1)
    }

    async fn delete_line(&self, product_id: &ProductId) -> Result<u64> {
        self.check_failure()?;
        let removed = self.lines.lock().unwrap().remove(product_id.as_str());
        Ok(u64::from(removed.is_some()))
    }

    async fn delete_all(&self) -> Result<u64> {
        self.check_failure()?;
        let mut lines = self.lines.lock().unwrap();
        let removed = lines.len() as u64;
        lines.clear();
        Ok(removed)
    }

    async fn list_joined(&self) -> Result<Vec<CartLineDetail>> {
        self.check_failure()?;
        let lines = self.lines.lock().unwrap();
        Ok(lines
            .values()
            .filter_map(|line| {
                let product = self.catalog.get(&line.product_id)?;
                Some(CartLineDetail::new(
                    product.id,
                    product.name,
                    product.price,
                    line.quantity,
                    line.added_at,
                ))
            })
            .collect())
    }
}
