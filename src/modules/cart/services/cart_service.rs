use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::core::{AppError, Result};
use crate::modules::cart::models::{
    CartLineDetail, LineConfirmation, ProductId, QuantityUpdate, DEFAULT_ADD_QUANTITY,
};
use crate::modules::cart::repositories::{CartStore, ProductCatalog};

pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";
pub const LINE_NOT_FOUND: &str = "Producto no encontrado en el carrito";

/// How `upsert_line` merges into an existing line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpsertStrategy {
    /// Look up the line, then increment or insert. Two concurrent adds for
    /// the same product can race between the read and the write and lose an
    /// increment, or both try to insert.
    #[default]
    ReadThenWrite,
    /// Single insert-or-increment statement; no read-write window.
    Atomic,
}

impl FromStr for UpsertStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "read-then-write" => Ok(UpsertStrategy::ReadThenWrite),
            "atomic" => Ok(UpsertStrategy::Atomic),
            other => Err(AppError::Configuration(format!(
                "Invalid CART_UPSERT_STRATEGY '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for UpsertStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertStrategy::ReadThenWrite => f.write_str("read-then-write"),
            UpsertStrategy::Atomic => f.write_str("atomic"),
        }
    }
}

/// Quantity an add applies: absent or 0 means one unit, negatives are rejected
pub fn resolve_add_quantity(quantity: Option<i32>) -> Result<i32> {
    match quantity {
        None | Some(0) => Ok(DEFAULT_ADD_QUANTITY),
        Some(q) if q < 0 => Err(AppError::validation(format!(
            "quantity must be a positive integer, got: {}",
            q
        ))),
        Some(q) => Ok(q),
    }
}

/// Cart state transitions over a product catalog and a cart store
pub struct CartService {
    catalog: Arc<dyn ProductCatalog>,
    store: Arc<dyn CartStore>,
    strategy: UpsertStrategy,
}

impl CartService {
    pub fn new(catalog: Arc<dyn ProductCatalog>, store: Arc<dyn CartStore>) -> Self {
        Self::with_strategy(catalog, store, UpsertStrategy::default())
    }

    pub fn with_strategy(
        catalog: Arc<dyn ProductCatalog>,
        store: Arc<dyn CartStore>,
        strategy: UpsertStrategy,
    ) -> Self {
        Self {
            catalog,
            store,
            strategy,
        }
    }

    pub fn strategy(&self) -> UpsertStrategy {
        self.strategy
    }

    /// Add a product to the cart, merging into its existing line
    #[instrument(skip(self), fields(strategy = %self.strategy))]
    pub async fn upsert_line(
        &self,
        product_id: &str,
        quantity: Option<i32>,
    ) -> Result<LineConfirmation> {
        let product_id = ProductId::parse(product_id)?;
        let quantity = resolve_add_quantity(quantity)?;

        if !self.catalog.exists(&product_id).await? {
            warn!(product_id = %product_id, "Product not in catalog");
            return Err(AppError::not_found(PRODUCT_NOT_FOUND));
        }

        match self.strategy {
            UpsertStrategy::ReadThenWrite => {
                if self.store.find_line(&product_id).await?.is_some() {
                    let affected = self.store.increment_quantity(&product_id, quantity).await?;
                    if affected == 0 {
                        // Line vanished between the lookup and the update.
                        warn!(product_id = %product_id, "Cart line removed before increment");
                    }
                    info!(product_id = %product_id, delta = quantity, "Cart line incremented");
                } else {
                    self.store.insert_line(&product_id, quantity).await?;
                    info!(product_id = %product_id, quantity, "Cart line created");
                }
            }
            UpsertStrategy::Atomic => {
                self.store.upsert_line(&product_id, quantity).await?;
                info!(product_id = %product_id, quantity, "Cart line upserted");
            }
        }

        Ok(LineConfirmation { product_id })
    }

    /// Every line with its product details and line total
    #[instrument(skip(self))]
    pub async fn list_lines(&self) -> Result<Vec<CartLineDetail>> {
        let lines = self.store.list_joined().await?;
        info!(lines = lines.len(), "Cart listed");
        Ok(lines)
    }

    /// Overwrite a line's quantity. The value is written as given, including
    /// zero and negatives; such a line is kept, not deleted.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        product_id: &str,
        quantity: Option<i32>,
    ) -> Result<QuantityUpdate> {
        let product_id = ProductId::parse(product_id)?;

        let affected = self.store.set_quantity(&product_id, quantity).await?;
        if affected == 0 {
            warn!(product_id = %product_id, "No cart line to update");
            return Err(AppError::not_found(LINE_NOT_FOUND));
        }

        info!(product_id = %product_id, ?quantity, "Cart line quantity set");
        Ok(QuantityUpdate {
            product_id,
            quantity,
        })
    }

    #[instrument(skip(self))]
    pub async fn remove_line(&self, product_id: &str) -> Result<LineConfirmation> {
        let product_id = ProductId::parse(product_id)?;

        let affected = self.store.delete_line(&product_id).await?;
        if affected == 0 {
            warn!(product_id = %product_id, "No cart line to remove");
            return Err(AppError::not_found(LINE_NOT_FOUND));
        }

        info!(product_id = %product_id, "Cart line removed");
        Ok(LineConfirmation { product_id })
    }

    /// Remove every line. An already empty cart is not an error.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<u64> {
        let removed = self.store.delete_all().await?;
        info!(removed, "Cart cleared");
        Ok(removed)
    }
}
