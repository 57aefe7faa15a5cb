use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use crate::core::{AppError, Result};

/// Width of the catalog key column (`CHAR(10)`)
pub const PRODUCT_ID_MAX_LEN: usize = 10;

/// Catalog key of a product, validated against the column width
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Parse a raw identifier; surrounding whitespace is ignored
    pub fn parse(raw: &str) -> Result<Self> {
        let id = raw.trim();

        if id.is_empty() {
            return Err(AppError::validation("productId cannot be empty"));
        }

        if id.chars().count() > PRODUCT_ID_MAX_LEN {
            return Err(AppError::validation(format!(
                "productId cannot exceed {} characters, got '{}'",
                PRODUCT_ID_MAX_LEN, id
            )));
        }

        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Catalog entry, read-only to the cart
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}
