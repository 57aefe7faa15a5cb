// Cart line models
//
// A cart line pairs one catalog product with a quantity. The cart itself is
// the full set of lines; there is no separate cart row.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

use super::ProductId;

/// Quantity applied by an add when the request omits it or sends 0
pub const DEFAULT_ADD_QUANTITY: i32 = 1;

/// A persisted cart row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: i32,
    /// Set on insert, never touched by merges
    pub added_at: DateTime<Utc>,
}

/// A cart row joined with its product, as returned by `GET /carrito`
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDetail {
    pub product_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
    #[serde(serialize_with = "serialize_added_at")]
    pub added_at: DateTime<Utc>,
}

impl CartLineDetail {
    /// Build a detail row, computing `line_total = unit_price × quantity`
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: i32,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
            line_total: line_total(unit_price, quantity),
            added_at,
        }
    }
}

pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum of every line total in a listing
pub fn cart_total(lines: &[CartLineDetail]) -> Decimal {
    lines.iter().map(|line| line.line_total).sum()
}

/// `YYYY-MM-DD HH:MM:SS`, the listing's timestamp format
pub const ADDED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn serialize_added_at<S>(added_at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&added_at.format(ADDED_AT_FORMAT))
}

/// Body of `POST /carrito`
#[derive(Debug, Clone, Deserialize)]
pub struct AddToCartRequest {
    #[serde(rename = "productId", alias = "productoId")]
    pub product_id: String,
    #[serde(default, alias = "cantidad")]
    pub quantity: Option<i32>,
}

/// Body of `PUT /carrito/{productId}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuantityRequest {
    #[serde(default, alias = "cantidad")]
    pub quantity: Option<i32>,
}

/// Outcome of a single-line mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineConfirmation {
    pub product_id: ProductId,
}

/// Outcome of `set_quantity`; the quantity is echoed exactly as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityUpdate {
    pub product_id: ProductId,
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMessageResponse {
    pub message: String,
    pub product_id: ProductId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityUpdatedResponse {
    pub message: String,
    pub product_id: ProductId,
    #[serde(rename = "nuevaCantidad")]
    pub new_quantity: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct CartClearedResponse {
    pub message: String,
}
