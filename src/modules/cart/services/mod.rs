pub mod cart_service;

pub use cart_service::{resolve_add_quantity, CartService, UpsertStrategy};
