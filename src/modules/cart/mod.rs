// Cart module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CartLine, CartLineDetail, Product, ProductId};
pub use repositories::{CartStore, MySqlCartStore, MySqlProductCatalog, ProductCatalog};
pub use services::{CartService, UpsertStrategy};
