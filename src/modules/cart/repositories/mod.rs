pub mod cart_repository;
pub mod product_repository;

pub use cart_repository::{CartStore, MySqlCartStore};
pub use product_repository::{MySqlProductCatalog, ProductCatalog};
