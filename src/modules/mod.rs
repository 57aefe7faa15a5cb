pub mod cart;
pub mod health;
