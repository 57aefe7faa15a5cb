pub mod cart_controller;

pub use cart_controller::configure;
