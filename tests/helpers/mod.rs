// Test helper modules
//
// Included from each test target with `#[path = "../helpers/mod.rs"] mod helpers;`.
// Not every target uses every helper.
#![allow(dead_code)]

pub mod in_memory;

pub use assertions::*;
pub use in_memory::*;
pub use test_data::*;
pub use test_database::*;
