//! Products resource: catalog entries and the shape clients send for them.
//!
//! Pure data and rules only; storage lives in `storefront-infra`.

pub mod product;

pub use product::{Product, ProductInput, ProductUsecase};
