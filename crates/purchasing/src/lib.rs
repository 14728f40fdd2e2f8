//! Purchasing resource: a user buying a quantity of one product.

pub mod purchase;

pub use purchase::{Purchase, PurchaseInput, PurchaseUsecase};
