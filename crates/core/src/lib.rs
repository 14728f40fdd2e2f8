//! `storefront-core` — shared building blocks for every resource.
//!
//! This crate holds the error model, the path identifier, and the usecase
//! contract the HTTP layer is written against. No IO lives here.

pub mod error;
pub mod id;
pub mod usecase;

pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use usecase::CrudUsecase;
