//! Posts resource: short messages authored by users.

pub mod post;

pub use post::{Post, PostInput, PostUsecase};
