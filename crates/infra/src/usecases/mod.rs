//! Concrete usecases: domain rules on top of [`RecordStore`](crate::store::RecordStore).

pub mod auth;
pub mod posts;
pub mod products;
pub mod purchases;
pub mod users;

pub use auth::AuthService;
pub use posts::PostService;
pub use products::ProductService;
pub use purchases::PurchaseService;
pub use users::UserService;
