//! `storefront-auth` — user accounts, credentials, and access tokens.
//!
//! This crate is decoupled from HTTP and storage: it defines what a user is,
//! how passwords are hashed, and how tokens are minted and checked.

pub mod claims;
pub mod error;
pub mod password;
pub mod session;
pub mod user;

pub use claims::{AccessClaims, TokenIssuer};
pub use error::AuthError;
pub use password::PasswordHasher;
pub use session::{AuthSession, AuthUsecase, LoginInput, RegisterInput};
pub use user::{User, UserAccount, UserInput, UserUsecase, normalize_email};
