pub mod error;
pub mod guard;
pub mod identity;
pub mod ledger;
pub mod memory;
pub mod password;
pub mod posts;
pub mod store;
pub mod token;
pub mod validate;

pub use error::{CoreError, TokenError};
pub use store::{Store, StoreError};
pub use token::TokenService;
