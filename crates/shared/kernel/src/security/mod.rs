pub mod token;

pub use token::{RequestToken, TokenError, TokenGuard};
