pub mod filter;
pub mod password;
pub mod token;

pub use filter::{AuthFilter, BearerAuth, Identity};
pub use token::{Claims, TokenProvider};
