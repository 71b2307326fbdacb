pub mod jwt;
pub mod password;

pub use jwt::TokenIssuer;
pub use password::{hash_password, verify_password};
