//! Credential handling helpers
//!
//! Zero-on-drop storage for passwords and tokens, and read-only inspection of
//! access token claims.

pub mod secure_memory;
pub mod token;

pub use secure_memory::SecureString;
pub use token::token_expiry;
