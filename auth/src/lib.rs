//! Authentication utilities library
//!
//! Provides the two security primitives the caption service is built on:
//! - Password hashing (Argon2id, salted, self-describing PHC output)
//! - Signed access tokens (JWT HS256) with typed claims
//!
//! The service composes these with its user directory; nothing in this
//! crate performs I/O or reads configuration.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue(42, "alice@example.com", Duration::days(7)).unwrap();
//! let claims = codec.decode(&token).unwrap();
//! assert_eq!(claims.sub, 42);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessClaims;
pub use token::TokenCodec;
pub use token::TokenError;
