//! Authentication utilities library
//!
//! Shared building blocks for the services in this workspace:
//! - Password hashing (Argon2id, PHC strings)
//! - JWT token minting and validation (HS256)
//! - Token digests (SHA-256) for store-backed token records
//! - Authentication coordination
//!
//! Each service defines its own ports and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Login Flow
//! ```
//! use auth::{Authenticator, Claims, TokenDigest};
//! use chrono::{Duration, Utc};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("pw1").unwrap();
//!
//! // Login: verify and mint token
//! let claims = Claims::for_identity(1, "a@x.com", Utc::now(), Duration::hours(1));
//! let issued = auth.authenticate("pw1", &hash, &claims).unwrap();
//! assert_eq!(issued.digest, TokenDigest::of(&issued.token));
//!
//! // Offline signature check
//! let decoded: Claims = auth.validate_token(&issued.token).unwrap();
//! assert_eq!(decoded.identity_id(), Some(1));
//! ```

pub mod authenticator;
pub mod digest;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use digest::TokenDigest;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
