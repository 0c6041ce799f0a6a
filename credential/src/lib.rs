//! Credential encoding library
//!
//! Provides the deterministic one-way transforms used by the directory
//! service to store and compare login credentials without ever persisting
//! plaintext:
//! - Identity encoding (login -> stable opaque identifier)
//! - Credential encoding (login + password -> stable opaque token)
//!
//! Both transforms are pure: the same inputs always produce the same output,
//! which is what makes equality-based lookups and verification possible.
//! Neither output can be reversed to recover its inputs.
//!
//! # Examples
//!
//! ## Identity encoding
//! ```
//! use credential::CredentialEncoder;
//!
//! let encoder = CredentialEncoder::new();
//! let id = encoder.encode_identity("alice").unwrap();
//! assert_eq!(id, encoder.encode_identity("alice").unwrap());
//! ```
//!
//! ## Credential encoding
//! ```
//! use credential::CredentialEncoder;
//!
//! let encoder = CredentialEncoder::new();
//! let token = encoder.encode_credential("alice", "password123").unwrap();
//! // The same password under another login yields a different token.
//! let other = encoder.encode_credential("bob", "password123").unwrap();
//! assert_ne!(token, other);
//! ```

pub mod encoding;

// Re-export commonly used items
pub use encoding::CredentialEncoder;
pub use encoding::EncodingError;
