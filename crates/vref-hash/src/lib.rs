//! VREF Hash Stores
//!
//! Path prefix hashing with radix tree lookup.
//!
//! # Overview
//!
//! Long, repetitive path prefixes (template directories, dictionary folders)
//! are registered once under a short [`HashCode`]. Encoders then replace the
//! longest registered prefix of a path with its code:
//!
//! - **HashStore**: bidirectional prefix/code table behind a read-write lock
//! - **HashedPath**: a path split into code and remainder
//! - **classpath_store / repository_store**: process-wide seeded stores
//!
//! # Example
//!
//! ```rust
//! use vref_hash::{HashCode, HashStore};
//!
//! let store = HashStore::new("templates");
//! store.put("com/example/templates", "7".parse::<HashCode>().unwrap()).unwrap();
//!
//! let hashed = store.hash("com/example/templates/smart.json");
//! assert_eq!(hashed.code.as_ref().map(HashCode::as_str), Some("7"));
//! assert_eq!(store.unhash(&hashed).unwrap(), "com/example/templates/smart.json");
//! ```

#![warn(missing_docs)]

pub mod code;
pub mod global;
pub mod store;

// Re-exports
pub use code::HashCode;
pub use global::{classpath_store, repository_store};
pub use store::{HashStore, HashStoreError, HashedPath};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
