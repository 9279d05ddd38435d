//! This package provides [`Registry`] and [`LocalRegistry`], in-process registries that store
//! objects of any type under string identifiers.
//!
//! A registry owns a keyed collection of heterogeneous instances and offers three families of
//! operations: `create` (store a value under an identifier), `get` (retrieve a typed, shared
//! view of a stored value), and `destroy` (remove one entry or all of them).
//!
//! # Checked typed retrieval
//!
//! Retrieval is always by concrete type. The registry records each entry's concrete type at
//! insertion and validates it on every typed lookup, so asking for the wrong type reports a
//! failure instead of handing back a misinterpreted value.
//!
//! # Features
//!
//! - **Type-agnostic storage**: Accepts any `'static` type; unrelated types share one registry.
//! - **Checked downcasts**: Typed retrieval verifies the stored concrete type on every lookup.
//! - **Auto-naming**: Entries can be keyed by a per-type label, giving one instance per type.
//! - **Shared views**: Retrieved values are reference-counted and may outlive the entry.
//! - **Thread-safe and single-threaded variants**: [`Registry`] for multi-threaded use,
//!   [`LocalRegistry`] for single-threaded performance.
//! - **Stable Rust**: No unstable Rust features required.
//!
//! # Example
//!
//! ```rust
//! use keyed_registry::Registry;
//!
//! // Create a thread-safe registry.
//! let registry = Registry::new();
//!
//! // Store values under explicit identifiers.
//! registry.create("answer", 42_u64);
//! registry.create("greeting", "hello".to_string());
//!
//! // Retrieve typed views.
//! let answer = registry.get::<u64>("answer");
//! assert!(answer.succeeded());
//! assert_eq!(*answer, 42);
//!
//! // Asking for the wrong type fails; it never misinterprets the value.
//! assert!(!registry.get::<String>("answer").succeeded());
//! ```
//!
//! For single-threaded use:
//!
//! ```rust
//! use keyed_registry::LocalRegistry;
//!
//! // Create a single-threaded registry (more efficient).
//! let registry = LocalRegistry::new();
//!
//! registry.create("numbers", vec![1, 2, 3]);
//! assert_eq!(*registry.get::<Vec<i32>>("numbers"), vec![1, 2, 3]);
//! ```
//!
//! Auto-naming keys an entry by its type, which makes re-creation replace the prior instance:
//!
//! ```rust
//! use keyed_registry::LocalRegistry;
//!
//! #[derive(Debug)]
//! struct Config {
//!     verbose: bool,
//! }
//!
//! let registry = LocalRegistry::new();
//!
//! registry.create_auto(Config { verbose: false });
//! registry.create_auto(Config { verbose: true });
//!
//! // Only the second instance remains.
//! assert_eq!(registry.len(), 1);
//! assert!(registry.get_auto::<Config>().verbose);
//! ```

mod constants;
mod error;
mod handle;
mod label;
mod local_handle;
mod local_registry;
mod registry;

pub use error::*;
pub use handle::*;
pub use label::*;
pub use local_handle::*;
pub use local_registry::*;
pub use registry::*;
