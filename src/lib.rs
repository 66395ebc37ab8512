//! Vista - capability-typed, read-only views over sequences and sets
//!
//! # Overview
//!
//! Vista wraps element storage in cheap, shareable handles that only expose
//! reads, and records in the type what the handle promises about that
//! storage:
//!
//! - `Vector<A, Plain>`: read-only access, nothing more
//! - `Vector<A, Protected>`: the holder cannot reach mutable storage
//! - `Vector<A, Immutable>`: nobody can mutate the storage, ever
//! - `NonEmptyVector<A, G>` / `NonEmptySet<A, G>`: at least one element
//!
//! # Quick Start
//!
//! ```
//! use std::sync::{Arc, RwLock};
//! use vista::{Builder, Immutable, Set, Vector};
//!
//! // Zero-copy adoption: the view sees later writes to the shared list.
//! let list = Arc::new(RwLock::new(vec![1, 2, 3]));
//! let view = Vector::wrap(Arc::clone(&list));
//!
//! // Structural operations never copy.
//! let tail = view.slice(1, 1000);
//! assert_eq!(tail.to_vec(), vec![2, 3]);
//!
//! // Upgrading to immutable copies only when provenance cannot prove safety.
//! let frozen: Vector<i32, Immutable> = view.to_immutable();
//! list.write().unwrap()[1] = 20;
//! assert_eq!(view.get(1), Some(20));
//! assert_eq!(frozen.get(1), Some(2));
//!
//! // Builders are persistent: adding returns a new builder.
//! let b1 = Set::builder().add("a");
//! let b2 = b1.add_all(["a", "b"]);
//! assert_eq!(b1.build().size(), 1);
//! assert_eq!(b2.build().size(), 2);
//! ```
//!
//! # Crates
//!
//! - [`vista_core`] (re-exported at the root): guarantees, the Vector and Set
//!   families, copy elision, builders, errors
//! - [`compose`]: the lazy composition chains the mapped and lazily computed
//!   vectors are built on

pub use vista_core::*;

/// Lazy composition chains.
pub mod compose {
    pub use vista_compose::*;
}
