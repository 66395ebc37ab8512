//! Capability-typed, read-only views over sequences and sets.
//!
//! A view is a cheap handle onto element storage that only exposes reads. What
//! a view *promises* about that storage is part of its type:
//!
//! | Marker        | Promise                                                        |
//! |---------------|----------------------------------------------------------------|
//! | [`Plain`]     | nothing beyond read-only access through this handle            |
//! | [`Protected`] | the holder cannot reach storage that could be mutated          |
//! | [`Immutable`] | nobody anywhere can mutate the storage                         |
//!
//! Non-emptiness is a separate wrapper ([`NonEmptyVector`], [`NonEmptySet`])
//! that adds total `head()`/`tail()` accessors.
//!
//! # Example
//!
//! ```
//! use vista_core::{Vector, Immutable};
//!
//! let v: Vector<i32, Immutable> = Vector::copy_from([1, 2, 3]);
//! let tail = v.slice(1, 1000);
//! assert_eq!(tail.to_vec(), vec![2, 3]);
//!
//! let ne = v.to_non_empty_or_err().unwrap();
//! assert_eq!(ne.head(), 1);
//! assert_eq!(v.fmap(|x| x * 10).to_string(), "Vector(10, 20, 30)");
//! ```
//!
//! Structural operations (`slice`, `take`, `drop`, `reverse`, `fmap`, `zip_with`,
//! `cross`) never copy elements and keep the guarantee of their input. Copies
//! happen only at explicit conversion points, and only when the
//! [copy-elision protocol](elide) cannot prove them redundant.

#![deny(unsafe_code)]

pub mod builders;
pub mod capability;
pub mod elide;
pub mod error;
pub mod set;
pub mod traits;
pub mod vector;

mod hashing;
mod render;

pub use builders::{SetBuilder, VectorBuilder};
pub use capability::{Element, Guarantee, Immutable, Implies, Member, Plain, Protected};
pub use elide::Elision;
pub use error::{Result, ViewError};
pub use set::{NonEmptySet, Set, SetTail};
pub use traits::{Backing, Builder, Collection, Sequence, SetBacking};
pub use vector::{NonEmptyVector, Vector};

static_assertions::assert_impl_all!(Vector<u8>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Set<u8, Immutable>: Send, Sync, Clone);
static_assertions::assert_impl_all!(VectorBuilder<u8>: Send, Sync);
static_assertions::assert_eq_size!(Vector<u8>, usize);
static_assertions::assert_eq_size!(Set<u8>, usize);
