//! Guarantee markers and the element bound.
//!
//! Guarantees are zero-sized marker types carried as the second type parameter
//! of [`Vector`](crate::Vector) and [`Set`](crate::Set). They form a chain:
//!
//! ```text
//! Immutable ──implies──▶ Protected ──implies──▶ Plain
//! ```
//!
//! Moving down the chain ([`Implies`]) is free. Moving up requires either a
//! proof from provenance or a defensive copy; see [`crate::elide`].

use core::fmt::Debug;
use core::hash::Hash;

mod private {
    pub trait Sealed {}
}

/// Anything that can be stored in a view.
///
/// Elements are handed out by value, so they must be cheap enough to clone;
/// wrap large elements in an `Arc`.
pub trait Element: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Element for T {}

/// Anything that can be stored in a [`Set`](crate::Set).
pub trait Member: Element + Eq + Hash {}

impl<T: Element + Eq + Hash> Member for T {}

/// A static promise about the storage behind a view.
///
/// This is a sealed trait - it cannot be implemented outside this crate.
pub trait Guarantee:
    private::Sealed + Copy + Default + Debug + Eq + Hash + Send + Sync + 'static
{
    /// No holder anywhere can mutate the storage.
    const IMMUTABLE: bool;
    /// The holder of the view cannot reach mutable storage.
    const PROTECTED: bool;
    const NAME: &'static str;
}

/// No promise beyond read-only access through this handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Plain;

/// Storage may be mutated elsewhere, but not through anything the holder has.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Protected;

/// Storage is exclusively owned by the view tree and never mutated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Immutable;

impl private::Sealed for Plain {}
impl private::Sealed for Protected {}
impl private::Sealed for Immutable {}

impl Guarantee for Plain {
    const IMMUTABLE: bool = false;
    const PROTECTED: bool = false;
    const NAME: &'static str = "plain";
}

impl Guarantee for Protected {
    const IMMUTABLE: bool = false;
    const PROTECTED: bool = true;
    const NAME: &'static str = "protected";
}

impl Guarantee for Immutable {
    const IMMUTABLE: bool = true;
    const PROTECTED: bool = true;
    const NAME: &'static str = "immutable";
}

/// `Self` is at least as strong as `H`.
pub trait Implies<H: Guarantee>: Guarantee {}

impl Implies<Plain> for Plain {}
impl Implies<Plain> for Protected {}
impl Implies<Protected> for Protected {}
impl Implies<Plain> for Immutable {}
impl Implies<Protected> for Immutable {}
impl Implies<Immutable> for Immutable {}
