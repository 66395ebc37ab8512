//! Append-only builder trait.

use crate::error::Result;

/// Accumulate-then-snapshot construction.
///
/// Every method takes `&self`: adding returns a *new* builder and leaves the
/// receiver usable. Two builders derived from the same ancestor are
/// independent; each observes only its own additions.
///
/// ```
/// use vista_core::{Builder, VectorBuilder};
///
/// let b0 = VectorBuilder::new();
/// let b1 = b0.add("x");
/// let b2 = b1.add_all(["y", "z"]);
///
/// assert_eq!(b1.build().to_vec(), vec!["x"]);
/// assert_eq!(b2.build().to_vec(), vec!["x", "y", "z"]);
/// ```
pub trait Builder<A>: Sized + Clone {
    /// What [`build`](Builder::build) produces.
    type Output;

    /// What [`build_non_empty`](Builder::build_non_empty) produces.
    type NonEmpty;

    fn add(&self, element: A) -> Self;

    fn add_all(&self, elements: impl IntoIterator<Item = A>) -> Self;

    /// Number of elements added along this builder's lineage.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshots the elements added so far.
    fn build(&self) -> Self::Output;

    /// Like [`build`](Builder::build), but requires at least one prior `add`.
    ///
    /// Fails with [`ViewError::EmptyCollection`](crate::ViewError::EmptyCollection)
    /// otherwise.
    fn build_non_empty(&self) -> Result<Self::NonEmpty>;
}
