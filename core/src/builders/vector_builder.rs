use crate::capability::{Element, Immutable};
use crate::error::Result;
use crate::traits::Builder;
use crate::vector::{NonEmptyVector, Vector};

use super::AppendLog;

/// Builds [`Vector`]s one element at a time.
///
/// ```
/// use vista_core::{Builder, Vector};
///
/// let builder = Vector::builder().add(1).add_all([2, 3]);
/// assert_eq!(builder.build().to_string(), "Vector(1, 2, 3)");
/// assert_eq!(builder.build_non_empty().unwrap().head(), 1);
/// ```
#[derive(Debug)]
pub struct VectorBuilder<A> {
    log: AppendLog<A>,
}

impl<A: Element> VectorBuilder<A> {
    pub fn new() -> Self {
        VectorBuilder {
            log: AppendLog::new(),
        }
    }

    /// Pre-sizes the shared buffer for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows; see [`try_with_capacity`](Self::try_with_capacity).
    pub fn with_capacity(capacity: usize) -> Self {
        VectorBuilder {
            log: AppendLog::with_capacity(capacity),
        }
    }

    /// Fails with [`ViewError::InvalidArgument`](crate::ViewError::InvalidArgument)
    /// when `capacity` elements cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Ok(VectorBuilder {
            log: AppendLog::try_with_capacity(capacity)?,
        })
    }
}

impl<A: Element> Builder<A> for VectorBuilder<A> {
    type Output = Vector<A, Immutable>;
    type NonEmpty = NonEmptyVector<A, Immutable>;

    fn add(&self, element: A) -> Self {
        VectorBuilder {
            log: self.log.append([element]),
        }
    }

    fn add_all(&self, elements: impl IntoIterator<Item = A>) -> Self {
        VectorBuilder {
            log: self.log.append(elements),
        }
    }

    fn len(&self) -> usize {
        self.log.len()
    }

    fn build(&self) -> Vector<A, Immutable> {
        Vector::from_items(self.log.read(|items| items.iter().cloned().collect()))
    }

    fn build_non_empty(&self) -> Result<NonEmptyVector<A, Immutable>> {
        self.build().to_non_empty_or_err()
    }
}

impl<A: Element> Default for VectorBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for VectorBuilder<A> {
    fn clone(&self) -> Self {
        VectorBuilder {
            log: self.log.clone(),
        }
    }
}

impl<A: Element> Vector<A, Immutable> {
    pub fn builder() -> VectorBuilder<A> {
        VectorBuilder::new()
    }

    pub fn builder_with_capacity(capacity: usize) -> VectorBuilder<A> {
        VectorBuilder::with_capacity(capacity)
    }
}
