//! Structural operations.
//!
//! None of these copy elements, and all keep the guarantee `G` of their
//! input. Clamping is uniform across node kinds:
//!
//! - `end` is clamped to `size`,
//! - `start >= end` yields the empty vector,
//! - a range covering the whole vector returns the same handle.

use std::sync::Arc;

use crate::capability::{Element, Guarantee, Implies};
use crate::error::{Result, ViewError};

use super::join::{Cross, Zip};
use super::node::Mapped;
use super::{Node, NonEmptyVector, Vector};

impl<A: Element, G: Guarantee> Vector<A, G> {
    /// Elements `start..end`, clamped to the vector.
    ///
    /// Slicing a slice composes against the original target, so reads stay
    /// O(1) however many times a view is re-sliced.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let size = self.size();
        let end = end.min(size);
        let node = match &self.node {
            Some(node) if start < end => node,
            _ => return Self::empty(),
        };
        if start == 0 && end == size {
            return self.clone();
        }
        Self::from_node(Node::sliced(node, start, end - start))
    }

    /// The first `n` elements; the same handle when `n >= size`.
    pub fn take(&self, n: usize) -> Self {
        self.slice(0, n)
    }

    /// All but the first `n` elements; the same handle when `n == 0`.
    pub fn drop(&self, n: usize) -> Self {
        self.slice(n, usize::MAX)
    }

    /// The elements in reverse order.
    ///
    /// Reversing a reversed view returns the original handle. Vectors of size
    /// 0 or 1, and constant fills, are their own reversal.
    pub fn reverse(&self) -> Self {
        match &self.node {
            Some(node) => Self::from_arc(Node::reversed(node)),
            None => self.clone(),
        }
    }

    /// Applies `f` to every element, lazily.
    ///
    /// Nothing is evaluated until an element is read. Repeated `fmap`s extend a
    /// single mapper chain instead of stacking views, even with slices and
    /// reversals in between, so a read costs one call of the collapsed chain
    /// however long it is.
    /// On a constant fill, `f` is applied once, right away.
    pub fn fmap<B: Element>(&self, f: impl Fn(A) -> B + Send + Sync + 'static) -> Vector<B, G> {
        let Some(node) = &self.node else {
            return Vector::empty();
        };
        if let Some(mapped) = Node::lowered(node) {
            return Vector::from_node(Node::Mapped(mapped.then(f)));
        }
        Vector::from_node(match node.as_ref() {
            Node::Fill { value, size } => Node::Fill {
                value: f(value.clone()),
                size: *size,
            },
            _ => Node::Mapped(Mapped::new(node.clone(), f)),
        })
    }

    /// Combines elements pairwise; the result has `min(self.size(), other.size())` elements.
    pub fn zip_with<B, C, H>(
        &self,
        other: &Vector<B, H>,
        f: impl Fn(A, B) -> C + Send + Sync + 'static,
    ) -> Vector<C, G>
    where
        B: Element,
        C: Element,
        H: Implies<G>,
    {
        match (&self.node, other.node()) {
            (Some(left), Some(right)) => {
                let size = left.size().min(right.size());
                if size == 0 {
                    return Vector::empty();
                }
                Vector::from_node(Node::Custom(Arc::new(Zip::new(
                    size,
                    left.clone(),
                    right.clone(),
                    f,
                ))))
            }
            _ => Vector::empty(),
        }
    }

    /// Pairs elements positionally.
    pub fn zip<B, H>(&self, other: &Vector<B, H>) -> Vector<(A, B), G>
    where
        B: Element,
        H: Implies<G>,
    {
        self.zip_with(other, |a, b| (a, b))
    }

    /// Every pair `(a, b)`, row-major: `a` varies slowest.
    ///
    /// Element `i` is `(self[i / n], other[i % n])` where `n = other.size()`.
    /// Fails with [`ViewError::InvalidArgument`] when `self.size() * n`
    /// overflows `usize`.
    pub fn try_cross<B, H>(&self, other: &Vector<B, H>) -> Result<Vector<(A, B), G>>
    where
        B: Element,
        H: Implies<G>,
    {
        let (first, second) = match (&self.node, other.node()) {
            (Some(first), Some(second)) => (first, second),
            _ => return Ok(Vector::empty()),
        };
        let (m, n) = (first.size(), second.size());
        let size = m.checked_mul(n).ok_or_else(|| {
            ViewError::InvalidArgument(format!("cross-join of {m} by {n} elements overflows usize"))
        })?;
        if size == 0 {
            return Ok(Vector::empty());
        }
        Ok(Vector::from_node(Node::Custom(Arc::new(Cross::new(
            size,
            first.clone(),
            second.clone(),
        )))))
    }

    /// Like [`try_cross`](Vector::try_cross).
    ///
    /// # Panics
    ///
    /// Panics if the result size overflows `usize`.
    pub fn cross<B, H>(&self, other: &Vector<B, H>) -> Vector<(A, B), G>
    where
        B: Element,
        H: Implies<G>,
    {
        match self.try_cross(other) {
            Ok(product) => product,
            Err(err) => panic!("{err}"),
        }
    }

    /// `head` followed by this vector's elements.
    ///
    /// Fails with [`ViewError::InvalidArgument`] when the vector already holds
    /// `usize::MAX` elements.
    pub fn try_prepend(&self, head: A) -> Result<NonEmptyVector<A, G>> {
        let size = self.size().checked_add(1).ok_or_else(|| {
            ViewError::InvalidArgument(format!("prepending to {} elements overflows usize", self.size()))
        })?;
        Ok(NonEmptyVector::new_unchecked(Self::from_node(Node::Cons {
            head,
            size,
            tail: self.node.clone(),
        })))
    }

    /// Like [`try_prepend`](Vector::try_prepend).
    ///
    /// # Panics
    ///
    /// Panics if the vector already holds `usize::MAX` elements.
    pub fn prepend(&self, head: A) -> NonEmptyVector<A, G> {
        match self.try_prepend(head) {
            Ok(vector) => vector,
            Err(err) => panic!("{err}"),
        }
    }

    /// Number of recorded steps in this vector's mapper chain, if it is a mapped view.
    pub fn map_depth(&self) -> Option<usize> {
        match self.node.as_deref() {
            Some(Node::Mapped(mapped)) => Some(mapped.depth()),
            _ => None,
        }
    }
}
