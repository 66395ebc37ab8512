use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::Deref;

use crate::capability::{Element, Guarantee, Immutable, Implies, Plain, Protected};
use crate::error::{Result, ViewError};

use super::{Iter, Vector};

/// A [`Vector`] known to hold at least one element.
///
/// Derefs to the underlying vector, so every read-only operation is available;
/// the methods defined here shadow those that can keep the non-empty
/// guarantee.
///
/// The check happens once, when the wrapper is created. A non-empty view over
/// caller-shared storage (see [`Vector::wrap`]) is only as non-empty as the
/// caller keeps it.
pub struct NonEmptyVector<A, G = Plain> {
    inner: Vector<A, G>,
}

impl<A, G> Clone for NonEmptyVector<A, G> {
    fn clone(&self) -> Self {
        NonEmptyVector {
            inner: self.inner.clone(),
        }
    }
}

impl<A: Element, G: Guarantee> NonEmptyVector<A, G> {
    pub(crate) fn new_unchecked(inner: Vector<A, G>) -> Self {
        debug_assert!(!inner.is_empty());
        NonEmptyVector { inner }
    }

    /// The first element.
    ///
    /// # Panics
    ///
    /// Panics if caller-shared storage underneath has been emptied.
    pub fn head(&self) -> A {
        self.inner.element(0)
    }

    /// Everything after the head; empty for a single-element vector.
    pub fn tail(&self) -> Vector<A, G> {
        self.inner.drop(1)
    }

    /// The final element.
    ///
    /// # Panics
    ///
    /// Panics if caller-shared storage underneath has been emptied.
    pub fn last(&self) -> A {
        match self.inner.last() {
            Some(last) => last,
            None => panic!("{}", ViewError::EmptyCollection),
        }
    }

    pub fn reverse(&self) -> Self {
        Self::new_unchecked(self.inner.reverse())
    }

    pub fn fmap<B: Element>(
        &self,
        f: impl Fn(A) -> B + Send + Sync + 'static,
    ) -> NonEmptyVector<B, G> {
        NonEmptyVector::new_unchecked(self.inner.fmap(f))
    }

    pub fn zip_with<B, C, H>(
        &self,
        other: &NonEmptyVector<B, H>,
        f: impl Fn(A, B) -> C + Send + Sync + 'static,
    ) -> NonEmptyVector<C, G>
    where
        B: Element,
        C: Element,
        H: Implies<G>,
    {
        NonEmptyVector::new_unchecked(self.inner.zip_with(&other.inner, f))
    }

    pub fn zip<B, H>(&self, other: &NonEmptyVector<B, H>) -> NonEmptyVector<(A, B), G>
    where
        B: Element,
        H: Implies<G>,
    {
        NonEmptyVector::new_unchecked(self.inner.zip(&other.inner))
    }

    /// See [`Vector::try_cross`].
    pub fn try_cross<B, H>(&self, other: &NonEmptyVector<B, H>) -> Result<NonEmptyVector<(A, B), G>>
    where
        B: Element,
        H: Implies<G>,
    {
        self.inner.try_cross(&other.inner).map(NonEmptyVector::new_unchecked)
    }

    /// See [`Vector::cross`].
    ///
    /// # Panics
    ///
    /// Panics if the result size overflows `usize`.
    pub fn cross<B, H>(&self, other: &NonEmptyVector<B, H>) -> NonEmptyVector<(A, B), G>
    where
        B: Element,
        H: Implies<G>,
    {
        NonEmptyVector::new_unchecked(self.inner.cross(&other.inner))
    }

    pub fn prepend(&self, head: A) -> Self {
        self.inner.prepend(head)
    }

    pub fn to_immutable(&self) -> NonEmptyVector<A, Immutable> {
        NonEmptyVector::new_unchecked(self.inner.to_immutable())
    }

    pub fn to_protected(&self) -> NonEmptyVector<A, Protected> {
        NonEmptyVector::new_unchecked(self.inner.to_protected())
    }

    /// Already non-empty: returns a handle to the same node.
    pub fn to_non_empty(&self) -> Option<Self> {
        Some(self.clone())
    }

    pub fn weaken<H: Guarantee>(self) -> NonEmptyVector<A, H>
    where
        G: Implies<H>,
    {
        NonEmptyVector {
            inner: self.inner.weaken(),
        }
    }

    pub fn as_vector(&self) -> &Vector<A, G> {
        &self.inner
    }

    pub fn into_vector(self) -> Vector<A, G> {
        self.inner
    }
}

impl<A, G> Deref for NonEmptyVector<A, G> {
    type Target = Vector<A, G>;

    fn deref(&self) -> &Vector<A, G> {
        &self.inner
    }
}

impl<A: Element, G: Guarantee> From<NonEmptyVector<A, G>> for Vector<A, G> {
    fn from(vector: NonEmptyVector<A, G>) -> Self {
        vector.inner
    }
}

impl<A: Element, G: Guarantee> TryFrom<Vector<A, G>> for NonEmptyVector<A, G> {
    type Error = ViewError;

    fn try_from(vector: Vector<A, G>) -> Result<Self> {
        if vector.is_empty() {
            return Err(ViewError::EmptyCollection);
        }
        Ok(Self::new_unchecked(vector))
    }
}

impl<A, G, H> PartialEq<NonEmptyVector<A, H>> for NonEmptyVector<A, G>
where
    A: Element + PartialEq,
    G: Guarantee,
    H: Guarantee,
{
    fn eq(&self, other: &NonEmptyVector<A, H>) -> bool {
        self.inner == other.inner
    }
}

impl<A, G, H> PartialEq<Vector<A, H>> for NonEmptyVector<A, G>
where
    A: Element + PartialEq,
    G: Guarantee,
    H: Guarantee,
{
    fn eq(&self, other: &Vector<A, H>) -> bool {
        self.inner == *other
    }
}

impl<A: Element + Eq, G: Guarantee> Eq for NonEmptyVector<A, G> {}

impl<A: Element + Hash, G: Guarantee> Hash for NonEmptyVector<A, G> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.inner.hash(state);
    }
}

impl<A: Element + fmt::Display, G: Guarantee> fmt::Display for NonEmptyVector<A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<A: Element + fmt::Debug, G: Guarantee> fmt::Debug for NonEmptyVector<A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl<'a, A: Element, G: Guarantee> IntoIterator for &'a NonEmptyVector<A, G> {
    type Item = A;
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
