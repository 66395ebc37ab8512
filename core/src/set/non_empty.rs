use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::Skip;
use core::ops::Deref;

use crate::capability::{Guarantee, Immutable, Implies, Member, Plain, Protected};
use crate::error::{Result, ViewError};
use crate::render::render;

use super::{Iter, Set};

/// A [`Set`] known to hold at least one member.
///
/// `head()` is whichever member iteration produces first (the newest cons
/// head when the set was grown with [`Set::with`]); `tail()` is everything
/// iteration produces after it.
pub struct NonEmptySet<A, G = Plain> {
    inner: Set<A, G>,
}

impl<A, G> Clone for NonEmptySet<A, G> {
    fn clone(&self) -> Self {
        NonEmptySet {
            inner: self.inner.clone(),
        }
    }
}

impl<A: Member, G: Guarantee> NonEmptySet<A, G> {
    pub(crate) fn new_unchecked(inner: Set<A, G>) -> Self {
        debug_assert!(!inner.is_empty());
        NonEmptySet { inner }
    }

    /// Some member; the first one iteration produces.
    ///
    /// # Panics
    ///
    /// Panics if caller-shared storage behind this set has been emptied since
    /// the set was checked.
    pub fn head(&self) -> A {
        match self.inner.iter().next() {
            Some(head) => head,
            None => panic!("{}", ViewError::EmptyCollection),
        }
    }

    /// The members after [`head`](NonEmptySet::head), read from the same storage.
    pub fn tail(&self) -> SetTail<A, G> {
        SetTail {
            set: self.inner.clone(),
        }
    }

    pub fn with(&self, element: A) -> Self {
        self.inner.with(element)
    }

    pub fn to_immutable(&self) -> NonEmptySet<A, Immutable> {
        NonEmptySet::new_unchecked(self.inner.to_immutable())
    }

    pub fn to_protected(&self) -> NonEmptySet<A, Protected> {
        NonEmptySet::new_unchecked(self.inner.to_protected())
    }

    pub fn to_non_empty(&self) -> Option<Self> {
        Some(self.clone())
    }

    pub fn weaken<H: Guarantee>(self) -> NonEmptySet<A, H>
    where
        G: Implies<H>,
    {
        NonEmptySet {
            inner: self.inner.weaken(),
        }
    }

    pub fn as_set(&self) -> &Set<A, G> {
        &self.inner
    }

    pub fn into_set(self) -> Set<A, G> {
        self.inner
    }
}

impl<A, G> Deref for NonEmptySet<A, G> {
    type Target = Set<A, G>;

    fn deref(&self) -> &Set<A, G> {
        &self.inner
    }
}

impl<A: Member, G: Guarantee> From<NonEmptySet<A, G>> for Set<A, G> {
    fn from(set: NonEmptySet<A, G>) -> Self {
        set.inner
    }
}

impl<A: Member, G: Guarantee> TryFrom<Set<A, G>> for NonEmptySet<A, G> {
    type Error = ViewError;

    fn try_from(set: Set<A, G>) -> Result<Self> {
        set.to_non_empty_or_err()
    }
}

impl<A: Member, G: Guarantee, H: Guarantee> PartialEq<NonEmptySet<A, H>> for NonEmptySet<A, G> {
    fn eq(&self, other: &NonEmptySet<A, H>) -> bool {
        self.inner == other.inner
    }
}

impl<A: Member, G: Guarantee, H: Guarantee> PartialEq<Set<A, H>> for NonEmptySet<A, G> {
    fn eq(&self, other: &Set<A, H>) -> bool {
        self.inner == *other
    }
}

impl<A: Member, G: Guarantee> Eq for NonEmptySet<A, G> {}

impl<A: Member, G: Guarantee> Hash for NonEmptySet<A, G> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.inner.hash(state);
    }
}

impl<A: Member + fmt::Display, G: Guarantee> fmt::Display for NonEmptySet<A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<A: Member + fmt::Debug, G: Guarantee> fmt::Debug for NonEmptySet<A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

/// The members of a [`NonEmptySet`] after its head.
///
/// Only iterable: it is a cursor over the parent's storage advanced by one,
/// not a set in its own right.
pub struct SetTail<A, G = Plain> {
    set: Set<A, G>,
}

impl<A, G> Clone for SetTail<A, G> {
    fn clone(&self) -> Self {
        SetTail {
            set: self.set.clone(),
        }
    }
}

impl<A: Member, G: Guarantee> SetTail<A, G> {
    pub fn size(&self) -> usize {
        self.set.size().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn iter(&self) -> Skip<Iter<'_, A>> {
        self.set.iter().skip(1)
    }
}

impl<'a, A: Member, G: Guarantee> IntoIterator for &'a SetTail<A, G> {
    type Item = A;
    type IntoIter = Skip<Iter<'a, A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A: Member + fmt::Debug, G: Guarantee> fmt::Debug for SetTail<A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, "SetTail", self.iter(), |f, element| write!(f, "{element:?}"))
    }
}
