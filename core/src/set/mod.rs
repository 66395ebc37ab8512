//! The unordered-collection family.
//!
//! A [`Set`] has the same handle shape as a [`Vector`]: an `Arc` onto an
//! immutable node, or nothing for the empty set. Nodes are a fresh hash set,
//! adopted caller storage, a cons cell adding one member in front of another
//! set, or a user [`Collection`].

mod iter;
mod node;
mod non_empty;

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use std::sync::Arc;

use crate::capability::{Guarantee, Immutable, Implies, Member, Plain, Protected};
use crate::elide::{Elision, elide};
use crate::error::{Result, ViewError};
use crate::hashing::unordered_hash;
use crate::render::render;
use crate::traits::{Collection, SetBacking};
use crate::vector::Vector;

pub use iter::Iter;
pub use non_empty::{NonEmptySet, SetTail};

use node::SetNode;

/// A read-only, duplicate-free view with guarantee `G`.
pub struct Set<A, G = Plain> {
    node: Option<Arc<SetNode<A>>>,
    _guarantee: PhantomData<G>,
}

impl<A, G> Clone for Set<A, G> {
    fn clone(&self) -> Self {
        Set {
            node: self.node.clone(),
            _guarantee: PhantomData,
        }
    }
}

impl<A: Member, G: Guarantee> Set<A, G> {
    /// The empty set. Does not allocate.
    pub const fn empty() -> Self {
        Set {
            node: None,
            _guarantee: PhantomData,
        }
    }

    fn from_node(node: SetNode<A>) -> Self {
        Set {
            node: Some(Arc::new(node)),
            _guarantee: PhantomData,
        }
    }

    fn retag<H: Guarantee>(&self) -> Set<A, H> {
        Set {
            node: self.node.clone(),
            _guarantee: PhantomData,
        }
    }
}

impl<A: Member> Set<A, Plain> {
    /// Adopts caller storage without copying; reads go through to it.
    pub fn wrap(backing: impl SetBacking<A>) -> Self {
        Self::from_node(SetNode::Wrapped(Arc::new(backing)))
    }

    /// Adopts a custom [`Collection`] implementation.
    pub fn from_collection(collection: impl Collection<A>) -> Self {
        Self::from_node(SetNode::Custom(Arc::new(collection)))
    }
}

impl<A: Member> Set<A, Immutable> {
    /// Copies the distinct elements of `elements` into a fresh hash set.
    pub fn copy_from(elements: impl IntoIterator<Item = A>) -> Self {
        Self::from_hashed(elements.into_iter().collect())
    }

    /// Copies from at most `max_count` elements of `elements`, before deduplication.
    pub fn copy_from_bounded(elements: impl IntoIterator<Item = A>, max_count: usize) -> Self {
        Self::copy_from(elements.into_iter().take(max_count))
    }

    /// A non-empty set of `first` and the members of `rest`. Duplicates collapse.
    ///
    /// ```
    /// use vista_core::Set;
    ///
    /// assert_eq!(Set::of("a", ["a", "b"]).size(), 2);
    /// ```
    pub fn of(first: A, rest: impl IntoIterator<Item = A>) -> NonEmptySet<A, Immutable> {
        NonEmptySet::new_unchecked(Self::copy_from(core::iter::once(first).chain(rest)))
    }

    /// Returns `source` itself when it can be proven immutable, a copy otherwise.
    pub fn ensure_immutable<G: Guarantee>(source: &Set<A, G>) -> Self {
        source.to_immutable()
    }

    pub(crate) fn from_hashed(set: hashbrown::HashSet<A>) -> Self {
        if set.is_empty() {
            return Self::empty();
        }
        Self::from_node(SetNode::Hashed(set))
    }
}

impl<A: Member> From<hashbrown::HashSet<A>> for Set<A, Immutable> {
    /// Takes exclusive ownership of `set`.
    fn from(set: hashbrown::HashSet<A>) -> Self {
        Self::from_hashed(set)
    }
}

impl<A: Member, const N: usize> From<[A; N]> for Set<A, Immutable> {
    fn from(elements: [A; N]) -> Self {
        Self::copy_from(elements)
    }
}

impl<A: Member> FromIterator<A> for Set<A, Immutable> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self::copy_from(iter)
    }
}

impl<A: Member, G: Guarantee> Set<A, G> {
    pub fn size(&self) -> usize {
        self.node.as_ref().map_or(0, |node| node.size())
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn contains(&self, element: &A) -> bool {
        self.node.as_ref().is_some_and(|node| node.contains(element))
    }

    pub fn iter(&self) -> Iter<'_, A> {
        Iter::new(self.node.as_deref())
    }

    /// Snapshots the members, in iteration order, into an immutable vector.
    pub fn to_vector(&self) -> Vector<A, Immutable> {
        Vector::copy_from(self.iter())
    }

    /// A non-empty set of the members of `self` plus `element`.
    ///
    /// Never copies: an absent `element` becomes a cons cell in front of
    /// `self`; a present one just upgrades `self`. Fails with
    /// [`ViewError::InvalidArgument`] when an absent `element` would take the
    /// size past `usize::MAX`.
    pub fn try_with(&self, element: A) -> Result<NonEmptySet<A, G>> {
        if self.contains(&element) {
            return Ok(NonEmptySet::new_unchecked(self.clone()));
        }
        let size = self.size().checked_add(1).ok_or_else(|| {
            ViewError::InvalidArgument(format!("adding to {} members overflows usize", self.size()))
        })?;
        Ok(NonEmptySet::new_unchecked(Self::from_node(SetNode::Cons {
            head: element,
            size,
            shared_leaf: self.node.as_deref().is_some_and(SetNode::has_shared_leaf),
            tail: self.node.clone(),
        })))
    }

    /// Like [`try_with`](Set::try_with).
    ///
    /// # Panics
    ///
    /// Panics if the set already holds `usize::MAX` members and lacks `element`.
    pub fn with(&self, element: A) -> NonEmptySet<A, G> {
        match self.try_with(element) {
            Ok(set) => set,
            Err(err) => panic!("{err}"),
        }
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq<H: Guarantee>(&self, other: &Set<A, H>) -> bool {
        match (&self.node, &other.node) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn is_primitive(&self) -> bool {
        use crate::elide::Provenance;
        self.node.as_deref().is_none_or(Provenance::is_primitive)
    }

    pub fn copy_elision(&self) -> Option<Elision> {
        elide::<G, _>(self.node.as_deref())
    }

    /// An immutable view of the same members, copying only when
    /// [`copy_elision`](Set::copy_elision) finds no proof.
    pub fn to_immutable(&self) -> Set<A, Immutable> {
        match self.copy_elision() {
            Some(_) => self.retag(),
            None => Set::copy_from(self.iter()),
        }
    }

    pub fn to_protected(&self) -> Set<A, Protected> {
        self.retag()
    }

    /// `None` if empty; otherwise the same node as a [`NonEmptySet`].
    pub fn to_non_empty(&self) -> Option<NonEmptySet<A, G>> {
        if self.is_empty() {
            return None;
        }
        Some(NonEmptySet::new_unchecked(self.clone()))
    }

    pub fn to_non_empty_or_err(&self) -> Result<NonEmptySet<A, G>> {
        self.to_non_empty().ok_or(ViewError::EmptyCollection)
    }

    pub fn weaken<H: Guarantee>(self) -> Set<A, H>
    where
        G: Implies<H>,
    {
        Set {
            node: self.node,
            _guarantee: PhantomData,
        }
    }
}

impl<A: Member> From<Set<A, Immutable>> for Set<A, Protected> {
    fn from(set: Set<A, Immutable>) -> Self {
        set.weaken()
    }
}

impl<A: Member> From<Set<A, Immutable>> for Set<A, Plain> {
    fn from(set: Set<A, Immutable>) -> Self {
        set.weaken()
    }
}

impl<A: Member> From<Set<A, Protected>> for Set<A, Plain> {
    fn from(set: Set<A, Protected>) -> Self {
        set.weaken()
    }
}

impl<A: Member, G: Guarantee> Default for Set<A, G> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<A: Member, G: Guarantee, H: Guarantee> PartialEq<Set<A, H>> for Set<A, G> {
    fn eq(&self, other: &Set<A, H>) -> bool {
        self.size() == other.size()
            && (self.ptr_eq(other) || self.iter().all(|element| other.contains(&element)))
    }
}

impl<A: Member, G: Guarantee> Eq for Set<A, G> {}

impl<A: Member, G: Guarantee> Hash for Set<A, G> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        state.write_u64(unordered_hash(self.iter()));
    }
}

impl<A: Member + fmt::Display, G: Guarantee> fmt::Display for Set<A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, "Set", self.iter(), |f, element| write!(f, "{element}"))
    }
}

impl<A: Member + fmt::Debug, G: Guarantee> fmt::Debug for Set<A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, "Set", self.iter(), |f, element| write!(f, "{element:?}"))
    }
}

impl<'a, A: Member, G: Guarantee> IntoIterator for &'a Set<A, G> {
    type Item = A;
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::RwLock;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils::init_test_logging;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = std::hash::DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn sorted<G: Guarantee>(set: &Set<i32, G>) -> Vec<i32> {
        let mut members: Vec<_> = set.iter().collect();
        members.sort_unstable();
        members
    }

    #[test]
    fn of_deduplicates() {
        let set = Set::of("a", ["a", "b"]);
        assert_eq!(set.size(), 2);
        assert!(set.contains(&"a"));
        assert!(set.contains(&"b"));
        assert!(!set.contains(&"c"));
    }

    #[test]
    fn empty_has_no_non_empty_form() {
        let empty: Set<String> = Set::empty();
        assert!(empty.to_non_empty().is_none());
        assert_eq!(empty.to_non_empty_or_err().err(), Some(ViewError::EmptyCollection));
        assert_eq!(empty.to_string(), "Set()");
    }

    #[test]
    fn with_absent_element_adds_a_cons_cell() {
        let base = Set::copy_from([1, 2]);
        let grown = base.with(3);
        assert_eq!(grown.size(), 3);
        assert_eq!(grown.head(), 3);
        assert_eq!(sorted(grown.as_set()), vec![1, 2, 3]);
        assert!(!grown.as_set().ptr_eq(&base));
        assert_eq!(grown.as_set().node.as_deref().map(SetNode::kind), Some("cons"));
    }

    #[test]
    fn with_present_element_reuses_the_node() {
        let base = Set::copy_from([1, 2]);
        let same = base.with(2);
        assert!(same.as_set().ptr_eq(&base));
        assert_eq!(same.size(), 2);
    }

    #[test]
    fn cons_over_shared_storage_counts_each_member_once() {
        let shared = Arc::new(RwLock::new(HashSet::from([1, 2])));
        let grown = Set::wrap(Arc::clone(&shared)).with(3).with(4);
        assert_eq!(grown.size(), 4);

        shared.write().unwrap().insert(3);
        assert_eq!(grown.size(), 4);
        assert_eq!(sorted(grown.as_set()), vec![1, 2, 3, 4]);
        assert_eq!(grown.iter().count(), grown.size());

        shared.write().unwrap().remove(&1);
        assert_eq!(grown.size(), 3);
        assert_eq!(sorted(grown.as_set()), vec![2, 3, 4]);
        assert!(grown.contains(&3));
    }

    #[test]
    fn with_reports_size_overflow() {
        struct Saturated;

        impl Collection<u8> for Saturated {
            fn size(&self) -> usize {
                usize::MAX
            }

            fn contains(&self, element: &u8) -> bool {
                *element != 0
            }

            fn elements(&self) -> Box<dyn Iterator<Item = u8> + '_> {
                Box::new(1..=u8::MAX)
            }
        }

        let set = Set::from_collection(Saturated);
        assert!(set.try_with(7).is_ok_and(|same| same.as_set().ptr_eq(&set)));
        assert!(matches!(set.try_with(0), Err(ViewError::InvalidArgument(_))));
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn with_panics_on_size_overflow() {
        struct Saturated;

        impl Collection<u8> for Saturated {
            fn size(&self) -> usize {
                usize::MAX
            }

            fn contains(&self, _: &u8) -> bool {
                false
            }

            fn elements(&self) -> Box<dyn Iterator<Item = u8> + '_> {
                Box::new(core::iter::empty())
            }
        }

        let _ = Set::from_collection(Saturated).with(0);
    }

    #[test]
    fn long_cons_chains_read_and_drop_iteratively() {
        let mut set: Set<u32, Immutable> = Set::empty();
        for i in 0..20_000 {
            set = set.with(i).into_set();
        }
        assert_eq!(set.size(), 20_000);
        assert!(set.contains(&0));
        assert!(!set.contains(&20_000));
        assert_eq!(set.iter().count(), 20_000);
    }

    #[test]
    fn equality_is_order_independent() {
        let a = Set::copy_from([3, 1, 2]);
        let b = Set::<i32, Immutable>::empty().with(1).with(2).with(3).into_set();
        let c = Set::wrap(HashSet::from([2, 3, 1]));
        assert_eq!(a, b);
        assert_eq!(c, a);
        assert_ne!(a, Set::copy_from([1, 2]));
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(hash_of(&c), hash_of(&a));
    }

    #[test]
    fn copy_from_is_independent_and_wrap_is_live() {
        init_test_logging();
        let shared = Arc::new(RwLock::new(HashSet::from([1, 2])));
        let wrapped = Set::wrap(Arc::clone(&shared));
        let copied = wrapped.to_immutable();
        assert_eq!(wrapped.copy_elision(), None);

        shared.write().unwrap().insert(3);
        assert!(wrapped.contains(&3));
        assert_eq!(wrapped.size(), 3);
        assert!(!copied.contains(&3));
        assert_eq!(sorted(&copied), vec![1, 2]);
    }

    #[test]
    fn fresh_sets_skip_the_copy() {
        let fresh: Set<i32> = Set::copy_from([1]).into();
        assert_eq!(fresh.copy_elision(), Some(Elision::Primitive));
        assert!(fresh.to_immutable().ptr_eq(&fresh));
        assert!(!fresh.with(2).is_primitive());
    }

    #[test]
    fn custom_collections() {
        struct Evens;

        impl Collection<u8> for Evens {
            fn size(&self) -> usize {
                128
            }

            fn contains(&self, element: &u8) -> bool {
                element % 2 == 0
            }

            fn elements(&self) -> Box<dyn Iterator<Item = u8> + '_> {
                Box::new((0..=254).step_by(2))
            }

            fn should_not_copy(&self) -> bool {
                true
            }
        }

        let evens = Set::from_collection(Evens);
        assert_eq!(evens.size(), 128);
        assert!(evens.contains(&254));
        assert_eq!(evens.copy_elision(), Some(Elision::SelfDeclared));
        assert!(Set::ensure_immutable(&evens).ptr_eq(&evens));
    }

    #[test]
    fn to_vector_snapshots_iteration_order() {
        let set = Set::<char, Immutable>::empty().with('b').with('a').into_set();
        assert_eq!(set.to_vector().to_vec(), vec!['a', 'b']);
        assert!(Set::<char>::empty().to_vector().is_empty());
    }
}
