//! The indexed-sequence family.
//!
//! A [`Vector`] is an `Arc` handle onto an immutable node tree. Cloning is
//! O(1), and structural operations build new nodes that point at the old
//! ones instead of copying elements:
//!
//! ```text
//! wrap([1, 2, 3, 4]).slice(1, 3).reverse()
//!
//!   Reversed(size 2) ──▶ Slice(offset 1, size 2) ──▶ Wrapped([1, 2, 3, 4])
//! ```
//!
//! Reads resolve through slice, reversal and cons layers in a loop, so the
//! depth of a view tree never grows the call stack.

mod iter;
mod join;
mod node;
mod non_empty;
mod ops;

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use std::sync::Arc;

use vista_compose::IndexChain;

use crate::capability::{Element, Guarantee, Immutable, Implies, Plain, Protected};
use crate::elide::{Elision, elide};
use crate::error::{Result, ViewError};
use crate::hashing::{element_hash, repeated_hash, sequence_hash};
use crate::render::render;
use crate::traits::{Backing, Sequence};

pub use iter::{IntoIter, Iter};
pub use non_empty::NonEmptyVector;

pub(crate) use node::Node;

/// A read-only, index-addressable view with guarantee `G`.
///
/// See the [module docs](self) for the representation and the
/// [crate docs](crate) for what each guarantee means.
pub struct Vector<A, G = Plain> {
    node: Option<Arc<Node<A>>>,
    _guarantee: PhantomData<G>,
}

impl<A, G> Clone for Vector<A, G> {
    fn clone(&self) -> Self {
        Vector {
            node: self.node.clone(),
            _guarantee: PhantomData,
        }
    }
}

// --- Construction ---

impl<A: Element, G: Guarantee> Vector<A, G> {
    /// The empty vector. Does not allocate.
    pub const fn empty() -> Self {
        Vector {
            node: None,
            _guarantee: PhantomData,
        }
    }

    pub(crate) fn from_node(node: Node<A>) -> Self {
        Self::from_arc(Arc::new(node))
    }

    pub(crate) fn from_arc(node: Arc<Node<A>>) -> Self {
        Vector {
            node: Some(node),
            _guarantee: PhantomData,
        }
    }

    pub(crate) fn node(&self) -> Option<&Arc<Node<A>>> {
        self.node.as_ref()
    }

    /// Same node, different guarantee. Callers are responsible for the proof.
    pub(crate) fn retag<H: Guarantee>(&self) -> Vector<A, H> {
        Vector {
            node: self.node.clone(),
            _guarantee: PhantomData,
        }
    }
}

impl<A: Element> Vector<A, Plain> {
    /// Adopts caller storage without copying.
    ///
    /// The view reads through to `backing` on every access: if the caller keeps
    /// another handle to shared storage (an `Arc<RwLock<Vec<A>>>`, say) and
    /// mutates it, the view observes the change.
    ///
    /// ```
    /// use std::sync::{Arc, RwLock};
    /// use vista_core::Vector;
    ///
    /// let list = Arc::new(RwLock::new(vec![1, 2, 3]));
    /// let view = Vector::wrap(Arc::clone(&list));
    /// list.write().unwrap()[0] = 10;
    /// assert_eq!(view.get(0), Some(10));
    /// ```
    pub fn wrap(backing: impl Backing<A>) -> Self {
        Self::from_node(Node::Wrapped(Arc::new(backing)))
    }

    /// Adopts a custom [`Sequence`] implementation.
    pub fn from_sequence(sequence: impl Sequence<A>) -> Self {
        Self::from_node(Node::Custom(Arc::new(sequence)))
    }
}

impl<A: Element> Vector<A, Immutable> {
    /// Copies every element of `elements` into fresh storage.
    ///
    /// The source may be mutated freely afterwards.
    pub fn copy_from(elements: impl IntoIterator<Item = A>) -> Self {
        let items: Arc<[A]> = elements.into_iter().collect();
        Self::from_items(items)
    }

    /// Copies at most `max_count` elements of `elements`.
    pub fn copy_from_bounded(elements: impl IntoIterator<Item = A>, max_count: usize) -> Self {
        Self::copy_from(elements.into_iter().take(max_count))
    }

    /// A non-empty vector of `first` followed by `rest`.
    pub fn of(first: A, rest: impl IntoIterator<Item = A>) -> NonEmptyVector<A, Immutable> {
        let items: Arc<[A]> = core::iter::once(first).chain(rest).collect();
        NonEmptyVector::new_unchecked(Self::from_items(items))
    }

    /// `size` copies of `value`, in O(1) memory.
    pub fn fill(size: usize, value: A) -> Self {
        if size == 0 {
            return Self::empty();
        }
        Self::from_node(Node::Fill { value, size })
    }

    /// A vector whose element `i` is `index_fn(i)`, computed on every read.
    ///
    /// `index_fn` must be pure: the vector is typed immutable and relies on
    /// repeated calls returning equal values.
    pub fn lazy_fill(size: usize, index_fn: impl Fn(usize) -> A + Send + Sync + 'static) -> Self {
        if size == 0 {
            return Self::empty();
        }
        Self::from_node(Node::Lazy {
            size,
            chain: IndexChain::new(Arc::new(index_fn)),
        })
    }

    /// Returns `source` itself when it can be proven immutable, a copy otherwise.
    pub fn ensure_immutable<G: Guarantee>(source: &Vector<A, G>) -> Self {
        source.to_immutable()
    }

    pub(crate) fn from_items(items: Arc<[A]>) -> Self {
        if items.is_empty() {
            return Self::empty();
        }
        Self::from_node(Node::Array(items))
    }
}

impl<A: Element> From<Vec<A>> for Vector<A, Immutable> {
    /// Takes exclusive ownership of `items`; no other handle can remain.
    fn from(items: Vec<A>) -> Self {
        Self::from_items(items.into())
    }
}

impl<A: Element, const N: usize> From<[A; N]> for Vector<A, Immutable> {
    fn from(items: [A; N]) -> Self {
        Self::copy_from(items)
    }
}

impl<A: Element> FromIterator<A> for Vector<A, Immutable> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self::copy_from(iter)
    }
}

// --- Access ---

impl<A: Element, G: Guarantee> Vector<A, G> {
    pub fn size(&self) -> usize {
        self.node.as_ref().map_or(0, |node| node.size())
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The element at `index`, or `None` outside `[0, size)`.
    ///
    /// Also `None` when caller-shared storage under a derived view has shrunk
    /// below what the view recorded.
    pub fn get(&self, index: usize) -> Option<A> {
        self.node.as_ref()?.get(index)
    }

    /// The element at `index`, or [`ViewError::OutOfBounds`].
    pub fn at(&self, index: usize) -> Result<A> {
        let size = self.size();
        self.get(index).ok_or(ViewError::OutOfBounds { index, size })
    }

    /// The element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.size()`.
    pub fn element(&self, index: usize) -> A {
        match self.at(index) {
            Ok(element) => element,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn first(&self) -> Option<A> {
        self.get(0)
    }

    pub fn last(&self) -> Option<A> {
        self.size().checked_sub(1).and_then(|index| self.get(index))
    }

    pub fn iter(&self) -> Iter<'_, A> {
        Iter::new(self.node.as_deref())
    }

    /// Copies the elements out into a `Vec`.
    pub fn to_vec(&self) -> Vec<A> {
        self.iter().collect()
    }

    /// Whether both handles point at the same node.
    ///
    /// Two empty vectors are always the same.
    pub fn ptr_eq<H: Guarantee>(&self, other: &Vector<A, H>) -> bool {
        match (&self.node, &other.node) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Whether this vector is not a transformation of another view.
    pub fn is_primitive(&self) -> bool {
        use crate::elide::Provenance;
        self.node.as_deref().is_none_or(Provenance::is_primitive)
    }
}

// --- Conversion ---

impl<A: Element, G: Guarantee> Vector<A, G> {
    /// Why converting to [`Immutable`] would skip the copy, or `None` if it would copy.
    pub fn copy_elision(&self) -> Option<Elision> {
        elide::<G, _>(self.node.as_deref())
    }

    /// An immutable view of the same elements.
    ///
    /// Returns the same node when [`copy_elision`](Vector::copy_elision) finds
    /// a proof; otherwise copies into fresh storage.
    pub fn to_immutable(&self) -> Vector<A, Immutable> {
        match self.copy_elision() {
            Some(_) => self.retag(),
            None => Vector::copy_from(self.iter()),
        }
    }

    /// A protected view of the same node. Never copies.
    pub fn to_protected(&self) -> Vector<A, Protected> {
        self.retag()
    }

    /// `None` if empty; otherwise the same node as a [`NonEmptyVector`].
    pub fn to_non_empty(&self) -> Option<NonEmptyVector<A, G>> {
        if self.is_empty() {
            return None;
        }
        Some(NonEmptyVector::new_unchecked(self.clone()))
    }

    /// Like [`to_non_empty`](Vector::to_non_empty), failing with
    /// [`ViewError::EmptyCollection`].
    pub fn to_non_empty_or_err(&self) -> Result<NonEmptyVector<A, G>> {
        self.to_non_empty().ok_or(ViewError::EmptyCollection)
    }

    /// Forgets part of the guarantee.
    pub fn weaken<H: Guarantee>(self) -> Vector<A, H>
    where
        G: Implies<H>,
    {
        Vector {
            node: self.node,
            _guarantee: PhantomData,
        }
    }
}

impl<A: Element> From<Vector<A, Immutable>> for Vector<A, Protected> {
    fn from(vector: Vector<A, Immutable>) -> Self {
        vector.weaken()
    }
}

impl<A: Element> From<Vector<A, Immutable>> for Vector<A, Plain> {
    fn from(vector: Vector<A, Immutable>) -> Self {
        vector.weaken()
    }
}

impl<A: Element> From<Vector<A, Protected>> for Vector<A, Plain> {
    fn from(vector: Vector<A, Protected>) -> Self {
        vector.weaken()
    }
}

impl<A: Element, G: Guarantee> Default for Vector<A, G> {
    fn default() -> Self {
        Self::empty()
    }
}

// --- Equality, hashing, rendering ---

impl<A, G, H> PartialEq<Vector<A, H>> for Vector<A, G>
where
    A: Element + PartialEq,
    G: Guarantee,
    H: Guarantee,
{
    fn eq(&self, other: &Vector<A, H>) -> bool {
        if self.size() != other.size() {
            return false;
        }
        if self.ptr_eq(other) {
            return true;
        }
        if let (Some(a), Some(b)) = (self.node.as_deref(), other.node.as_deref())
            && let (Node::Fill { value: x, .. }, Node::Fill { value: y, .. }) = (a, b)
        {
            return x == y;
        }
        self.iter().zip(other.iter()).all(|(x, y)| x == y)
    }
}

impl<A: Element + Eq, G: Guarantee> Eq for Vector<A, G> {}

impl<A: Element + Hash, G: Guarantee> Hash for Vector<A, G> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        let hash = match self.node.as_deref() {
            Some(Node::Fill { value, size }) => repeated_hash(element_hash(value), *size),
            _ => sequence_hash(self.iter()),
        };
        state.write_u64(hash);
    }
}

impl<A: Element + fmt::Display, G: Guarantee> fmt::Display for Vector<A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, "Vector", self.iter(), |f, element| write!(f, "{element}"))
    }
}

impl<A: Element + fmt::Debug, G: Guarantee> fmt::Debug for Vector<A, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, "Vector", self.iter(), |f, element| write!(f, "{element:?}"))
    }
}

impl<'a, A: Element, G: Guarantee> IntoIterator for &'a Vector<A, G> {
    type Item = A;
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A: Element, G: Guarantee> IntoIterator for Vector<A, G> {
    type Item = A;
    type IntoIter = IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.node)
    }
}
