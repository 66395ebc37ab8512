//! The node tree behind every [`Vector`](super::Vector).
//!
//! Nodes are immutable once built and shared through `Arc`. Derived nodes
//! (slices, reversals, cons cells, mapped views) record their size when they
//! are created; leaf nodes over caller-shared storage report it live.

use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;

use vista_compose::{Erased, IndexChain, MapperChain, erase_step, recover};

use crate::capability::Element;
use crate::elide::Provenance;
use crate::traits::{Backing, Sequence};

pub(crate) enum Node<A> {
    /// Fresh storage owned by the view tree.
    Array(Arc<[A]>),
    /// Storage adopted from the caller without copying.
    Wrapped(Arc<dyn Backing<A>>),
    /// `size` copies of one value.
    Fill { value: A, size: usize },
    /// A generator read through an index chain.
    Lazy { size: usize, chain: IndexChain<A> },
    /// `size` elements of `target` starting at `offset`. Never nested, and
    /// never over a reversal.
    Slice {
        offset: usize,
        size: usize,
        target: Arc<Node<A>>,
    },
    Reversed { size: usize, target: Arc<Node<A>> },
    /// `head` followed by the elements of `tail`.
    Cons {
        head: A,
        size: usize,
        tail: Option<Arc<Node<A>>>,
    },
    Mapped(Mapped<A>),
    /// User implementations, and the binary joins (zip, cross).
    Custom(Arc<dyn Sequence<A>>),
}

impl<A: Element> Node<A> {
    pub(crate) fn size(&self) -> usize {
        match self {
            Node::Array(items) => items.len(),
            Node::Wrapped(backing) => backing.size(),
            Node::Fill { size, .. }
            | Node::Lazy { size, .. }
            | Node::Slice { size, .. }
            | Node::Reversed { size, .. }
            | Node::Cons { size, .. } => *size,
            Node::Mapped(mapped) => mapped.size,
            Node::Custom(sequence) => sequence.size(),
        }
    }

    /// Resolves `index` down to a leaf without recursing through slice,
    /// reversal or cons layers.
    ///
    /// `None` when `index` is outside the node, including when caller-shared
    /// storage underneath has shrunk since the node was built.
    pub(crate) fn get(&self, index: usize) -> Option<A> {
        let mut node = self;
        let mut index = index;
        loop {
            match node {
                Node::Array(items) => return items.get(index).cloned(),
                Node::Wrapped(backing) => return backing.read_at(index),
                Node::Fill { value, size } => return (index < *size).then(|| value.clone()),
                Node::Lazy { size, chain } => return (index < *size).then(|| chain.call(index)),
                Node::Slice { offset, size, target } => {
                    if index >= *size {
                        return None;
                    }
                    index = offset.checked_add(index)?;
                    node = &**target;
                }
                Node::Reversed { size, target } => {
                    index = size.checked_sub(1)?.checked_sub(index)?;
                    node = &**target;
                }
                Node::Cons { head, tail, .. } => {
                    if index == 0 {
                        return Some(head.clone());
                    }
                    index -= 1;
                    node = tail.as_deref()?;
                }
                Node::Mapped(mapped) => return mapped.get(index),
                Node::Custom(sequence) => return sequence.get(index),
            }
        }
    }

    /// `len` elements of `node` starting at `start`.
    ///
    /// Slices never nest and always sit beneath a reversal, so slice and
    /// reversal layers stay at most two deep. A mapped node absorbs the slice
    /// into its source so that further `fmap`s keep extending one chain.
    pub(crate) fn sliced(node: &Arc<Node<A>>, start: usize, len: usize) -> Node<A> {
        if let Some(mapped) = Node::lowered(node) {
            return Node::Mapped(mapped.slice(start, len));
        }
        match node.as_ref() {
            Node::Fill { value, .. } => Node::Fill {
                value: value.clone(),
                size: len,
            },
            Node::Lazy { chain, .. } => Node::Lazy {
                size: len,
                chain: chain.then_offset(start),
            },
            Node::Slice { offset, target, .. } => Node::Slice {
                offset: offset + start,
                size: len,
                target: target.clone(),
            },
            // Elements `start..start + len` of a reversal are the reversal of
            // target elements `size - start - len..size - start`.
            Node::Reversed { size, target } => Node::Reversed {
                size: len,
                target: Arc::new(Node::sliced(target, size.saturating_sub(start + len), len)),
            },
            _ => Node::Slice {
                offset: start,
                size: len,
                target: node.clone(),
            },
        }
    }

    /// `node` in reverse order. A reversed node reverses to its target.
    pub(crate) fn reversed(node: &Arc<Node<A>>) -> Arc<Node<A>> {
        match node.as_ref() {
            Node::Reversed { target, .. } => target.clone(),
            Node::Fill { .. } => node.clone(),
            _ if node.size() <= 1 => node.clone(),
            _ => Arc::new(Node::Reversed {
                size: node.size(),
                target: node.clone(),
            }),
        }
    }

    /// The mapped node equivalent to `node`, with any reversal on top of it
    /// moved into the mapped source.
    pub(crate) fn lowered(node: &Node<A>) -> Option<Mapped<A>> {
        match node {
            Node::Mapped(mapped) => Some(mapped.clone()),
            Node::Reversed { target, .. } => match target.as_ref() {
                Node::Mapped(mapped) => Some(mapped.reverse()),
                _ => None,
            },
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Node::Array(_) => "array",
            Node::Wrapped(_) => "wrapped",
            Node::Fill { .. } => "fill",
            Node::Lazy { .. } => "lazy",
            Node::Slice { .. } => "slice",
            Node::Reversed { .. } => "reversed",
            Node::Cons { .. } => "cons",
            Node::Mapped(_) => "mapped",
            Node::Custom(_) => "custom",
        }
    }
}

impl<A: Element> Provenance for Node<A> {
    fn is_primitive(&self) -> bool {
        matches!(self, Node::Array(_) | Node::Fill { .. } | Node::Lazy { .. })
    }

    fn should_not_copy(&self) -> bool {
        match self {
            Node::Custom(sequence) => sequence.should_not_copy(),
            _ => false,
        }
    }
}

// Cons spines built by repeated `prepend` can be arbitrarily long; unlink them
// in a loop so dropping one never recurses.
impl<A> Drop for Node<A> {
    fn drop(&mut self) {
        let Node::Cons { tail, .. } = self else {
            return;
        };
        let mut next = tail.take();
        while let Some(node) = next {
            next = match Arc::try_unwrap(node) {
                Ok(mut node) => match &mut node {
                    Node::Cons { tail, .. } => tail.take(),
                    _ => None,
                },
                Err(_) => None,
            };
        }
    }
}

impl<A: Element> fmt::Debug for Node<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("size", &self.size())
            .finish()
    }
}

// =============================================================================
// Mapped - a mapper chain over a type-erased source
// =============================================================================

/// Element source of a mapped node, with the element type erased.
///
/// Slicing and reversal happen here, beneath the mapper chain, so a mapped
/// node never sits under another structural layer of its own making.
pub(crate) trait ErasedSource: Send + Sync {
    fn erased(&self, index: usize) -> Option<Erased>;

    fn slice(&self, start: usize, len: usize) -> Arc<dyn ErasedSource>;

    fn reverse(&self) -> Arc<dyn ErasedSource>;
}

struct Source<S>(Arc<Node<S>>);

impl<S: Element> ErasedSource for Source<S> {
    fn erased(&self, index: usize) -> Option<Erased> {
        let element: Erased = Box::new(self.0.get(index)?);
        Some(element)
    }

    fn slice(&self, start: usize, len: usize) -> Arc<dyn ErasedSource> {
        Arc::new(Source(Arc::new(Node::sliced(&self.0, start, len))))
    }

    fn reverse(&self) -> Arc<dyn ErasedSource> {
        Arc::new(Source(Node::reversed(&self.0)))
    }
}

/// `fmap` chains collapse here: every further `fmap` on a mapped node extends
/// the same chain over the same source.
pub(crate) struct Mapped<A> {
    size: usize,
    source: Arc<dyn ErasedSource>,
    chain: MapperChain,
    _marker: PhantomData<fn() -> A>,
}

impl<A: Element> Mapped<A> {
    pub(crate) fn new<S: Element>(source: Arc<Node<S>>, f: impl Fn(S) -> A + Send + Sync + 'static) -> Self {
        Mapped {
            size: source.size(),
            source: Arc::new(Source(source)),
            chain: MapperChain::new(erase_step(f)),
            _marker: PhantomData,
        }
    }

    pub(crate) fn then<B: Element>(&self, f: impl Fn(A) -> B + Send + Sync + 'static) -> Mapped<B> {
        Mapped {
            size: self.size,
            source: self.source.clone(),
            chain: self.chain.then(erase_step(f)),
            _marker: PhantomData,
        }
    }

    /// The same chain over `len` source elements starting at `start`.
    pub(crate) fn slice(&self, start: usize, len: usize) -> Mapped<A> {
        Mapped {
            size: len,
            source: self.source.slice(start, len),
            chain: self.chain.clone(),
            _marker: PhantomData,
        }
    }

    /// The same chain over the reversed source.
    pub(crate) fn reverse(&self) -> Mapped<A> {
        Mapped {
            size: self.size,
            source: self.source.reverse(),
            chain: self.chain.clone(),
            _marker: PhantomData,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.chain.len()
    }

    fn get(&self, index: usize) -> Option<A> {
        if index >= self.size {
            return None;
        }
        Some(recover(self.chain.apply(self.source.erased(index)?)))
    }
}

impl<A> Clone for Mapped<A> {
    fn clone(&self) -> Self {
        Mapped {
            size: self.size,
            source: self.source.clone(),
            chain: self.chain.clone(),
            _marker: PhantomData,
        }
    }
}
