use core::fmt;
use std::sync::Arc;

use crate::capability::Member;
use crate::elide::Provenance;
use crate::traits::{Collection, SetBacking};

pub(crate) enum SetNode<A> {
    /// A hash set owned by the view tree.
    Hashed(hashbrown::HashSet<A>),
    /// Storage adopted from the caller without copying.
    Wrapped(Arc<dyn SetBacking<A>>),
    /// `head` plus every member of `tail`; `head` was not a member of `tail`
    /// when the cell was built.
    ///
    /// When the spine ends in caller-shared storage (`shared_leaf`), the
    /// caller may later insert a head there too. Such a head is then counted
    /// and iterated once, through the storage.
    Cons {
        head: A,
        size: usize,
        shared_leaf: bool,
        tail: Option<Arc<SetNode<A>>>,
    },
    Custom(Arc<dyn Collection<A>>),
}

impl<A: Member> SetNode<A> {
    pub(crate) fn size(&self) -> usize {
        match self {
            SetNode::Hashed(set) => set.len(),
            SetNode::Wrapped(backing) => backing.size(),
            SetNode::Cons {
                size,
                shared_leaf: false,
                ..
            } => *size,
            SetNode::Cons { .. } => self.live_size(),
            SetNode::Custom(collection) => collection.size(),
        }
    }

    /// The first node below the cons spine, if the spine has one.
    pub(crate) fn leaf(&self) -> Option<&SetNode<A>> {
        let mut node = self;
        while let SetNode::Cons { tail, .. } = node {
            node = tail.as_deref()?;
        }
        Some(node)
    }

    /// Whether this node reads from storage the caller can still change.
    pub(crate) fn has_shared_leaf(&self) -> bool {
        match self {
            SetNode::Hashed(_) => false,
            SetNode::Wrapped(_) | SetNode::Custom(_) => true,
            SetNode::Cons { shared_leaf, .. } => *shared_leaf,
        }
    }

    fn live_size(&self) -> usize {
        let leaf = self.leaf();
        let mut heads = 0usize;
        let mut node = self;
        while let SetNode::Cons { head, tail, .. } = node {
            if !leaf.is_some_and(|leaf| leaf.contains(head)) {
                heads += 1;
            }
            match tail {
                Some(tail) => node = &**tail,
                None => break,
            }
        }
        leaf.map_or(0, SetNode::size).saturating_add(heads)
    }

    /// Membership, walking cons cells in a loop.
    pub(crate) fn contains(&self, element: &A) -> bool {
        let mut node = self;
        loop {
            match node {
                SetNode::Hashed(set) => return set.contains(element),
                SetNode::Wrapped(backing) => return backing.contains(element),
                SetNode::Cons { head, tail, .. } => {
                    if head == element {
                        return true;
                    }
                    match tail {
                        Some(tail) => node = &**tail,
                        None => return false,
                    }
                }
                SetNode::Custom(collection) => return collection.contains(element),
            }
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            SetNode::Hashed(_) => "hashed",
            SetNode::Wrapped(_) => "wrapped",
            SetNode::Cons { .. } => "cons",
            SetNode::Custom(_) => "custom",
        }
    }
}

impl<A: Member> Provenance for SetNode<A> {
    fn is_primitive(&self) -> bool {
        matches!(self, SetNode::Hashed(_))
    }

    fn should_not_copy(&self) -> bool {
        match self {
            SetNode::Custom(collection) => collection.should_not_copy(),
            _ => false,
        }
    }
}

impl<A> Drop for SetNode<A> {
    fn drop(&mut self) {
        let SetNode::Cons { tail, .. } = self else {
            return;
        };
        let mut next = tail.take();
        while let Some(node) = next {
            next = match Arc::try_unwrap(node) {
                Ok(mut node) => match &mut node {
                    SetNode::Cons { tail, .. } => tail.take(),
                    _ => None,
                },
                Err(_) => None,
            };
        }
    }
}

impl<A: Member> fmt::Debug for SetNode<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetNode")
            .field("kind", &self.kind())
            .field("size", &self.size())
            .finish()
    }
}
