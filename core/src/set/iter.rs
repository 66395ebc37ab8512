use core::fmt;

use crate::capability::Member;
use crate::error::{Result, ViewError};

use super::node::SetNode;

/// Iterator over a [`Set`](super::Set).
///
/// Cons heads come first, newest first, followed by the members of the
/// innermost storage in its own order. A head that caller-shared storage has
/// since gained is produced by the storage only.
pub struct Iter<'a, A> {
    shared_leaf: Option<&'a SetNode<A>>,
    cursor: Option<&'a SetNode<A>>,
    leaf: Option<Box<dyn Iterator<Item = A> + 'a>>,
}

impl<'a, A: Member> Iter<'a, A> {
    pub(crate) fn new(node: Option<&'a SetNode<A>>) -> Self {
        Iter {
            shared_leaf: node.filter(|node| node.has_shared_leaf()).and_then(SetNode::leaf),
            cursor: node,
            leaf: None,
        }
    }

    /// Like `next`, failing with [`ViewError::NoSuchElement`] at the end.
    pub fn next_or_err(&mut self) -> Result<A> {
        self.next().ok_or(ViewError::NoSuchElement)
    }
}

impl<A: Member> Iterator for Iter<'_, A> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        loop {
            if let Some(leaf) = &mut self.leaf {
                return leaf.next();
            }
            match self.cursor.take()? {
                SetNode::Cons { head, tail, .. } => {
                    self.cursor = tail.as_deref();
                    if self.shared_leaf.is_some_and(|leaf| leaf.contains(head)) {
                        continue;
                    }
                    return Some(head.clone());
                }
                SetNode::Hashed(set) => self.leaf = Some(Box::new(set.iter().cloned())),
                SetNode::Wrapped(backing) => self.leaf = Some(backing.elements()),
                SetNode::Custom(collection) => self.leaf = Some(collection.elements()),
            }
        }
    }
}

impl<A> fmt::Debug for Iter<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("in_leaf", &self.leaf.is_some())
            .finish()
    }
}
