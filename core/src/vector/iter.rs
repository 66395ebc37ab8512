use core::iter::FusedIterator;
use std::sync::Arc;

use crate::capability::Element;
use crate::error::{Result, ViewError};

use super::Node;

/// Borrowing iterator over a [`Vector`](super::Vector), in index order.
///
/// Yields clones; there is no way to reach the storage through it. Stops early
/// if caller-shared storage shrinks below the view's recorded size.
pub struct Iter<'a, A> {
    node: Option<&'a Node<A>>,
    front: usize,
    back: usize,
}

impl<'a, A: Element> Iter<'a, A> {
    pub(crate) fn new(node: Option<&'a Node<A>>) -> Self {
        let back = node.map_or(0, Node::size);
        Iter { node, front: 0, back }
    }

    /// Like `next`, failing with [`ViewError::NoSuchElement`] at the end.
    pub fn next_or_err(&mut self) -> Result<A> {
        self.next().ok_or(ViewError::NoSuchElement)
    }
}

impl<A: Element> Iterator for Iter<'_, A> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        if self.front >= self.back {
            return None;
        }
        let Some(element) = self.node?.get(self.front) else {
            self.front = self.back;
            return None;
        };
        self.front += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<A> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<A: Element> DoubleEndedIterator for Iter<'_, A> {
    fn next_back(&mut self) -> Option<A> {
        if self.front >= self.back {
            return None;
        }
        let Some(element) = self.node?.get(self.back - 1) else {
            self.back = self.front;
            return None;
        };
        self.back -= 1;
        Some(element)
    }
}

impl<A: Element> ExactSizeIterator for Iter<'_, A> {}

impl<A: Element> FusedIterator for Iter<'_, A> {}

/// Owning iterator over a [`Vector`](super::Vector).
pub struct IntoIter<A> {
    node: Option<Arc<Node<A>>>,
    front: usize,
    back: usize,
}

impl<A: Element> IntoIter<A> {
    pub(crate) fn new(node: Option<Arc<Node<A>>>) -> Self {
        let back = node.as_ref().map_or(0, |node| node.size());
        IntoIter { node, front: 0, back }
    }

    /// Like `next`, failing with [`ViewError::NoSuchElement`] at the end.
    pub fn next_or_err(&mut self) -> Result<A> {
        self.next().ok_or(ViewError::NoSuchElement)
    }
}

impl<A: Element> Iterator for IntoIter<A> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        if self.front >= self.back {
            return None;
        }
        let Some(element) = self.node.as_ref()?.get(self.front) else {
            self.front = self.back;
            return None;
        };
        self.front += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<A: Element> DoubleEndedIterator for IntoIter<A> {
    fn next_back(&mut self) -> Option<A> {
        if self.front >= self.back {
            return None;
        }
        let Some(element) = self.node.as_ref()?.get(self.back - 1) else {
            self.back = self.front;
            return None;
        };
        self.back -= 1;
        Some(element)
    }
}

impl<A: Element> ExactSizeIterator for IntoIter<A> {}

impl<A: Element> FusedIterator for IntoIter<A> {}
