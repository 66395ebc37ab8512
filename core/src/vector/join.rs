//! Binary views: positional zip and row-major cross-join.
//!
//! Both hold their operands' nodes directly and record their size at
//! construction, like every other derived node.

use std::sync::Arc;

use crate::capability::Element;
use crate::error::ViewError;
use crate::traits::Sequence;

use super::Node;

pub(crate) struct Zip<A, B, F> {
    size: usize,
    left: Arc<Node<A>>,
    right: Arc<Node<B>>,
    combine: F,
}

impl<A, B, F> Zip<A, B, F> {
    pub(crate) fn new(size: usize, left: Arc<Node<A>>, right: Arc<Node<B>>, combine: F) -> Self {
        Zip {
            size,
            left,
            right,
            combine,
        }
    }
}

impl<A, B, C, F> Sequence<C> for Zip<A, B, F>
where
    A: Element,
    B: Element,
    F: Fn(A, B) -> C + Send + Sync + 'static,
{
    fn size(&self) -> usize {
        self.size
    }

    fn element(&self, index: usize) -> C {
        match self.get(index) {
            Some(element) => element,
            None => panic!("{}", ViewError::OutOfBounds { index, size: self.size }),
        }
    }

    fn get(&self, index: usize) -> Option<C> {
        if index >= self.size {
            return None;
        }
        Some((self.combine)(self.left.get(index)?, self.right.get(index)?))
    }
}

pub(crate) struct Cross<A, B> {
    size: usize,
    width: usize,
    first: Arc<Node<A>>,
    second: Arc<Node<B>>,
}

impl<A: Element, B: Element> Cross<A, B> {
    pub(crate) fn new(size: usize, first: Arc<Node<A>>, second: Arc<Node<B>>) -> Self {
        Cross {
            size,
            width: second.size(),
            first,
            second,
        }
    }
}

impl<A: Element, B: Element> Sequence<(A, B)> for Cross<A, B> {
    fn size(&self) -> usize {
        self.size
    }

    fn element(&self, index: usize) -> (A, B) {
        match self.get(index) {
            Some(pair) => pair,
            None => panic!("{}", ViewError::OutOfBounds { index, size: self.size }),
        }
    }

    fn get(&self, index: usize) -> Option<(A, B)> {
        if index >= self.size {
            return None;
        }
        Some((
            self.first.get(index / self.width)?,
            self.second.get(index % self.width)?,
        ))
    }
}
