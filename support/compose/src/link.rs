use core::fmt;
use std::sync::Arc;

/// A persistent singly-linked list, newest element first.
///
/// Prepending is O(1) and never disturbs existing lists: two lists derived from
/// a common ancestor share every node of that ancestor.
///
/// ```text
/// a = [2, 1]           a: ─▶ 2 ─▶ 1
/// b = a.prepend(3)     b: ─▶ 3 ─┘
/// c = a.prepend(4)     c: ─▶ 4 ─┘
/// ```
pub struct Link<T> {
    head: Option<Arc<Node<T>>>,
    len: usize,
}

struct Node<T> {
    value: T,
    next: Option<Arc<Node<T>>>,
}

impl<T> Link<T> {
    /// The empty list.
    pub const fn new() -> Self {
        Link { head: None, len: 0 }
    }

    /// A one-element list.
    pub fn single(value: T) -> Self {
        Link::new().prepend(value)
    }

    /// Returns a new list with `value` in front of every element of `self`.
    pub fn prepend(&self, value: T) -> Self {
        Link {
            head: Some(Arc::new(Node {
                value,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The most recently prepended element.
    pub fn first(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    /// Iterates newest to oldest.
    pub fn iter(&self) -> LinkIter<'_, T> {
        LinkIter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    /// Whether both lists start at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Default for Link<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        Link {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

// Unlinks node by node so that dropping a very long list does not recurse.
impl<T> Drop for Link<T> {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Link<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a Link<T> {
    type Item = &'a T;
    type IntoIter = LinkIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`Link`], newest element first.
pub struct LinkIter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for LinkIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.next?;
        self.next = node.next.as_deref();
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for LinkIter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forks_share_their_common_tail() {
        let base = Link::new().prepend(1).prepend(2);
        let left = base.prepend(3);
        let right = base.prepend(4);

        assert_eq!(left.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(right.iter().copied().collect::<Vec<_>>(), vec![4, 2, 1]);
        assert_eq!(base.len(), 2);
        assert_eq!(left.len(), 3);
        assert!(base.clone().ptr_eq(&base));
        assert!(!left.ptr_eq(&right));
        assert!(Link::<u8>::new().ptr_eq(&Link::default()));
    }

    #[test]
    fn dropping_a_long_list_does_not_overflow() {
        let mut list = Link::new();
        for i in 0..200_000 {
            list = list.prepend(i);
        }
        assert_eq!(list.first(), Some(&199_999));
        drop(list);
    }

    #[test]
    fn dropping_a_fork_keeps_the_shared_tail_alive() {
        let base = Link::single("a").prepend("b");
        let fork = base.prepend("c");
        drop(base);
        assert_eq!(fork.iter().copied().collect::<Vec<_>>(), vec!["c", "b", "a"]);
    }
}
