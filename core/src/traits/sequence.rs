/// A user-implementable, index-addressable view.
///
/// Wrap an implementation with [`Vector::from_sequence`](crate::Vector::from_sequence)
/// to get every structural operation of the Vector family for free.
pub trait Sequence<A>: Send + Sync + 'static {
    fn size(&self) -> usize;

    /// Returns the element at `index`.
    ///
    /// Only called with `index < self.size()`.
    fn element(&self, index: usize) -> A;

    /// The element at `index`, or `None` when it is out of range.
    ///
    /// Views read custom sequences through this method. Override it when
    /// `size` can change after the view is built.
    fn get(&self, index: usize) -> Option<A> {
        (index < self.size()).then(|| self.element(index))
    }

    /// Whether converting this view to an immutable one may skip the copy.
    ///
    /// Return `true` only if no code path anywhere can change what
    /// [`element`](Sequence::element) returns.
    fn should_not_copy(&self) -> bool {
        false
    }
}
