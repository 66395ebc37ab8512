/// A user-implementable, membership-addressable view.
///
/// Wrap an implementation with [`Set::from_collection`](crate::Set::from_collection).
pub trait Collection<A>: Send + Sync + 'static {
    fn size(&self) -> usize;

    fn contains(&self, element: &A) -> bool;

    /// Every member exactly once, in any order.
    fn elements(&self) -> Box<dyn Iterator<Item = A> + '_>;

    /// Whether converting this view to an immutable one may skip the copy.
    fn should_not_copy(&self) -> bool {
        false
    }
}
