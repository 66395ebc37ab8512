//! The copy-elision protocol.
//!
//! Every entry point that must hand out an [`Immutable`](crate::Immutable) view
//! from a source of unknown provenance asks [`elide`] first. The copy is
//! skipped when any of these holds, checked in order:
//!
//! 1. the source is empty (there is nothing to protect),
//! 2. the source's static guarantee already is `Immutable`,
//! 3. the source node is *primitive*: not a transformation of another view,
//!    and either owning fresh storage or having no storage at all,
//! 4. the source is a custom view whose `should_not_copy()` returns `true`.
//!
//! Otherwise the elements are copied into fresh storage. The same rule serves
//! the Vector and Set families through the [`Provenance`] trait.

use crate::capability::Guarantee;

/// Why a defensive copy was skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Elision {
    Empty,
    Guaranteed,
    Primitive,
    SelfDeclared,
}

/// What a view node can tell about where its elements come from.
pub(crate) trait Provenance {
    /// Not a transformation of another view, and no one else holds its storage.
    fn is_primitive(&self) -> bool;

    /// A custom view vouching for its own immutability.
    fn should_not_copy(&self) -> bool;
}

/// Decides whether a source typed with guarantee `G` needs a defensive copy.
///
/// Returns `None` when a copy is required.
pub(crate) fn elide<G: Guarantee, P: Provenance + ?Sized>(source: Option<&P>) -> Option<Elision> {
    let elision = match source {
        None => Some(Elision::Empty),
        Some(_) if G::IMMUTABLE => Some(Elision::Guaranteed),
        Some(node) if node.is_primitive() => Some(Elision::Primitive),
        Some(node) if node.should_not_copy() => Some(Elision::SelfDeclared),
        Some(_) => None,
    };
    match elision {
        Some(reason) => tracing::trace!(?reason, guarantee = G::NAME, "skipping defensive copy"),
        None => tracing::trace!(guarantee = G::NAME, "defensive copy required"),
    }
    elision
}
