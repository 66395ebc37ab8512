//! Append-only builders.
//!
//! Builders are persistent values: [`add`](crate::Builder::add) returns a new
//! builder and the old one stays valid. Lineages share one buffer until they
//! diverge; see [`AppendLog`] for the sharing rule.

mod append_log;
mod set_builder;
mod vector_builder;

pub(crate) use append_log::AppendLog;
pub use set_builder::SetBuilder;
pub use vector_builder::VectorBuilder;
