mod backing;
mod builder;
mod collection;
mod sequence;

pub use backing::{Backing, SetBacking};
pub use builder::Builder;
pub use collection::Collection;
pub use sequence::Sequence;
