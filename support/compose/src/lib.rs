//! Collapsible composition chains.
//!
//! Long chains of pending transformations (`map` after `map` after `map`, or
//! `slice` after `slice` on a generated sequence) are recorded as persistent
//! lists of steps rather than as nested closures. On first use a chain is
//! collapsed into a single function, memoized, and applied per access from
//! then on.
//!
//! ```text
//! fmap(f).fmap(g).fmap(h)
//!
//!   MapperChain:  [h] ──▶ [g] ──▶ [f]          (newest first, shared tails)
//!                  │
//!                  └─ composed() = |x| h(g(f(x)))   (a loop, built once)
//! ```
//!
//! Reading through a collapsed chain never recurses, so a chain of any length
//! is safe to evaluate on a small stack.
//!
//! # Example
//!
//! ```
//! use vista_compose::{MapperChain, erase_step, recover};
//!
//! let chain = MapperChain::new(erase_step(|x: i64| x + 1)).then(erase_step(|x: i64| x * 10));
//! let out: i64 = recover(chain.apply(Box::new(4_i64)));
//! assert_eq!(out, 50);
//! ```

#![deny(unsafe_code)]

mod index;
mod link;
mod mapper;

pub use index::{Generator, IndexChain};
pub use link::{Link, LinkIter};
pub use mapper::{Erased, MapperChain, MapperFn, Step, erase_step, recover};

static_assertions::assert_impl_all!(MapperChain: Send, Sync);
static_assertions::assert_impl_all!(IndexChain<u64>: Send, Sync);
static_assertions::assert_impl_all!(Link<usize>: Send, Sync);
