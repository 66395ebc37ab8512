//! Index chains: offset adjustments over a generator, collapsed into one call.

use core::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::link::Link;

/// A pure index-to-value function.
pub type Generator<A> = Arc<dyn Fn(usize) -> A + Send + Sync>;

/// A generator plus the offsets accumulated by repeated slicing.
///
/// Every [`then_offset`](IndexChain::then_offset) records one more shift
/// without calling the generator. The first read folds all recorded shifts into
/// a single adjusted generator, which is memoized; reads are O(1) no matter
/// how many times the sequence was re-sliced.
pub struct IndexChain<A> {
    generator: Generator<A>,
    offsets: Link<usize>,
    composed: OnceCell<Generator<A>>,
}

impl<A: 'static> IndexChain<A> {
    pub fn new(generator: Generator<A>) -> Self {
        IndexChain {
            generator,
            offsets: Link::new(),
            composed: OnceCell::new(),
        }
    }

    /// A chain whose index `i` reads this chain's index `i + offset`.
    pub fn then_offset(&self, offset: usize) -> Self {
        if offset == 0 {
            return self.clone();
        }
        IndexChain {
            generator: self.generator.clone(),
            offsets: self.offsets.prepend(offset),
            composed: OnceCell::new(),
        }
    }

    /// Number of recorded offset steps.
    pub fn depth(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_collapsed(&self) -> bool {
        self.composed.get().is_some()
    }

    /// The generator with every recorded offset folded in.
    pub fn composed(&self) -> &Generator<A> {
        self.composed.get_or_init(|| {
            let shift: usize = self.offsets.iter().sum();
            tracing::trace!(steps = self.offsets.len(), shift, "collapsed index chain");
            let generator = self.generator.clone();
            if shift == 0 {
                return generator;
            }
            let shifted: Generator<A> = Arc::new(move |index: usize| generator(index + shift));
            shifted
        })
    }

    pub fn call(&self, index: usize) -> A {
        (self.composed())(index)
    }
}

impl<A> Clone for IndexChain<A> {
    fn clone(&self) -> Self {
        IndexChain {
            generator: self.generator.clone(),
            offsets: self.offsets.clone(),
            composed: self.composed.clone(),
        }
    }
}

impl<A> fmt::Debug for IndexChain<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexChain")
            .field("offsets", &self.offsets)
            .field("collapsed", &self.composed.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn offsets_accumulate() {
        let chain = IndexChain::new(Arc::new(|i: usize| i * 10));
        let shifted = chain.then_offset(2).then_offset(3);

        assert_eq!(chain.call(0), 0);
        assert_eq!(shifted.call(0), 50);
        assert_eq!(shifted.call(1), 60);
        assert_eq!(shifted.depth(), 2);
    }

    #[test]
    fn recording_offsets_never_calls_the_generator() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut chain = IndexChain::new(Arc::new(move |i: usize| {
            counter.fetch_add(1, Ordering::SeqCst);
            i
        }));
        for _ in 0..1_000 {
            chain = chain.then_offset(1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(chain.call(5), 1_005);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_offset_is_free() {
        let chain = IndexChain::new(Arc::new(|i: usize| i as u64));
        let same = chain.then_offset(0);
        assert_eq!(same.depth(), 0);
    }
}
