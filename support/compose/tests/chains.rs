use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use vista_compose::{Generator, IndexChain, MapperChain, erase_step, recover};

// =============================================================================
// Mapper chains
// =============================================================================

#[test]
fn type_changing_steps() {
    let chain = MapperChain::new(erase_step(|x: u8| u32::from(x) * 1_000))
        .then(erase_step(|x: u32| x.to_string()))
        .then(erase_step(|s: String| s.len()));

    let len: usize = recover(chain.apply(Box::new(7u8)));
    assert_eq!(len, 4);
    assert_eq!(chain.len(), 3);
}

#[test]
fn sibling_chains_collapse_separately() {
    let base = MapperChain::new(erase_step(|x: i32| x + 1));
    let doubled = base.then(erase_step(|x: i32| x * 2));
    let negated = base.then(erase_step(|x: i32| -x));

    assert_eq!(recover::<i32>(doubled.apply(Box::new(1))), 4);
    assert_eq!(recover::<i32>(negated.apply(Box::new(1))), -2);
    assert!(doubled.is_collapsed());
    assert!(negated.is_collapsed());
    assert!(!base.is_collapsed());
}

// =============================================================================
// Index chains
// =============================================================================

#[test]
fn offsets_accumulate_without_calling_the_generator() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let generator: Generator<usize> = Arc::new(move |i: usize| {
        counter.fetch_add(1, Ordering::SeqCst);
        i * 10
    });

    let mut chain = IndexChain::new(generator);
    for _ in 0..10_000 {
        chain = chain.then_offset(1);
    }
    assert_eq!(chain.depth(), 10_000);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!chain.is_collapsed());

    assert_eq!(chain.call(0), 100_000);
    assert_eq!(chain.call(5), 100_050);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(chain.is_collapsed());
}

#[test]
fn zero_offset_is_free() {
    let chain = IndexChain::new(Arc::new(|i: usize| i) as Generator<usize>);
    assert_eq!(chain.then_offset(0).depth(), 0);
    assert_eq!(chain.then_offset(3).then_offset(0).depth(), 1);
}
