use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};

use pretty_assertions::assert_eq;
use vista_core::{Collection, Elision, Immutable, Plain, Protected, Sequence, Set, Vector};

// =============================================================================
// Copy independence vs. wrap visibility
// =============================================================================

#[test]
fn copied_vector_ignores_later_writes() {
    let mut source = vec![1, 2, 3];
    let copy = Vector::copy_from(source.iter().copied());
    source[0] = 100;
    source.push(4);
    assert_eq!(copy.to_vec(), vec![1, 2, 3]);
}

#[test]
fn wrapped_vector_observes_later_writes() {
    let list = Arc::new(RwLock::new(vec![1, 2, 3]));
    let view = Vector::wrap(Arc::clone(&list));
    let tail = view.drop(1);

    list.write().unwrap()[1] = 20;
    assert_eq!(view.to_vec(), vec![1, 20, 3]);
    assert_eq!(tail.to_vec(), vec![20, 3]);

    list.write().unwrap().push(4);
    assert_eq!(view.size(), 4);
}

#[test]
fn copied_set_ignores_later_writes() {
    let mut source = HashSet::from(["a", "b"]);
    let copy = Set::copy_from(source.iter().copied());
    source.insert("c");
    assert_eq!(copy.size(), 2);
    assert!(!copy.contains(&"c"));
}

#[test]
fn wrapped_set_observes_later_writes() {
    let shared = Arc::new(Mutex::new(HashSet::from([1])));
    let view = Set::wrap(Arc::clone(&shared));
    shared.lock().unwrap().insert(2);
    assert!(view.contains(&2));
    assert_eq!(view.size(), 2);
}

// =============================================================================
// Elision decisions
// =============================================================================

#[test]
fn immutable_derivations_never_copy() {
    let base = Vector::copy_from(0..10);
    let derived = base.slice(2, 8).reverse().fmap(|x| x * 2).prepend(-1).into_vector();
    assert_eq!(derived.copy_elision(), Some(Elision::Guaranteed));
    assert!(Vector::ensure_immutable(&derived).ptr_eq(&derived));
}

#[test]
fn plain_derivations_of_fresh_storage_copy() {
    let fresh: Vector<i32, Plain> = Vector::copy_from(0..10).weaken();
    assert_eq!(fresh.copy_elision(), Some(Elision::Primitive));

    let derived = fresh.reverse();
    assert_eq!(derived.copy_elision(), None);
    let frozen = derived.to_immutable();
    assert!(!frozen.ptr_eq(&derived));
    assert_eq!(frozen, derived);
}

#[test]
fn protected_views_share_the_node() {
    let list = Arc::new(RwLock::new(vec!['a', 'b']));
    let view = Vector::wrap(Arc::clone(&list));
    let protected: Vector<char, Protected> = view.to_protected();
    assert!(protected.ptr_eq(&view));
    assert_eq!(protected.copy_elision(), None);
}

#[test]
fn lazy_and_fill_are_primitive() {
    let lazy: Vector<usize> = Vector::lazy_fill(4, |i| i).weaken();
    let fill: Vector<u8> = Vector::fill(4, 0).weaken();
    assert_eq!(lazy.copy_elision(), Some(Elision::Primitive));
    assert_eq!(fill.copy_elision(), Some(Elision::Primitive));
}

struct Frozen(Arc<[u32]>);

impl Sequence<u32> for Frozen {
    fn size(&self) -> usize {
        self.0.len()
    }

    fn element(&self, index: usize) -> u32 {
        self.0[index]
    }

    fn should_not_copy(&self) -> bool {
        true
    }
}

impl Collection<u32> for Frozen {
    fn size(&self) -> usize {
        self.0.len()
    }

    fn contains(&self, element: &u32) -> bool {
        self.0.contains(element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        Box::new(self.0.iter().copied())
    }

    fn should_not_copy(&self) -> bool {
        true
    }
}

#[test]
fn custom_predicate_applies_to_both_families() {
    let items: Arc<[u32]> = Arc::from([5, 6, 7]);
    let vector = Vector::from_sequence(Frozen(Arc::clone(&items)));
    let set = Set::from_collection(Frozen(items));

    assert_eq!(vector.copy_elision(), Some(Elision::SelfDeclared));
    assert_eq!(set.copy_elision(), Some(Elision::SelfDeclared));

    let vector_frozen: Vector<u32, Immutable> = vector.to_immutable();
    let set_frozen: Set<u32, Immutable> = set.to_immutable();
    assert!(vector_frozen.ptr_eq(&vector));
    assert!(set_frozen.ptr_eq(&set));
}

#[test]
fn non_empty_conversion_never_copies() {
    let list = Arc::new(RwLock::new(vec![1]));
    let view = Vector::wrap(Arc::clone(&list));
    let non_empty = view.to_non_empty().unwrap();
    assert!(non_empty.ptr_eq(&view));

    let set = Set::wrap(HashSet::from([1]));
    assert!(set.to_non_empty().unwrap().ptr_eq(&set));
}
