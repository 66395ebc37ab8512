use std::thread;

use pretty_assertions::assert_eq;
use vista_core::{Builder, Set, SetBuilder, Vector, VectorBuilder, ViewError};

// =============================================================================
// Fork independence
// =============================================================================

#[test]
fn earlier_builders_keep_their_contents() {
    let b0 = VectorBuilder::new();
    let b1 = b0.add('x');
    let b2 = b1.add_all(['y', 'z']);
    let before = b1.build();

    let b3 = b2.add_all(['1', '2', '3']);
    let b4 = b1.add('w');

    assert_eq!(b1.build(), before);
    assert_eq!(b1.build().to_vec(), vec!['x']);
    assert_eq!(b2.build().to_vec(), vec!['x', 'y', 'z']);
    assert_eq!(b3.build().to_vec(), vec!['x', 'y', 'z', '1', '2', '3']);
    assert_eq!(b4.build().to_vec(), vec!['x', 'w']);
    assert!(b0.build().is_empty());
}

#[test]
fn forks_of_forks() {
    let root = Vector::builder().add_all(0..3);
    let mut leaves = Vec::new();
    for i in 0..4 {
        let branch = root.add(10 * i);
        leaves.push(branch.add(10 * i + 1));
        leaves.push(branch.add(10 * i + 2));
    }
    for (n, leaf) in leaves.iter().enumerate() {
        let i = (n / 2) as i32;
        let last = 10 * i + 1 + (n % 2) as i32;
        assert_eq!(leaf.build().to_vec(), vec![0, 1, 2, 10 * i, last]);
    }
    assert_eq!(root.len(), 3);
}

#[test]
fn forks_handed_to_threads() {
    let base = Vector::builder_with_capacity(64).add_all(0..8u32);
    let handles: Vec<_> = (0..8u32)
        .map(|t| {
            let fork = base.clone();
            thread::spawn(move || {
                let mut builder = fork;
                for k in 0..100 {
                    builder = builder.add(1_000 * (t + 1) + k);
                }
                builder.build()
            })
        })
        .collect();

    for (t, handle) in handles.into_iter().enumerate() {
        let built = handle.join().unwrap();
        let t = t as u32;
        let expected: Vec<u32> = (0..8).chain((0..100).map(|k| 1_000 * (t + 1) + k)).collect();
        assert_eq!(built.to_vec(), expected);
    }
    assert_eq!(base.build().to_vec(), (0..8).collect::<Vec<_>>());
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn built_vectors_are_immutable_arrays() {
    let built = VectorBuilder::new().add(1).add(2).build();
    assert!(built.is_primitive());
    assert!(built.to_immutable().ptr_eq(&built));
}

#[test]
fn non_empty_builds() {
    assert_eq!(VectorBuilder::<u8>::new().build_non_empty().err(), Some(ViewError::EmptyCollection));
    assert_eq!(SetBuilder::<u8>::new().build_non_empty().err(), Some(ViewError::EmptyCollection));

    let vector = VectorBuilder::new().add("only").build_non_empty().unwrap();
    assert_eq!(vector.head(), "only");
    assert!(vector.tail().is_empty());
}

#[test]
fn set_builder_deduplicates_per_lineage() {
    let base = Set::builder().add_all(["a", "b", "a"]);
    let with_c = base.add("c");
    assert_eq!(base.len(), 3);
    assert_eq!(base.build().size(), 2);
    assert_eq!(with_c.build().size(), 3);
    assert_eq!(with_c.build(), Set::copy_from(["c", "b", "a"]));
}
