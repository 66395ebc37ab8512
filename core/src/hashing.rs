//! Content hashes shared by the view families.
//!
//! Hashes must agree across representations: a constant fill and an array
//! holding the same elements are equal, so they must hash the same. Per-element
//! hashes therefore use a fixed-key hasher, and sequence hashes use a
//! polynomial fold that has a closed form for repeated elements.

use core::hash::{Hash, Hasher};
use std::hash::DefaultHasher;

const FACTOR: u64 = 31;

pub(crate) fn element_hash<A: Hash + ?Sized>(value: &A) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// `h = 31 * h + hash(e)` over the elements, starting from 1.
pub(crate) fn sequence_hash<A: Hash>(elements: impl Iterator<Item = A>) -> u64 {
    elements.fold(1, |acc: u64, element| {
        acc.wrapping_mul(FACTOR).wrapping_add(element_hash(&element))
    })
}

/// [`sequence_hash`] of `count` copies of an element whose hash is `hash`.
///
/// Runs in O(log count).
pub(crate) fn repeated_hash(hash: u64, count: usize) -> u64 {
    let (power, sum) = geometric(count);
    power.wrapping_add(hash.wrapping_mul(sum))
}

/// Order-independent combination for sets.
pub(crate) fn unordered_hash<A: Hash>(elements: impl Iterator<Item = A>) -> u64 {
    elements.fold(0, |acc: u64, element| acc.wrapping_add(element_hash(&element)))
}

/// Returns `(31^n, 31^0 + 31^1 + ... + 31^(n-1))`, wrapping.
fn geometric(n: usize) -> (u64, u64) {
    let (mut power, mut sum) = (1u64, 0u64);
    let (mut step_power, mut step_sum) = (FACTOR, 1u64);
    let mut n = n;
    while n > 0 {
        if n & 1 == 1 {
            sum = sum.wrapping_add(power.wrapping_mul(step_sum));
            power = power.wrapping_mul(step_power);
        }
        step_sum = step_sum.wrapping_add(step_power.wrapping_mul(step_sum));
        step_power = step_power.wrapping_mul(step_power);
        n >>= 1;
    }
    (power, sum)
}
