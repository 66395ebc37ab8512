//! Storage that views can adopt without copying.
//!
//! `wrap` constructors take ownership of a *handle* to storage. When the
//! handle is shared (an `Arc` around a lock), the caller keeps the ability to
//! mutate the storage and the view observes those mutations. Views built that
//! way carry the [`Plain`](crate::Plain) guarantee until upgraded.

use core::hash::{BuildHasher, Hash};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard};

use crate::capability::Element;

/// Index-addressable storage.
pub trait Backing<A>: Send + Sync + 'static {
    fn size(&self) -> usize;

    /// Reads the element at `index`, or `None` if the storage is currently
    /// shorter than that.
    fn read_at(&self, index: usize) -> Option<A>;
}

/// Membership-addressable storage.
pub trait SetBacking<A>: Send + Sync + 'static {
    fn size(&self) -> usize;

    fn contains(&self, element: &A) -> bool;

    /// Every member exactly once.
    ///
    /// Lock-guarded storage yields a snapshot taken under the lock.
    fn elements(&self) -> Box<dyn Iterator<Item = A> + '_>;
}

// Poisoning only means another holder panicked mid-update; reads stay valid.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// Arrays and lists
// =============================================================================

impl<A: Element> Backing<A> for Vec<A> {
    fn size(&self) -> usize {
        self.len()
    }

    fn read_at(&self, index: usize) -> Option<A> {
        self.get(index).cloned()
    }
}

impl<A: Element> Backing<A> for Box<[A]> {
    fn size(&self) -> usize {
        self.len()
    }

    fn read_at(&self, index: usize) -> Option<A> {
        self.get(index).cloned()
    }
}

impl<A: Element> Backing<A> for Arc<[A]> {
    fn size(&self) -> usize {
        self.len()
    }

    fn read_at(&self, index: usize) -> Option<A> {
        self.get(index).cloned()
    }
}

impl<A: Element> Backing<A> for Arc<Vec<A>> {
    fn size(&self) -> usize {
        self.len()
    }

    fn read_at(&self, index: usize) -> Option<A> {
        self.get(index).cloned()
    }
}

impl<A: Element> Backing<A> for Arc<RwLock<Vec<A>>> {
    fn size(&self) -> usize {
        read_lock(self).len()
    }

    fn read_at(&self, index: usize) -> Option<A> {
        read_lock(self).get(index).cloned()
    }
}

impl<A: Element> Backing<A> for Arc<Mutex<Vec<A>>> {
    fn size(&self) -> usize {
        lock(self).len()
    }

    fn read_at(&self, index: usize) -> Option<A> {
        lock(self).get(index).cloned()
    }
}

// =============================================================================
// Hash sets
// =============================================================================

impl<A, S> SetBacking<A> for HashSet<A, S>
where
    A: Element + Eq + Hash,
    S: BuildHasher + Send + Sync + 'static,
{
    fn size(&self) -> usize {
        self.len()
    }

    fn contains(&self, element: &A) -> bool {
        HashSet::contains(self, element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = A> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl<A, S> SetBacking<A> for hashbrown::HashSet<A, S>
where
    A: Element + Eq + Hash,
    S: BuildHasher + Send + Sync + 'static,
{
    fn size(&self) -> usize {
        self.len()
    }

    fn contains(&self, element: &A) -> bool {
        hashbrown::HashSet::contains(self, element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = A> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl<A, S> SetBacking<A> for Arc<HashSet<A, S>>
where
    A: Element + Eq + Hash,
    S: BuildHasher + Send + Sync + 'static,
{
    fn size(&self) -> usize {
        self.len()
    }

    fn contains(&self, element: &A) -> bool {
        HashSet::contains(self, element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = A> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl<A, S> SetBacking<A> for Arc<RwLock<HashSet<A, S>>>
where
    A: Element + Eq + Hash,
    S: BuildHasher + Send + Sync + 'static,
{
    fn size(&self) -> usize {
        read_lock(self).len()
    }

    fn contains(&self, element: &A) -> bool {
        read_lock(self).contains(element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = A> + '_> {
        let snapshot: Vec<A> = read_lock(self).iter().cloned().collect();
        Box::new(snapshot.into_iter())
    }
}

impl<A, S> SetBacking<A> for Arc<Mutex<HashSet<A, S>>>
where
    A: Element + Eq + Hash,
    S: BuildHasher + Send + Sync + 'static,
{
    fn size(&self) -> usize {
        lock(self).len()
    }

    fn contains(&self, element: &A) -> bool {
        lock(self).contains(element)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = A> + '_> {
        let snapshot: Vec<A> = lock(self).iter().cloned().collect();
        Box::new(snapshot.into_iter())
    }
}
