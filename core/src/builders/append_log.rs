use core::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use smallvec::SmallVec;

use crate::capability::Element;
use crate::error::{Result, ViewError};

/// A shared, append-only buffer plus the length this handle considers valid.
///
/// ```text
/// b0 = new()            buffer []            b0.len = 0
/// b1 = b0.append(x)     buffer [x]           b1.len = 1   (in place)
/// b2 = b1.append(y)     buffer [x, y]        b2.len = 2   (in place)
/// b3 = b1.append(z)     buffer [x, y]  ≠ b1.len, fork:
///                       fresh  [x, z]        b3.len = 2
/// ```
///
/// A handle appends in place only while the buffer still ends where the handle
/// last saw it. Once another handle has appended past that point, the valid
/// prefix is copied into a fresh buffer first. Either way every handle's valid
/// prefix stays exactly what it was.
pub(crate) struct AppendLog<A> {
    buffer: Arc<Mutex<Vec<A>>>,
    len: usize,
}

// Appends never leave the buffer half-written, so a poisoned lock is still readable.
fn lock<A>(buffer: &Mutex<Vec<A>>) -> MutexGuard<'_, Vec<A>> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<A: Element> AppendLog<A> {
    pub(crate) fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// # Panics
    ///
    /// Panics if the capacity overflows, like [`Vec::with_capacity`].
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut buffer = Vec::new();
        buffer.try_reserve(capacity).map_err(|err| {
            ViewError::InvalidArgument(format!("capacity hint {capacity}: {err}"))
        })?;
        Ok(Self::from_vec(buffer))
    }

    fn from_vec(buffer: Vec<A>) -> Self {
        AppendLog {
            buffer: Arc::new(Mutex::new(buffer)),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// A handle whose valid prefix is this one's followed by `items`.
    pub(crate) fn append(&self, items: impl IntoIterator<Item = A>) -> Self {
        // Collected before locking: a panicking iterator must not poison the buffer.
        let items: SmallVec<[A; 4]> = items.into_iter().collect();
        if items.is_empty() {
            return self.clone();
        }

        let mut buffer = lock(&self.buffer);
        if buffer.len() == self.len {
            buffer.extend(items);
            return AppendLog {
                len: buffer.len(),
                buffer: Arc::clone(&self.buffer),
            };
        }

        tracing::debug!(
            valid = self.len,
            shared = buffer.len(),
            added = items.len(),
            "builder forked, copying valid prefix"
        );
        let mut fresh = Vec::with_capacity(self.len + items.len());
        fresh.extend_from_slice(&buffer[..self.len]);
        drop(buffer);
        fresh.extend(items);
        AppendLog {
            len: fresh.len(),
            buffer: Arc::new(Mutex::new(fresh)),
        }
    }

    /// Runs `f` on the valid prefix, under the lock.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&[A]) -> R) -> R {
        f(&lock(&self.buffer)[..self.len])
    }

    /// Whether both handles append to the same buffer.
    #[cfg(test)]
    pub(crate) fn shares_buffer_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }
}

impl<A> Clone for AppendLog<A> {
    fn clone(&self) -> Self {
        AppendLog {
            buffer: Arc::clone(&self.buffer),
            len: self.len,
        }
    }
}

impl<A> fmt::Debug for AppendLog<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppendLog").field("len", &self.len).finish()
    }
}
