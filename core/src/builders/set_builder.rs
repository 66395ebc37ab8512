use crate::capability::{Immutable, Member};
use crate::error::Result;
use crate::set::{NonEmptySet, Set};
use crate::traits::Builder;

use super::AppendLog;

/// Builds [`Set`]s; duplicates are accepted and collapse at [`build`](Builder::build).
#[derive(Debug)]
pub struct SetBuilder<A> {
    log: AppendLog<A>,
}

impl<A: Member> SetBuilder<A> {
    pub fn new() -> Self {
        SetBuilder {
            log: AppendLog::new(),
        }
    }

    /// # Panics
    ///
    /// Panics if the capacity overflows; see [`try_with_capacity`](Self::try_with_capacity).
    pub fn with_capacity(capacity: usize) -> Self {
        SetBuilder {
            log: AppendLog::with_capacity(capacity),
        }
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Ok(SetBuilder {
            log: AppendLog::try_with_capacity(capacity)?,
        })
    }
}

impl<A: Member> Builder<A> for SetBuilder<A> {
    type Output = Set<A, Immutable>;
    type NonEmpty = NonEmptySet<A, Immutable>;

    fn add(&self, element: A) -> Self {
        SetBuilder {
            log: self.log.append([element]),
        }
    }

    fn add_all(&self, elements: impl IntoIterator<Item = A>) -> Self {
        SetBuilder {
            log: self.log.append(elements),
        }
    }

    /// Counts every add, duplicates included.
    fn len(&self) -> usize {
        self.log.len()
    }

    fn build(&self) -> Set<A, Immutable> {
        Set::from_hashed(self.log.read(|items| items.iter().cloned().collect()))
    }

    fn build_non_empty(&self) -> Result<NonEmptySet<A, Immutable>> {
        self.build().to_non_empty_or_err()
    }
}

impl<A: Member> Default for SetBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for SetBuilder<A> {
    fn clone(&self) -> Self {
        SetBuilder {
            log: self.log.clone(),
        }
    }
}

impl<A: Member> Set<A, Immutable> {
    pub fn builder() -> SetBuilder<A> {
        SetBuilder::new()
    }

    pub fn builder_with_capacity(capacity: usize) -> SetBuilder<A> {
        SetBuilder::with_capacity(capacity)
    }
}
