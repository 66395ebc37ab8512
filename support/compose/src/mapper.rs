//! Mapper chains: element-wise transformations collapsed into one function.
//!
//! Each step of a chain may change the element type, so steps are stored
//! type-erased: a step consumes a boxed value and produces a boxed value.
//! The typed edges are [`erase_step`] (when a step is recorded) and
//! [`recover`] (when the final value is read back).

use core::any::Any;
use core::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use smallvec::SmallVec;

use crate::link::Link;

/// A type-erased element travelling through a mapper chain.
pub type Erased = Box<dyn Any + Send>;

/// One recorded mapping step.
pub type Step = Arc<dyn Fn(Erased) -> Erased + Send + Sync>;

/// The collapsed form of a whole chain.
pub type MapperFn = Arc<dyn Fn(Erased) -> Erased + Send + Sync>;

/// Wraps a typed function as a chain [`Step`].
///
/// The step expects its input to be an `A`; chains built through
/// [`MapperChain::then`] always feed a step the output of the previous one.
pub fn erase_step<A, B, F>(f: F) -> Step
where
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> B + Send + Sync + 'static,
{
    Arc::new(move |value: Erased| -> Erased {
        match value.downcast::<A>() {
            Ok(value) => Box::new(f(*value)),
            Err(_) => unreachable!(
                "mapper step expected `{}`",
                core::any::type_name::<A>()
            ),
        }
    })
}

/// Recovers the typed output of a chain.
pub fn recover<B: 'static>(value: Erased) -> B {
    match value.downcast::<B>() {
        Ok(value) => *value,
        Err(_) => unreachable!(
            "mapper chain did not produce `{}`",
            core::any::type_name::<B>()
        ),
    }
}

/// An immutable list of mapping steps plus a build-once collapsed function.
///
/// [`then`](MapperChain::then) never touches `self`: it returns a new chain
/// whose list shares every existing step. The collapsed function is built the
/// first time [`composed`](MapperChain::composed) is called and reused
/// afterwards, including by concurrent readers racing on the first call.
pub struct MapperChain {
    steps: Link<Step>,
    composed: OnceCell<MapperFn>,
}

impl MapperChain {
    pub fn new(step: Step) -> Self {
        MapperChain {
            steps: Link::single(step),
            composed: OnceCell::new(),
        }
    }

    /// A chain that applies `self` and then `step`.
    pub fn then(&self, step: Step) -> Self {
        MapperChain {
            steps: self.steps.prepend(step),
            composed: OnceCell::new(),
        }
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the collapsed function has been built yet.
    pub fn is_collapsed(&self) -> bool {
        self.composed.get().is_some()
    }

    /// The whole chain as one function, steps applied oldest first.
    pub fn composed(&self) -> &MapperFn {
        self.composed.get_or_init(|| {
            let mut steps: SmallVec<[Step; 4]> = self.steps.iter().cloned().collect();
            steps.reverse();
            tracing::trace!(steps = steps.len(), "collapsed mapper chain");
            Arc::new(move |value: Erased| steps.iter().fold(value, |acc, step| step(acc)))
        })
    }

    pub fn apply(&self, value: Erased) -> Erased {
        (self.composed())(value)
    }
}

impl Clone for MapperChain {
    fn clone(&self) -> Self {
        MapperChain {
            steps: self.steps.clone(),
            composed: self.composed.clone(),
        }
    }
}

impl fmt::Debug for MapperChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperChain")
            .field("steps", &self.steps.len())
            .field("collapsed", &self.is_collapsed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<B: 'static>(chain: &MapperChain, input: i64) -> B {
        recover(chain.apply(Box::new(input)))
    }

    #[test]
    fn steps_apply_in_recording_order() {
        let chain = MapperChain::new(erase_step(|x: i64| x + 1))
            .then(erase_step(|x: i64| x * 2))
            .then(erase_step(|x: i64| format!("<{x}>")));

        assert_eq!(run::<String>(&chain, 3), "<8>");
    }

    #[test]
    fn collapse_happens_once_and_only_on_demand() {
        let chain = MapperChain::new(erase_step(|x: i64| x - 1));
        assert!(!chain.is_collapsed());

        let first = Arc::as_ptr(chain.composed()) as *const ();
        let second = Arc::as_ptr(chain.composed()) as *const ();
        assert!(chain.is_collapsed());
        assert_eq!(first, second);
    }

    #[test]
    fn extending_does_not_disturb_the_original() {
        let base = MapperChain::new(erase_step(|x: i64| x + 10));
        let extended = base.then(erase_step(|x: i64| x * 3));

        assert_eq!(run::<i64>(&base, 1), 11);
        assert_eq!(run::<i64>(&extended, 1), 33);
        assert_eq!(base.len(), 1);
        assert_eq!(extended.len(), 2);
    }

    #[test]
    fn ten_thousand_steps_collapse_without_recursion() {
        let mut chain = MapperChain::new(erase_step(|x: i64| x));
        for _ in 0..10_000 {
            chain = chain.then(erase_step(|x: i64| x + 1));
        }
        assert_eq!(run::<i64>(&chain, 0), 10_000);
    }

    #[test]
    fn concurrent_first_reads_share_one_collapsed_function() {
        let chain = Arc::new(MapperChain::new(erase_step(|x: i64| x * x)));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let chain = Arc::clone(&chain);
                std::thread::spawn(move || {
                    let out: i64 = recover(chain.apply(Box::new(i as i64)));
                    (out, Arc::as_ptr(chain.composed()) as *const () as usize)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let ptr = results[0].1;
        for (i, (out, p)) in results.into_iter().enumerate() {
            assert_eq!(out, (i * i) as i64);
            assert_eq!(p, ptr);
        }
    }
}
