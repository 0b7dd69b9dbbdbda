//! Effect Implementation
//!
//! An Effect is a side-effecting computation that runs whenever its
//! dependencies change.
//!
//! # How Effects Work
//!
//! 1. When created, the effect runs its function immediately and
//!    synchronously to establish its dependencies.
//!
//! 2. When any dependency changes, the whole function re-runs before the
//!    write that triggered it returns.
//!
//! 3. Before re-running, the effect drops its old dependencies and tracks
//!    new ones during execution, so a branch that stops reading a signal
//!    also stops listening to it.
//!
//! # Lifetime
//!
//! The [`Effect`] handle owns the computation; signals only keep weak
//! references. Dropping the last handle stops the effect just like
//! [`Effect::dispose`] does. Disposal is lazy: the computation stays in the
//! subscriber sets it joined until each of those signals next changes.

use std::rc::Rc;

use super::subscriber::{Computation, SubscriberId};

/// A side-effecting computation that runs when dependencies change.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use tributary_core::reactive::{Effect, Signal};
///
/// let count = Signal::new(0);
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let source = count.clone();
/// let log = Rc::clone(&seen);
/// let _effect = Effect::new(move || log.borrow_mut().push(source.get()));
///
/// count.set(5);
/// assert_eq!(*seen.borrow(), vec![0, 5]);
/// ```
#[must_use = "dropping the last handle to an effect stops it"]
pub struct Effect {
    computation: Rc<Computation>,
}

impl Effect {
    /// Create a new effect and run it once.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn() + 'static,
    {
        let computation = Computation::new(run);
        computation.run();
        Self { computation }
    }

    /// Get the subscriber ID for this effect.
    pub fn subscriber_id(&self) -> SubscriberId {
        self.computation.id()
    }

    /// Stop the effect. It never runs again.
    pub fn dispose(&self) {
        self.computation.dispose();
    }

    /// Check if the effect has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.computation.is_disposed()
    }

    /// Get the number of times the effect has run.
    pub fn run_count(&self) -> usize {
        self.computation.run_count()
    }

    /// Get the number of signals read on the latest run.
    pub fn dependency_count(&self) -> usize {
        self.computation.source_count()
    }
}

impl Clone for Effect {
    fn clone(&self) -> Self {
        Self {
            computation: Rc::clone(&self.computation),
        }
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("id", &self.subscriber_id())
            .field("run_count", &self.run_count())
            .field("dependency_count", &self.dependency_count())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Create an effect; see [`Effect::new`].
pub fn create_effect<F>(run: F) -> Effect
where
    F: Fn() + 'static,
{
    Effect::new(run)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
