//! Reactive Context
//!
//! The reactive context tracks which computation is currently running.
//! This enables automatic dependency tracking: when a signal is read,
//! it registers the current computation as a subscriber.
//!
//! # Implementation
//!
//! We use a thread-local stack rather than a single slot. Entering a
//! computation pushes it, the returned guard pops it. A computation whose
//! body builds another effect or derived signal (at construction time or
//! during a later re-run) therefore gets its own entry back once the inner
//! one finishes, and keeps registering against the signals it reads.
//!
//! An `untracked` entry suspends registration without losing the outer
//! computation.

use std::cell::RefCell;
use std::rc::Rc;

use super::subscriber::{Computation, SubscriberId};

thread_local! {
    static CONTEXT_STACK: RefCell<Vec<ContextEntry>> = const { RefCell::new(Vec::new()) };
}

/// An entry in the reactive context stack.
#[derive(Clone)]
enum ContextEntry {
    /// Reads register against this computation.
    Tracking(Rc<Computation>),
    /// Reads register nothing.
    Untracked,
}

/// Guard that pops the context when dropped.
///
/// This keeps the stack balanced even if the computation panics.
pub struct ReactiveContext {
    subscriber_id: Option<SubscriberId>,
}

impl ReactiveContext {
    /// Enter a tracking context for the given computation.
    pub(crate) fn enter(computation: Rc<Computation>) -> Self {
        let subscriber_id = Some(computation.id());
        CONTEXT_STACK.with(|stack| {
            stack.borrow_mut().push(ContextEntry::Tracking(computation));
        });

        Self { subscriber_id }
    }

    /// Enter a context in which reads are not tracked.
    fn enter_untracked() -> Self {
        CONTEXT_STACK.with(|stack| stack.borrow_mut().push(ContextEntry::Untracked));
        Self {
            subscriber_id: None,
        }
    }

    /// Run `f` without registering any of its reads with the current
    /// computation.
    pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
        let _ctx = Self::enter_untracked();
        f()
    }

    /// Check if reads would currently be tracked.
    pub fn is_tracking() -> bool {
        Self::current_subscriber().is_some()
    }

    /// Get the current subscriber ID, if any.
    pub fn current_subscriber() -> Option<SubscriberId> {
        Self::current().map(|computation| computation.id())
    }

    /// The computation that reads should register against, if any.
    pub(crate) fn current() -> Option<Rc<Computation>> {
        CONTEXT_STACK.with(|stack| match stack.borrow().last() {
            Some(ContextEntry::Tracking(computation)) => Some(Rc::clone(computation)),
            Some(ContextEntry::Untracked) | None => None,
        })
    }

    /// Number of entries on this thread's stack.
    pub fn depth() -> usize {
        CONTEXT_STACK.with(|stack| stack.borrow().len())
    }
}

impl Drop for ReactiveContext {
    fn drop(&mut self) {
        CONTEXT_STACK.with(|stack| {
            let popped = stack.borrow_mut().pop();

            // Verify we're popping the right context.
            if let Some(entry) = popped {
                let popped_id = match entry {
                    ContextEntry::Tracking(computation) => Some(computation.id()),
                    ContextEntry::Untracked => None,
                };
                debug_assert_eq!(
                    popped_id, self.subscriber_id,
                    "ReactiveContext mismatch: expected {:?}, got {:?}",
                    self.subscriber_id, popped_id
                );
            }
        });
    }
}
