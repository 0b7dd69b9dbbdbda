//! Derived Signal Implementation
//!
//! A derived signal is a read-only signal whose value is recomputed whenever
//! any signal its function read changes.
//!
//! # How Derived Signals Work
//!
//! A derived signal is two pieces:
//!
//! - an updater computation that calls the deriving function, and
//! - a memo [`Signal`] holding the latest result.
//!
//! The updater runs once, synchronously, inside [`derive`], so the value is
//! available as soon as the constructor returns. Afterwards it re-runs
//! whenever a dependency changes and writes the new result into the memo,
//! which in turn notifies whoever reads the derived signal. Reads never run
//! the deriving function; they only copy the memo.
//!
//! The deriving function receives its own previous result, which makes
//! running accumulations straightforward:
//!
//! ```rust
//! use tributary_core::reactive::{derive, Signal};
//!
//! let clicks = Signal::new(0);
//! let source = clicks.clone();
//! let total = derive(move |previous: Option<i32>| previous.unwrap_or(0) + source.get());
//!
//! clicks.set(2);
//! clicks.set(3);
//! assert_eq!(total.get(), 5);
//! ```
//!
//! # Disposal
//!
//! After [`Derived::dispose`] the updater never runs again. Reading the
//! derived signal keeps returning the last result.

use std::cell::{OnceCell, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use super::identity::Identity;
use super::signal::Signal;
use super::subscriber::{Computation, SubscriberId};

/// Results seen by the deriving function.
struct History<T> {
    /// The latest result, handed to the next run.
    last: Option<T>,
    /// The argument handed to the latest run.
    previous: Option<T>,
}

struct DerivedInner<T> {
    memo: Signal<T>,
    updater: Rc<Computation>,
    history: Rc<RefCell<History<T>>>,
}

/// A read-only signal computed from other signals.
///
/// Cloning produces another handle to the same derived signal. Dropping the
/// last handle stops the updater.
pub struct Derived<T> {
    inner: Rc<DerivedInner<T>>,
}

impl<T: Clone + Identity + 'static> Derived<T> {
    /// Create a derived signal; see [`derive`].
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<T>) -> T + 'static,
    {
        let history = Rc::new(RefCell::new(History {
            last: None,
            previous: None,
        }));
        let memo_slot: Rc<OnceCell<Signal<T>>> = Rc::new(OnceCell::new());

        let updater = {
            let history = Rc::clone(&history);
            let memo_slot = Rc::clone(&memo_slot);
            Computation::new(move || {
                // No borrow is held while `f` runs; it may re-enter.
                let previous = history.borrow().last.clone();
                let next = f(previous.clone());
                {
                    let mut history = history.borrow_mut();
                    history.previous = previous;
                    history.last = Some(next.clone());
                }

                match memo_slot.get() {
                    Some(memo) => memo.set(next),
                    None => {
                        // First run: the memo starts out holding the result.
                        memo_slot.get_or_init(|| Signal::new(next));
                    }
                }
            })
        };
        updater.run();

        let Some(memo) = memo_slot.get().cloned() else {
            unreachable!("a fresh derived updater always runs to completion or unwinds");
        };

        Self {
            inner: Rc::new(DerivedInner {
                memo,
                updater,
                history,
            }),
        }
    }
}

impl<T: Clone + 'static> Derived<T> {
    /// Get a copy of the current value.
    ///
    /// Inside a running effect or derived signal this also subscribes that
    /// computation, so derived signals compose.
    pub fn get(&self) -> T {
        self.inner.memo.get()
    }

    /// Get a copy of the current value without subscribing.
    pub fn get_untracked(&self) -> T {
        self.inner.memo.get_untracked()
    }

    /// The argument handed to the deriving function on its latest run.
    ///
    /// `None` until the function has run with a previous result, i.e. right
    /// after construction.
    pub fn prev_value(&self) -> Option<T> {
        self.inner.history.borrow().previous.clone()
    }
}

impl<T: 'static> Derived<T> {
    /// Stop recomputing. The current value is kept.
    pub fn dispose(&self) {
        self.inner.updater.dispose();
    }

    /// Check if the derived signal has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.inner.updater.is_disposed()
    }

    /// Subscriber ID of the updater computation.
    pub fn subscriber_id(&self) -> SubscriberId {
        self.inner.updater.id()
    }

    /// Number of times the deriving function has run.
    pub fn run_count(&self) -> usize {
        self.inner.updater.run_count()
    }

    /// Number of signals the deriving function read on its latest run.
    pub fn dependency_count(&self) -> usize {
        self.inner.updater.source_count()
    }

    /// Number of computations subscribed to this derived signal.
    pub fn subscriber_count(&self) -> usize {
        self.inner.memo.subscriber_count()
    }

    /// Register the current computation, if any, without reading.
    pub fn track(&self) {
        self.inner.memo.track();
    }
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Debug + 'static> Debug for Derived<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Derived")
            .field("id", &self.subscriber_id())
            .field("value", &self.get_untracked())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Create a read-only signal computed by `f`.
///
/// `f` receives its own previous result (`None` on the first run) and runs
/// immediately, then again whenever a signal it read changes.
pub fn derive<T, F>(f: F) -> Derived<T>
where
    T: Clone + Identity + 'static,
    F: Fn(Option<T>) -> T + 'static,
{
    Derived::new(f)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
