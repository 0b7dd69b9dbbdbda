//! Signal Implementation
//!
//! A Signal is the fundamental reactive primitive. It holds a value and
//! tracks which computations depend on it.
//!
//! # How Signals Work
//!
//! 1. When a signal is read within a reactive context (derived/effect), the
//!    signal registers that context as a subscriber.
//!
//! 2. When a signal's value changes, every live subscriber re-runs
//!    synchronously before `set` returns.
//!
//! 3. Writing the identical value (see [`Identity`]) is a no-op.
//!
//! # Ownership
//!
//! `set` takes the value by move, so the stored value is exclusively owned by
//! the signal. `get` hands out a clone: a caller mutating what it read can
//! never change what the signal holds. The clone on every read is the price
//! of that isolation; keep large buffers behind an `Rc` if it matters.
//!
//! # Threading
//!
//! Signals are single-threaded (`!Send`). Every thread has its own context
//! stack and propagation depth.

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::identity::Identity;
use super::subscriber::Subscribers;
use crate::error::Result;

/// Counter for generating unique signal IDs.
static SIGNAL_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a new unique signal ID.
fn next_signal_id() -> u64 {
    SIGNAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

struct SignalInner<T> {
    id: u64,
    value: RefCell<T>,
    subscribers: Rc<Subscribers>,
}

/// A mutable reactive cell holding a value of type `T`.
///
/// Cloning a signal produces another handle to the same cell.
///
/// # Example
///
/// ```rust
/// use tributary_core::reactive::Signal;
///
/// let count = Signal::new(0);
/// assert_eq!(count.get(), 0);
///
/// count.set(5);
/// assert_eq!(count.get(), 5);
/// ```
pub struct Signal<T> {
    inner: Rc<SignalInner<T>>,
}

impl<T: 'static> Signal<T> {
    /// Create a new signal with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(SignalInner {
                id: next_signal_id(),
                value: RefCell::new(value),
                subscribers: Subscribers::new(),
            }),
        }
    }

    /// Get the signal's unique ID.
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Get the number of subscriber entries.
    ///
    /// Disposed computations are counted until the next write prunes them.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    /// Whether `other` is a handle to the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Register the current computation, if any, without reading.
    pub fn track(&self) {
        self.inner.subscribers.track_current();
    }
}

impl<T: Clone + 'static> Signal<T> {
    /// Get a copy of the current value.
    ///
    /// Inside a running effect or derived signal this also subscribes that
    /// computation to this signal.
    pub fn get(&self) -> T {
        self.track();
        self.inner.value.borrow().clone()
    }

    /// Get a copy of the current value without subscribing.
    pub fn get_untracked(&self) -> T {
        self.inner.value.borrow().clone()
    }
}

impl<T: Identity + 'static> Signal<T> {
    /// Store a new value and re-run every subscriber.
    ///
    /// Does nothing when `value` is identical to the stored one. If
    /// subscribers panic, the remaining ones still run (under the default
    /// [`PanicPolicy::Isolate`](super::PanicPolicy)) and the first panic is
    /// resumed once the wave is complete.
    pub fn set(&self, value: T) {
        if let Some(wave) = self.write(value) {
            wave.resume();
        }
    }

    /// Like [`set`](Self::set) but reports subscriber panics as an error.
    ///
    /// Returns the number of subscribers that were re-run.
    pub fn try_set(&self, value: T) -> Result<usize> {
        match self.write(value) {
            Some(wave) => wave.into_result(),
            None => Ok(0),
        }
    }

    fn write(&self, value: T) -> Option<super::subscriber::Propagation> {
        {
            let mut current = self.inner.value.borrow_mut();
            if current.is_identical(&value) {
                tracing::trace!(signal = self.inner.id, "identical value written, skipping");
                return None;
            }
            *current = value;
        }

        tracing::trace!(
            signal = self.inner.id,
            subscribers = self.inner.subscribers.len(),
            "signal changed"
        );
        Some(self.inner.subscribers.notify())
    }
}

impl<T: Clone + Identity + 'static> Signal<T> {
    /// Update the value using a function of the current one.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.inner.value.borrow());
        self.set(next);
    }

    /// Mutate a copy of the current value in place and store it.
    ///
    /// This is always one write, so subscribers run once.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut next = self.get_untracked();
        let result = f(&mut next);
        self.set(next);
        result
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Debug + 'static> Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("id", &self.id())
            .field("value", &self.get_untracked())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

/// Create a new source signal.
pub fn create_signal<T: 'static>(initial: T) -> Signal<T> {
    Signal::new(initial)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
