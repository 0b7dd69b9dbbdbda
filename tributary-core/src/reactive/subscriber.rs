//! Subscriber types for the reactive system.
//!
//! A [`Computation`] is any body that re-runs when the signals it read
//! change: the updater of a derived signal or an ad-hoc effect. Signals keep
//! their subscribers in a [`Subscribers`] set of weak references; the
//! effect or derived signal that created a computation is its only owner.
//!
//! Under [`PanicPolicy::Isolate`] a panicking body is logged and counted by
//! the wave that ran it. When an enclosing computation re-raises that panic
//! through its own write, the payload travels up wrapped in
//! `ReportedPanic`, so outer waves pass it on without logging or counting
//! it again. The outermost `set` receives the original payload.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use smallvec::SmallVec;

use super::context::ReactiveContext;
use super::runtime::{DepthGuard, PanicPolicy, RuntimeConfig};
use crate::error::{panic_message, ReactiveError};

/// Unique identifier for a subscriber.
///
/// Each computation gets a unique ID when created. Subscriber sets are keyed
/// by it, which makes re-registration during a run idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Generate a new unique subscriber ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

/// A re-runnable body plus its disposal flag and the subscriber sets it
/// joined on its latest run.
pub(crate) struct Computation {
    id: SubscriberId,
    body: Box<dyn Fn()>,
    disposed: Cell<bool>,
    /// Subscriber sets this computation registered into on its last run.
    sources: RefCell<SmallVec<[Weak<Subscribers>; 4]>>,
    run_count: Cell<usize>,
    /// Runs of this computation currently on the stack.
    active_runs: Cell<usize>,
}

impl Computation {
    /// Wrap `body` without running it.
    pub(crate) fn new(body: impl Fn() + 'static) -> Rc<Self> {
        Rc::new(Self {
            id: SubscriberId::new(),
            body: Box::new(body),
            disposed: Cell::new(false),
            sources: RefCell::new(SmallVec::new()),
            run_count: Cell::new(0),
            active_runs: Cell::new(0),
        })
    }

    pub(crate) fn id(&self) -> SubscriberId {
        self.id
    }

    /// Run the body with this computation as the current context.
    ///
    /// Subscriptions from the previous run are dropped first, so afterwards
    /// the computation is registered exactly with the signals this run read.
    /// A disposed computation never runs. A run that starts while this
    /// computation is already running past the configured depth panics.
    pub(crate) fn run(self: &Rc<Self>) {
        if self.is_disposed() {
            return;
        }

        let _depth = DepthGuard::enter(&self.active_runs);
        self.detach();

        let _ctx = ReactiveContext::enter(Rc::clone(self));
        self.run_count.set(self.run_count.get() + 1);
        (self.body)();
    }

    /// Mark the computation stale. Subscriber sets drop it lazily.
    pub(crate) fn dispose(&self) {
        if !self.disposed.replace(true) {
            tracing::debug!(subscriber = ?self.id, "computation disposed");
        }
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    pub(crate) fn run_count(&self) -> usize {
        self.run_count.get()
    }

    /// Number of live signals this computation read on its last run.
    pub(crate) fn source_count(&self) -> usize {
        self.sources
            .borrow()
            .iter()
            .filter(|source| source.strong_count() > 0)
            .count()
    }

    fn record_source(&self, subscribers: &Rc<Subscribers>) {
        self.sources.borrow_mut().push(Rc::downgrade(subscribers));
    }

    fn detach(&self) {
        let sources = std::mem::take(&mut *self.sources.borrow_mut());
        for source in sources {
            if let Some(source) = source.upgrade() {
                source.remove(self.id);
            }
        }
    }
}

/// The subscriber set of one signal.
pub(crate) struct Subscribers {
    entries: RefCell<IndexMap<SubscriberId, Weak<Computation>>>,
}

impl Subscribers {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            entries: RefCell::new(IndexMap::new()),
        })
    }

    /// Number of entries, including stale ones not pruned yet.
    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Register the computation of the current context, if any.
    pub(crate) fn track_current(self: &Rc<Self>) {
        let Some(computation) = ReactiveContext::current() else {
            return;
        };

        let inserted = {
            let mut entries = self.entries.borrow_mut();
            if entries.contains_key(&computation.id()) {
                false
            } else {
                entries.insert(computation.id(), Rc::downgrade(&computation));
                true
            }
        };

        if inserted {
            computation.record_source(self);
        }
    }

    fn remove(&self, id: SubscriberId) {
        // Order carries no meaning, so the O(1) removal is fine.
        self.entries.borrow_mut().swap_remove(&id);
    }

    fn contains(&self, id: SubscriberId) -> bool {
        self.entries.borrow().contains_key(&id)
    }

    /// Re-run every live subscriber, pruning disposed and dropped ones.
    ///
    /// Iterates a snapshot: computations that join during the wave are
    /// picked up by the next write, and computations that stopped reading
    /// this signal earlier in the wave are skipped.
    pub(crate) fn notify(&self) -> Propagation {
        let _wave = WaveGuard::enter();
        let snapshot: Vec<(SubscriberId, Weak<Computation>)> = self
            .entries
            .borrow()
            .iter()
            .map(|(id, computation)| (*id, computation.clone()))
            .collect();

        let policy = RuntimeConfig::current().panic_policy;
        let mut wave = Propagation::default();

        for (id, computation) in snapshot {
            let Some(computation) = computation.upgrade() else {
                tracing::debug!(subscriber = ?id, "pruning dropped subscriber");
                self.remove(id);
                continue;
            };

            if computation.is_disposed() {
                tracing::debug!(subscriber = ?id, "pruning disposed subscriber");
                self.remove(id);
                continue;
            }

            if !self.contains(id) {
                continue;
            }

            wave.notified += 1;
            match policy {
                PanicPolicy::Abort => computation.run(),
                PanicPolicy::Isolate => {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| computation.run()));
                    if let Err(payload) = outcome {
                        wave.record_panic(id, payload);
                    }
                }
            }
        }

        wave
    }
}

thread_local! {
    /// Notification waves currently running on this thread.
    static ACTIVE_WAVES: Cell<usize> = const { Cell::new(0) };
}

struct WaveGuard;

impl WaveGuard {
    fn enter() -> Self {
        ACTIVE_WAVES.with(|waves| waves.set(waves.get() + 1));
        Self
    }

    fn is_active() -> bool {
        ACTIVE_WAVES.with(Cell::get) > 0
    }
}

impl Drop for WaveGuard {
    fn drop(&mut self) {
        ACTIVE_WAVES.with(|waves| waves.set(waves.get().saturating_sub(1)));
    }
}

/// A panic that an inner wave already logged, re-raised through an
/// enclosing computation.
struct ReportedPanic {
    payload: Box<dyn Any + Send>,
    failed: usize,
}

/// Outcome of one notification wave.
#[derive(Default)]
pub(crate) struct Propagation {
    pub(crate) notified: usize,
    pub(crate) failed: usize,
    pub(crate) first_panic: Option<Box<dyn Any + Send>>,
}

impl Propagation {
    fn record_panic(&mut self, id: SubscriberId, payload: Box<dyn Any + Send>) {
        match payload.downcast::<ReportedPanic>() {
            Ok(reported) => {
                self.failed += reported.failed;
                self.first_panic.get_or_insert(reported.payload);
            }
            Err(payload) => {
                tracing::error!(
                    subscriber = ?id,
                    message = %panic_message(payload.as_ref()),
                    "subscriber panicked during propagation"
                );
                self.failed += 1;
                self.first_panic.get_or_insert(payload);
            }
        }
    }

    /// Report the first panic as an error.
    pub(crate) fn into_result(self) -> Result<usize, ReactiveError> {
        match self.first_panic {
            None => Ok(self.notified),
            Some(payload) => Err(ReactiveError::SubscriberPanicked {
                failed: self.failed,
                notified: self.notified,
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    /// Re-raise the first panic, if any.
    ///
    /// Inside an enclosing wave the payload is marked as reported; at the
    /// top level the original payload is resumed.
    pub(crate) fn resume(self) -> usize {
        if let Some(payload) = self.first_panic {
            if WaveGuard::is_active() {
                panic::resume_unwind(Box::new(ReportedPanic {
                    payload,
                    failed: self.failed,
                }));
            }
            panic::resume_unwind(payload);
        }
        self.notified
    }
}
