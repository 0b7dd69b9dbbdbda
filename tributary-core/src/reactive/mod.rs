//! Reactive Primitives
//!
//! This module implements the core reactive system: signals, derived signals,
//! and effects. Everything else in the crate is built on top of these.
//!
//! # Concepts
//!
//! ## Signals
//!
//! A [`Signal`] is a container for mutable state. When a signal's value is
//! read within a tracking context (a derived signal or an effect), the signal
//! registers that context as a subscriber. When the value changes, every
//! subscriber re-runs before the write returns.
//!
//! ## Derived signals
//!
//! A [`Derived`] signal is a read-only value computed from other signals. It
//! recomputes when one of its dependencies changes and caches the result, so
//! reads are cheap. Derived signals can be read by other derived signals and
//! effects, forming arbitrarily deep graphs.
//!
//! ## Effects
//!
//! An [`Effect`] is a side-effecting computation that runs whenever its
//! dependencies change. Effects are used to synchronize reactive state with
//! the outside world, such as logging or updating a view.
//!
//! # Implementation Notes
//!
//! Dependencies are discovered automatically: a thread-local stack holds the
//! computation currently running, and every signal read consults it. This
//! approach (sometimes called "transparent reactivity") is used by SolidJS,
//! Vue 3, and Leptos.
//!
//! Propagation is synchronous and unbatched. A computation reading two
//! signals that are written one after the other runs twice and observes the
//! intermediate state in between.

mod context;
mod derived;
mod dispose;
mod effect;
mod identity;
mod runtime;
mod signal;
mod subscriber;
mod value;

pub use context::ReactiveContext;
pub use derived::{derive, Derived};
pub use dispose::{dispose, dispose_all, Dispose};
pub use effect::{create_effect, Effect};
pub use identity::Identity;
pub use runtime::{PanicPolicy, RuntimeConfig};
pub use signal::{create_signal, Signal};
pub use subscriber::SubscriberId;
pub use value::{non_signal, value, MaybeSignal, NonSignal, SignalKind};
