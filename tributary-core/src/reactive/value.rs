//! Value Extraction
//!
//! Combinators accept "a signal or a plain value" and need the plain value
//! out of it. [`MaybeSignal`] is that argument type, and [`value`] unwraps
//! it:
//!
//! - a source or derived signal is read with `get`, which subscribes the
//!   running computation, if any;
//! - a [`NonSignal`] is unwrapped without subscribing anything;
//! - a plain value is returned as is.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::rc::Rc;

use super::derived::Derived;
use super::signal::Signal;

/// A plain value explicitly marked as "not a signal".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NonSignal<T>(T);

impl<T> NonSignal<T> {
    /// Wrap a plain value.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Unwrap the value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Clone> NonSignal<T> {
    /// A copy of the wrapped value.
    pub fn value(&self) -> T {
        self.0.clone()
    }
}

impl<T> AsRef<T> for NonSignal<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

/// Wrap a plain value as a [`NonSignal`].
pub fn non_signal<T>(value: T) -> NonSignal<T> {
    NonSignal::new(value)
}

/// Discriminator of a [`MaybeSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Plain,
    NonSignal,
    Source,
    Derived,
}

/// A signal, a wrapped non-signal, or a plain value.
pub enum MaybeSignal<T> {
    Plain(T),
    NonSignal(NonSignal<T>),
    Source(Signal<T>),
    Derived(Derived<T>),
}

impl<T> MaybeSignal<T> {
    /// Which variant this is.
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::Plain(_) => SignalKind::Plain,
            Self::NonSignal(_) => SignalKind::NonSignal,
            Self::Source(_) => SignalKind::Source,
            Self::Derived(_) => SignalKind::Derived,
        }
    }

    /// Whether this is a source or derived signal.
    pub fn is_signal(&self) -> bool {
        matches!(self, Self::Source(_) | Self::Derived(_))
    }
}

impl<T: Clone + 'static> MaybeSignal<T> {
    /// The plain value. Signals are read with dependency tracking.
    pub fn value(&self) -> T {
        match self {
            Self::Plain(value) => value.clone(),
            Self::NonSignal(wrapped) => wrapped.value(),
            Self::Source(signal) => signal.get(),
            Self::Derived(derived) => derived.get(),
        }
    }

    /// The plain value without dependency tracking.
    pub fn value_untracked(&self) -> T {
        match self {
            Self::Plain(value) => value.clone(),
            Self::NonSignal(wrapped) => wrapped.value(),
            Self::Source(signal) => signal.get_untracked(),
            Self::Derived(derived) => derived.get_untracked(),
        }
    }
}

/// Extract the plain value out of a [`MaybeSignal`].
///
/// Reading a signal here subscribes the running computation, exactly as
/// calling `get` would.
pub fn value<T: Clone + 'static>(input: &MaybeSignal<T>) -> T {
    input.value()
}

impl<T: Clone> Clone for MaybeSignal<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain(value) => Self::Plain(value.clone()),
            Self::NonSignal(wrapped) => Self::NonSignal(wrapped.clone()),
            Self::Source(signal) => Self::Source(signal.clone()),
            Self::Derived(derived) => Self::Derived(derived.clone()),
        }
    }
}

impl<T: Clone + Debug + 'static> Debug for MaybeSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaybeSignal")
            .field("kind", &self.kind())
            .field("value", &self.value_untracked())
            .finish()
    }
}

impl<T: Default> Default for MaybeSignal<T> {
    fn default() -> Self {
        Self::Plain(T::default())
    }
}

impl<T> From<NonSignal<T>> for MaybeSignal<T> {
    fn from(value: NonSignal<T>) -> Self {
        Self::NonSignal(value)
    }
}

impl<T> From<Signal<T>> for MaybeSignal<T> {
    fn from(signal: Signal<T>) -> Self {
        Self::Source(signal)
    }
}

impl<T> From<&Signal<T>> for MaybeSignal<T> {
    fn from(signal: &Signal<T>) -> Self {
        Self::Source(signal.clone())
    }
}

impl<T> From<Derived<T>> for MaybeSignal<T> {
    fn from(derived: Derived<T>) -> Self {
        Self::Derived(derived)
    }
}

impl<T> From<&Derived<T>> for MaybeSignal<T> {
    fn from(derived: &Derived<T>) -> Self {
        Self::Derived(derived.clone())
    }
}

impl From<&str> for MaybeSignal<String> {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

// Plain values convert per type rather than through a blanket `From<T>`,
// which would make `MaybeSignal::from(&signal)` ambiguous. Other types use
// `MaybeSignal::Plain` or `non_signal`.
macro_rules! plain_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for MaybeSignal<$ty> {
                fn from(value: $ty) -> Self {
                    Self::Plain(value)
                }
            }
        )*
    };
}

plain_from!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    serde_json::Value,
);

macro_rules! plain_from_generic {
    ($($ty:ident < $($param:ident),+ >),* $(,)?) => {
        $(
            impl<$($param),+> From<$ty<$($param),+>> for MaybeSignal<$ty<$($param),+>> {
                fn from(value: $ty<$($param),+>) -> Self {
                    Self::Plain(value)
                }
            }
        )*
    };
}

plain_from_generic!(
    Option<T>,
    Vec<T>,
    VecDeque<T>,
    Rc<T>,
    BTreeSet<T>,
    HashSet<T>,
    BTreeMap<K, V>,
    HashMap<K, V>,
);
