//! Disposal of effects and derived signals.
//!
//! Disposing a computation marks it stale. It never runs again, and every
//! signal it subscribed to forgets it the next time that signal changes.
//! Disposal is idempotent.

use super::derived::Derived;
use super::effect::Effect;

/// Something that can be stopped for good.
pub trait Dispose {
    /// Stop the computation. Calling this more than once has no effect.
    fn dispose(&self);

    /// Whether [`dispose`](Self::dispose) has been called.
    fn is_disposed(&self) -> bool;
}

impl Dispose for Effect {
    fn dispose(&self) {
        Effect::dispose(self);
    }

    fn is_disposed(&self) -> bool {
        Effect::is_disposed(self)
    }
}

impl<T: 'static> Dispose for Derived<T> {
    fn dispose(&self) {
        Derived::dispose(self);
    }

    fn is_disposed(&self) -> bool {
        Derived::is_disposed(self)
    }
}

impl<D: Dispose + ?Sized> Dispose for &D {
    fn dispose(&self) {
        (**self).dispose();
    }

    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }
}

/// Dispose a single effect or derived signal.
pub fn dispose(target: &dyn Dispose) {
    target.dispose();
}

/// Dispose every item, in order.
pub fn dispose_all<'a>(targets: impl IntoIterator<Item = &'a dyn Dispose>) {
    for target in targets {
        target.dispose();
    }
}

/// Dispose any number of effects and derived signals of mixed types.
///
/// ```rust
/// use tributary_core::dispose;
/// use tributary_core::reactive::{derive, Effect, Signal};
///
/// let count = Signal::new(1);
/// let source = count.clone();
/// let doubled = derive(move |_| source.get() * 2);
/// let effect = Effect::new(|| {});
///
/// dispose!(doubled, effect);
/// assert!(doubled.is_disposed() && effect.is_disposed());
/// ```
#[macro_export]
macro_rules! dispose {
    ($($target:expr),+ $(,)?) => {{
        $( $crate::reactive::Dispose::dispose(&$target); )+
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::{derive, Signal};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn dispose_stops_mixed_computations() {
        let signal = Signal::new(0);
        let runs = Rc::new(Cell::new(0));

        let (source, counter) = (signal.clone(), Rc::clone(&runs));
        let effect = Effect::new(move || {
            source.get();
            counter.set(counter.get() + 1);
        });
        let source = signal.clone();
        let derived = derive(move |_| source.get() + 1);

        dispose_all([&effect as &dyn Dispose, &derived as &dyn Dispose]);
        signal.set(5);

        assert_eq!(runs.get(), 1);
        assert_eq!(derived.get(), 1);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn dispose_is_idempotent() {
        let effect = Effect::new(|| {});
        dispose(&effect);
        dispose(&effect);
        assert!(Dispose::is_disposed(&effect));
    }

    #[test]
    fn macro_accepts_trailing_comma() {
        let first = Effect::new(|| {});
        let second = derive(|_| 3);
        crate::dispose!(first, second,);
        assert!(first.is_disposed());
        assert!(second.is_disposed());
    }
}
