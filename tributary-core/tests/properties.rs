//! Property-based invariant tests for the reactive engine.
//!
//! 1. Identical writes never re-run subscribers
//! 2. Equal but distinct collections always propagate
//! 3. Reads are independent copies
//! 4. A computation re-runs once per distinct write and never for unread signals
//! 5. Derived chains are up to date as soon as `set` returns
//! 6. `prev_value` trails `get` by one step for a counter
//! 7. Cycles fail with a depth error for any positive depth limit

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use tributary_core::reactive::{derive, Effect, RuntimeConfig, Signal};
use tributary_core::ReactiveError;

// ── Helpers ──────────────────────────────────────────────────────────

fn watch<T: Clone + 'static>(signal: &Signal<T>) -> (Effect, Rc<Cell<usize>>) {
    let runs = Rc::new(Cell::new(0));
    let (signal_clone, counter) = (signal.clone(), Rc::clone(&runs));
    let effect = Effect::new(move || {
        signal_clone.get();
        counter.set(counter.get() + 1);
    });
    (effect, runs)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Identity no-op
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn identical_writes_are_skipped(initial in any::<i64>(), repeats in 1usize..10) {
        let signal = Signal::new(initial);
        let (_effect, runs) = watch(&signal);

        for _ in 0..repeats {
            signal.set(initial);
        }
        prop_assert_eq!(runs.get(), 1);
    }

    #[test]
    fn identical_strings_are_skipped(text in ".{0,16}") {
        let signal = Signal::new(text.clone());
        let (_effect, runs) = watch(&signal);

        signal.set(text);
        prop_assert_eq!(runs.get(), 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Deep-equal but distinct values propagate
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn equal_vectors_still_propagate(items in proptest::collection::vec(any::<i32>(), 0..20)) {
        let signal = Signal::new(items.clone());
        let (_effect, runs) = watch(&signal);

        signal.set(items.clone());
        prop_assert_eq!(runs.get(), 2);
        prop_assert_eq!(signal.get(), items);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Read isolation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mutating_a_read_never_leaks(
        items in proptest::collection::vec(any::<u8>(), 0..20),
        extra in any::<u8>(),
    ) {
        let signal = Signal::new(items.clone());

        let mut first = signal.get();
        first.push(extra);
        first.reverse();

        prop_assert_eq!(signal.get(), items);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Dependency auto-registration
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reruns_once_per_distinct_write(writes in proptest::collection::vec(any::<i16>(), 0..30)) {
        let read = Signal::new(i16::MIN);
        let unread = Signal::new(0_i16);
        let (_effect, runs) = watch(&read);

        let mut expected = 1;
        let mut current = i16::MIN;
        for w in writes {
            read.set(w);
            unread.set(w);
            if w != current {
                expected += 1;
                current = w;
            }
        }
        prop_assert_eq!(runs.get(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Derived chaining
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn chain_is_current_after_set(start in -1000i64..1000, length in 1usize..12, next in -1000i64..1000) {
        let source = Signal::new(start);
        let source_clone = source.clone();
        let mut tail = derive(move |_| source_clone.get() + 1);
        for _ in 1..length {
            let previous = tail.clone();
            tail = derive(move |_| previous.get() + 1);
        }
        prop_assert_eq!(tail.get(), start + length as i64);

        source.set(next);
        prop_assert_eq!(tail.get(), next + length as i64);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. prev_value semantics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn counter_prev_trails_value(changes in 1u32..40) {
        let trigger = Signal::new(0_u32);
        let trigger_clone = trigger.clone();
        let counter = derive(move |previous: Option<u32>| {
            trigger_clone.get();
            previous.unwrap_or(0) + 1
        });

        for step in 1..=changes {
            trigger.set(step);
        }

        prop_assert_eq!(counter.get(), changes + 1);
        prop_assert_eq!(counter.prev_value(), Some(counter.get() - 1));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Cycles fail loudly
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn self_feeding_derived_fails_with_depth_error(limit in 4usize..64) {
        let source = Signal::new(0_u64);
        let source_clone = source.clone();
        let _runaway = derive(move |_| {
            let v = source_clone.get();
            if v > 0 {
                source_clone.set(v + 1);
            }
            v
        });

        let config = RuntimeConfig { max_propagation_depth: limit, ..RuntimeConfig::default() };
        let outcome = config.scoped(|| source.try_set(1)).unwrap();

        let failed_on_depth = matches!(
            outcome,
            Err(ReactiveError::SubscriberPanicked { ref message, .. }) if message.contains("depth")
        );
        prop_assert!(failed_on_depth);
    }
}
