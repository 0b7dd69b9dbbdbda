//! Fluent Operations
//!
//! Building one derived signal per comparison gets noisy fast:
//! `a || b`, then `&& c`, then `!`, each wrapped in its own `derive`. An
//! [`Op`] accumulates the whole expression as a plain closure and only turns
//! it into a single derived signal at the end, with a terminal method such as
//! [`Op::result`], [`Op::truthy`] or [`Op::ternary`].
//!
//! ```rust
//! use tributary_core::combinators::op;
//! use tributary_core::reactive::Signal;
//!
//! let age = Signal::new(17_u32);
//! let has_consent = Signal::new(false);
//!
//! let allowed = op(&age).is_gte(18_u32).or(&has_consent).result();
//! assert!(!allowed.get());
//!
//! has_consent.set(true);
//! assert!(allowed.get());
//! ```
//!
//! Every operand is a [`MaybeSignal`], so signals, derived signals and plain
//! values can be mixed freely. Operands are read inside the final derived
//! signal, which therefore depends on every signal the expression touched on
//! its latest evaluation.

use std::ops::{Add, Div, Mul, Rem, Sub};
use std::rc::Rc;

use super::truthy::Truthy;
use crate::reactive::{derive, Derived, Identity, MaybeSignal};

/// An accumulated expression over signals and plain values.
pub struct Op<T> {
    evaluate: Rc<dyn Fn() -> T>,
}

/// Start an expression from a signal or plain value.
pub fn op<T: Clone + 'static>(input: impl Into<MaybeSignal<T>>) -> Op<T> {
    let input = input.into();
    Op::from_fn(move || input.value())
}

impl<T> Clone for Op<T> {
    fn clone(&self) -> Self {
        Self {
            evaluate: Rc::clone(&self.evaluate),
        }
    }
}

impl<T: 'static> Op<T> {
    /// Start an expression from an arbitrary closure.
    ///
    /// Signals read inside `f` become dependencies of the final result.
    pub fn from_fn(f: impl Fn() -> T + 'static) -> Self {
        Self { evaluate: Rc::new(f) }
    }

    /// Evaluate the expression once, without creating a derived signal.
    pub fn evaluate(&self) -> T {
        (self.evaluate)()
    }

    /// Transform the value of the expression.
    pub fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> Op<U> {
        let evaluate = Rc::clone(&self.evaluate);
        Op::from_fn(move || f(evaluate()))
    }

    /// A derived signal holding the value of the expression.
    pub fn result(&self) -> Derived<T>
    where
        T: Clone + Identity,
    {
        let evaluate = Rc::clone(&self.evaluate);
        derive(move |_| evaluate())
    }
}

// ----------------------------------------------------------------------------
// Terminals and boolean logic
// ----------------------------------------------------------------------------

impl<T: Truthy + 'static> Op<T> {
    /// `true` when the value is truthy.
    pub fn truthy(&self) -> Derived<bool> {
        self.map(|v| v.is_truthy()).result()
    }

    /// `true` when the value is falsy.
    pub fn falsy(&self) -> Derived<bool> {
        self.map(|v| v.is_falsy()).result()
    }

    /// `(truthy, falsy)` in one derived signal.
    pub fn truthy_falsy_pair(&self) -> Derived<(bool, bool)> {
        self.map(|v| {
            let truthy = v.is_truthy();
            (truthy, !truthy)
        })
        .result()
    }

    /// `if_truthy` when the value is truthy, `if_falsy` otherwise.
    ///
    /// Only the chosen branch is read, so only its signal is a dependency.
    pub fn ternary<R>(
        &self,
        if_truthy: impl Into<MaybeSignal<R>>,
        if_falsy: impl Into<MaybeSignal<R>>,
    ) -> Derived<R>
    where
        R: Clone + Identity + 'static,
    {
        let (if_truthy, if_falsy) = (if_truthy.into(), if_falsy.into());
        let evaluate = Rc::clone(&self.evaluate);
        derive(move |_| {
            if evaluate().is_truthy() {
                if_truthy.value()
            } else {
                if_falsy.value()
            }
        })
    }

    /// `self || other`.
    pub fn or<U>(&self, other: impl Into<MaybeSignal<U>>) -> Op<bool>
    where
        U: Truthy + Clone + 'static,
    {
        let other = other.into();
        self.map(move |v| v.is_truthy() || other.value().is_truthy())
    }

    /// `self || !other`.
    pub fn or_not<U>(&self, other: impl Into<MaybeSignal<U>>) -> Op<bool>
    where
        U: Truthy + Clone + 'static,
    {
        let other = other.into();
        self.map(move |v| v.is_truthy() || other.value().is_falsy())
    }

    /// `self && other`.
    pub fn and<U>(&self, other: impl Into<MaybeSignal<U>>) -> Op<bool>
    where
        U: Truthy + Clone + 'static,
    {
        let other = other.into();
        self.map(move |v| v.is_truthy() && other.value().is_truthy())
    }

    /// `self && !other`.
    pub fn and_not<U>(&self, other: impl Into<MaybeSignal<U>>) -> Op<bool>
    where
        U: Truthy + Clone + 'static,
    {
        let other = other.into();
        self.map(move |v| v.is_truthy() && other.value().is_falsy())
    }

    fn or_with<U, C>(&self, subject: MaybeSignal<U>, compare: MaybeSignal<U>, check: C) -> Op<bool>
    where
        U: Clone + 'static,
        C: Fn(&U, &U) -> bool + 'static,
    {
        self.map(move |v| v.is_truthy() || check(&subject.value(), &compare.value()))
    }

    fn and_with<U, C>(&self, subject: MaybeSignal<U>, compare: MaybeSignal<U>, check: C) -> Op<bool>
    where
        U: Clone + 'static,
        C: Fn(&U, &U) -> bool + 'static,
    {
        self.map(move |v| v.is_truthy() && check(&subject.value(), &compare.value()))
    }
}

macro_rules! comparison_chain {
    ($($(#[$doc:meta])* $name:ident => $combine:ident, $bound:ident, $check:expr;)*) => {
        impl<T: Truthy + 'static> Op<T> {
            $(
                $(#[$doc])*
                pub fn $name<U>(
                    &self,
                    subject: impl Into<MaybeSignal<U>>,
                    compare: impl Into<MaybeSignal<U>>,
                ) -> Op<bool>
                where
                    U: $bound + Clone + 'static,
                {
                    self.$combine(subject.into(), compare.into(), $check)
                }
            )*
        }
    };
}

comparison_chain! {
    /// `self || subject == compare`.
    or_both_equal => or_with, PartialEq, |a: &U, b: &U| a == b;
    /// `self || subject != compare`.
    or_both_unequal => or_with, PartialEq, |a: &U, b: &U| a != b;
    /// `self && subject == compare`.
    and_both_equal => and_with, PartialEq, |a: &U, b: &U| a == b;
    /// `self && subject != compare`.
    and_both_unequal => and_with, PartialEq, |a: &U, b: &U| a != b;
    /// `self || subject < compare`.
    or_this_is_lt => or_with, PartialOrd, |a: &U, b: &U| a < b;
    /// `self || subject <= compare`.
    or_this_is_lte => or_with, PartialOrd, |a: &U, b: &U| a <= b;
    /// `self || subject > compare`.
    or_this_is_gt => or_with, PartialOrd, |a: &U, b: &U| a > b;
    /// `self || subject >= compare`.
    or_this_is_gte => or_with, PartialOrd, |a: &U, b: &U| a >= b;
    /// `self && subject < compare`.
    and_this_is_lt => and_with, PartialOrd, |a: &U, b: &U| a < b;
    /// `self && subject <= compare`.
    and_this_is_lte => and_with, PartialOrd, |a: &U, b: &U| a <= b;
    /// `self && subject > compare`.
    and_this_is_gt => and_with, PartialOrd, |a: &U, b: &U| a > b;
    /// `self && subject >= compare`.
    and_this_is_gte => and_with, PartialOrd, |a: &U, b: &U| a >= b;
}

// ----------------------------------------------------------------------------
// Equality and ordering
// ----------------------------------------------------------------------------

impl<T: Clone + PartialEq + 'static> Op<T> {
    /// `self == other`.
    pub fn equals(&self, other: impl Into<MaybeSignal<T>>) -> Op<bool> {
        let other = other.into();
        self.map(move |v| v == other.value())
    }

    /// `self != other`.
    pub fn not_equals(&self, other: impl Into<MaybeSignal<T>>) -> Op<bool> {
        let other = other.into();
        self.map(move |v| v != other.value())
    }
}

impl<T: Clone + PartialOrd + 'static> Op<T> {
    /// `lower <= self <= upper`.
    pub fn is_between(
        &self,
        lower: impl Into<MaybeSignal<T>>,
        upper: impl Into<MaybeSignal<T>>,
    ) -> Op<bool> {
        let (lower, upper) = (lower.into(), upper.into());
        self.map(move |v| lower.value() <= v && v <= upper.value())
    }

    pub fn is_lt(&self, other: impl Into<MaybeSignal<T>>) -> Op<bool> {
        let other = other.into();
        self.map(move |v| v < other.value())
    }

    pub fn is_lte(&self, other: impl Into<MaybeSignal<T>>) -> Op<bool> {
        let other = other.into();
        self.map(move |v| v <= other.value())
    }

    pub fn is_gt(&self, other: impl Into<MaybeSignal<T>>) -> Op<bool> {
        let other = other.into();
        self.map(move |v| v > other.value())
    }

    pub fn is_gte(&self, other: impl Into<MaybeSignal<T>>) -> Op<bool> {
        let other = other.into();
        self.map(move |v| v >= other.value())
    }
}

// ----------------------------------------------------------------------------
// Arithmetic
// ----------------------------------------------------------------------------

macro_rules! arithmetic {
    ($($name:ident => $trait:ident :: $method:ident;)*) => {
        impl<T: Clone + 'static> Op<T> {
            $(
                pub fn $name(&self, other: impl Into<MaybeSignal<T>>) -> Op<T>
                where
                    T: $trait<Output = T>,
                {
                    let other = other.into();
                    self.map(move |v| $trait::$method(v, other.value()))
                }
            )*
        }
    };
}

arithmetic! {
    add => Add::add;
    sub => Sub::sub;
    mul => Mul::mul;
    div => Div::div;
    rem => Rem::rem;
}

// ----------------------------------------------------------------------------
// Length
// ----------------------------------------------------------------------------

/// Values with a length: strings count characters, collections count items.
pub trait Length {
    fn length(&self) -> usize;
}

impl Length for str {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl Length for String {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl<T> Length for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Length for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Length for std::collections::VecDeque<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V> Length for std::collections::BTreeMap<K, V> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Length for std::collections::HashMap<K, V, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T: Length + ?Sized> Length for &T {
    fn length(&self) -> usize {
        (**self).length()
    }
}

impl<T: Length + 'static> Op<T> {
    /// `lower <= len <= upper`.
    pub fn length_between(
        &self,
        lower: impl Into<MaybeSignal<usize>>,
        upper: impl Into<MaybeSignal<usize>>,
    ) -> Op<bool> {
        let (lower, upper) = (lower.into(), upper.into());
        self.map(move |v| {
            let len = v.length();
            lower.value() <= len && len <= upper.value()
        })
    }

    pub fn length_equals(&self, other: impl Into<MaybeSignal<usize>>) -> Op<bool> {
        let other = other.into();
        self.map(move |v| v.length() == other.value())
    }

    pub fn length_not_equals(&self, other: impl Into<MaybeSignal<usize>>) -> Op<bool> {
        let other = other.into();
        self.map(move |v| v.length() != other.value())
    }

    pub fn length_lt(&self, other: impl Into<MaybeSignal<usize>>) -> Op<bool> {
        let other = other.into();
        self.map(move |v| v.length() < other.value())
    }

    pub fn length_lte(&self, other: impl Into<MaybeSignal<usize>>) -> Op<bool> {
        let other = other.into();
        self.map(move |v| v.length() <= other.value())
    }

    pub fn length_gt(&self, other: impl Into<MaybeSignal<usize>>) -> Op<bool> {
        let other = other.into();
        self.map(move |v| v.length() > other.value())
    }

    pub fn length_gte(&self, other: impl Into<MaybeSignal<usize>>) -> Op<bool> {
        let other = other.into();
        self.map(move |v| v.length() >= other.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Signal;

    #[test]
    fn chained_logic_resolves_to_one_derived_signal() {
        let flag = Signal::new(true);
        let not_flag = op(&flag).falsy();

        let either = op(&flag).or(&not_flag).result();
        let both = op(&flag).and(&not_flag).result();
        assert!(either.get());
        assert!(!both.get());

        flag.set(false);
        assert!(either.get());
        assert!(!both.get());
        assert!(not_flag.get());
    }

    #[test]
    fn negated_operands() {
        let a = Signal::new(0_i32);
        let b = Signal::new(String::new());

        assert!(op(&a).or_not(&b).result().get());
        assert!(!op(&a).and_not(&b).result().get());

        a.set(3);
        b.set("set".to_string());
        assert!(op(&a).or_not(&b).result().get());
        assert!(!op(&a).and_not(&b).result().get());
    }

    #[test]
    fn equality_and_comparisons_track_signals() {
        let score = Signal::new(40_i32);
        let passed = op(&score).is_gte(50_i32).result();
        let exact = op(&score).equals(40_i32).result();
        let in_band = op(&score).is_between(30_i32, 45_i32).result();

        assert!(!passed.get());
        assert!(exact.get());
        assert!(in_band.get());

        score.set(55);
        assert!(passed.get());
        assert!(!exact.get());
        assert!(!in_band.get());
        assert!(op(&score).not_equals(40_i32).evaluate());
        assert!(op(&score).is_lt(60_i32).evaluate());
        assert!(!op(&score).is_lte(54_i32).evaluate());
        assert!(op(&score).is_gt(54_i32).evaluate());
    }

    #[test]
    fn both_equal_and_this_is_chains() {
        let left = Signal::new(2_i32);
        let right = Signal::new(2_i32);

        let any = op(false).or_both_equal(&left, &right).result();
        let all = op(true).and_both_unequal(&left, &right).result();
        assert!(any.get());
        assert!(!all.get());

        right.set(3);
        assert!(!any.get());
        assert!(all.get());

        assert!(op(false).or_this_is_lt(&left, &right).evaluate());
        assert!(op(true).and_this_is_lte(&left, &right).evaluate());
        assert!(!op(false).or_this_is_gt(&left, &right).evaluate());
        assert!(!op(true).and_this_is_gte(&left, &right).evaluate());
        assert!(op(false).or_both_unequal(&left, &right).evaluate());
        assert!(!op(true).and_both_equal(&left, &right).evaluate());
        assert!(op(true).or_this_is_gte(&left, &right).evaluate());
        assert!(!op(false).and_this_is_lt(&left, &right).evaluate());
        assert!(!op(false).or_this_is_lte(&right, &left).evaluate());
        assert!(op(true).and_this_is_gt(&right, &left).evaluate());
    }

    #[test]
    fn arithmetic_composes() {
        let base = Signal::new(10_i32);
        let total = op(&base).add(5_i32).mul(2_i32).sub(1_i32).result();
        assert_eq!(total.get(), 29);

        base.set(0);
        assert_eq!(total.get(), 9);

        assert_eq!(op(17_i32).div(5_i32).evaluate(), 3);
        assert_eq!(op(17_i32).rem(5_i32).evaluate(), 2);
    }

    #[test]
    fn ternary_reads_only_the_chosen_branch() {
        let cond = Signal::new(true);
        let yes = Signal::new("yes".to_string());
        let no = Signal::new("no".to_string());

        let label = op(&cond).ternary(&yes, &no);
        assert_eq!(label.get(), "yes");
        assert_eq!(label.dependency_count(), 2);

        no.set("nope".to_string());
        assert_eq!(label.run_count(), 1);

        cond.set(false);
        assert_eq!(label.get(), "nope");
    }

    #[test]
    fn truthy_falsy_pair() {
        let text = Signal::new(String::new());
        let pair = op(&text).truthy_falsy_pair();
        assert_eq!(pair.get(), (false, true));

        text.set("x".to_string());
        assert_eq!(pair.get(), (true, false));
        assert!(op(&text).truthy().get());
    }

    #[test]
    fn length_checks() {
        let name = Signal::new("ab".to_string());
        let valid = op(&name).length_between(3_usize, 10_usize).result();
        assert!(!valid.get());

        name.set("abcd".to_string());
        assert!(valid.get());

        let items = op(vec![1, 2, 3]);
        assert!(items.length_equals(3_usize).evaluate());
        assert!(items.length_not_equals(2_usize).evaluate());
        assert!(items.length_lt(4_usize).evaluate());
        assert!(items.length_lte(3_usize).evaluate());
        assert!(items.length_gt(2_usize).evaluate());
        assert!(items.length_gte(3_usize).evaluate());
    }

    #[test]
    fn from_fn_tracks_reads_inside_the_closure() {
        let a = Signal::new(1_i32);
        let source = a.clone();
        let doubled = Op::from_fn(move || source.get() * 2).result();

        a.set(4);
        assert_eq!(doubled.get(), 8);
    }
}
