//! Traps: ready-made derived transforms per value type.
//!
//! [`trap`] wraps a signal or plain value; the methods available on the
//! returned [`Trap`] depend on the wrapped type (numbers, strings, vectors,
//! maps). Every method returns a new derived signal that follows the input.
//!
//! ```rust
//! use tributary_core::combinators::trap;
//! use tributary_core::reactive::Signal;
//!
//! let title = Signal::new("  hello world ".to_string());
//! let heading = trap(&title).trim();
//! let words = trap(&heading).split(" ");
//!
//! assert_eq!(heading.get(), "hello world");
//! assert_eq!(words.get(), vec!["hello", "world"]);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::Hash;
use std::rc::Rc;

use super::truthy::Truthy;
use crate::reactive::{derive, Derived, Identity, MaybeSignal};

/// A signal or plain value, trapped for transforms.
pub struct Trap<T> {
    input: MaybeSignal<T>,
}

/// Trap a signal or plain value.
pub fn trap<T>(input: impl Into<MaybeSignal<T>>) -> Trap<T> {
    Trap {
        input: input.into(),
    }
}

impl<T: Clone> Clone for Trap<T> {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
        }
    }
}

impl<T: Clone + 'static> Trap<T> {
    fn derive_with<R>(&self, f: impl Fn(T) -> R + 'static) -> Derived<R>
    where
        R: Clone + Identity + 'static,
    {
        let input = self.input.clone();
        derive(move |_| f(input.value()))
    }

    /// The value rendered with `Display`.
    pub fn string(&self) -> Derived<String>
    where
        T: Display,
    {
        self.derive_with(|v| v.to_string())
    }

    /// The value when truthy, otherwise `fallback`.
    pub fn or(&self, fallback: impl Into<MaybeSignal<T>>) -> Derived<T>
    where
        T: Truthy + Identity,
    {
        let fallback = fallback.into();
        self.derive_with(move |v| if v.is_truthy() { v } else { fallback.value() })
    }
}

// ----------------------------------------------------------------------------
// Numbers
// ----------------------------------------------------------------------------

impl<T: Clone + PartialOrd + Identity + 'static> Trap<T> {
    /// The value clamped into `start..=end`.
    pub fn to_confined(
        &self,
        start: impl Into<MaybeSignal<T>>,
        end: impl Into<MaybeSignal<T>>,
    ) -> Derived<T> {
        let (start, end) = (start.into(), end.into());
        self.derive_with(move |v| {
            let (start, end) = (start.value(), end.value());
            if v < start {
                start
            } else if v > end {
                end
            } else {
                v
            }
        })
    }
}

impl<T: Clone + Into<f64> + 'static> Trap<T> {
    /// Fixed-point notation with `digits` decimals.
    pub fn to_fixed(&self, digits: impl Into<MaybeSignal<usize>>) -> Derived<String> {
        let digits = digits.into();
        self.derive_with(move |v| format!("{:.*}", digits.value(), Into::<f64>::into(v)))
    }

    /// Exponential notation with `digits` decimals, e.g. `1.50e+3`.
    pub fn to_exponential(&self, digits: impl Into<MaybeSignal<usize>>) -> Derived<String> {
        let digits = digits.into();
        self.derive_with(move |v| {
            let formatted = format!("{:.*e}", digits.value(), Into::<f64>::into(v));
            match formatted.split_once('e') {
                Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                    format!("{mantissa}e+{exponent}")
                }
                _ => formatted,
            }
        })
    }
}

// ----------------------------------------------------------------------------
// Strings
// ----------------------------------------------------------------------------

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn pad(text: &str, target: usize, fill: &str, at_start: bool) -> String {
    let len = text.chars().count();
    if target <= len || fill.is_empty() {
        return text.to_string();
    }
    let padding: String = fill.chars().cycle().take(target - len).collect();
    if at_start {
        padding + text
    } else {
        text.to_string() + &padding
    }
}

impl Trap<String> {
    /// Number of characters.
    pub fn length(&self) -> Derived<usize> {
        self.derive_with(|s| s.chars().count())
    }

    pub fn lower_case(&self) -> Derived<String> {
        self.derive_with(|s| s.to_lowercase())
    }

    pub fn upper_case(&self) -> Derived<String> {
        self.derive_with(|s| s.to_uppercase())
    }

    /// First character upper case, the rest lower case.
    pub fn sentence_case(&self) -> Derived<String> {
        self.derive_with(|s| capitalize(&s))
    }

    /// Every space-separated word capitalized.
    pub fn title_case(&self) -> Derived<String> {
        self.derive_with(|s| s.split(' ').map(capitalize).collect::<Vec<_>>().join(" "))
    }

    pub fn trim(&self) -> Derived<String> {
        self.derive_with(|s| s.trim().to_string())
    }

    pub fn trim_start(&self) -> Derived<String> {
        self.derive_with(|s| s.trim_start().to_string())
    }

    pub fn trim_end(&self) -> Derived<String> {
        self.derive_with(|s| s.trim_end().to_string())
    }

    pub fn starts_with(&self, prefix: impl Into<MaybeSignal<String>>) -> Derived<bool> {
        let prefix = prefix.into();
        self.derive_with(move |s| s.starts_with(prefix.value().as_str()))
    }

    pub fn ends_with(&self, suffix: impl Into<MaybeSignal<String>>) -> Derived<bool> {
        let suffix = suffix.into();
        self.derive_with(move |s| s.ends_with(suffix.value().as_str()))
    }

    pub fn includes(&self, needle: impl Into<MaybeSignal<String>>) -> Derived<bool> {
        let needle = needle.into();
        self.derive_with(move |s| s.contains(needle.value().as_str()))
    }

    /// Split on `separator`. An empty separator splits into characters.
    pub fn split(&self, separator: impl Into<MaybeSignal<String>>) -> Derived<Vec<String>> {
        let separator = separator.into();
        self.derive_with(move |s| {
            let separator = separator.value();
            if separator.is_empty() {
                s.chars().map(String::from).collect()
            } else {
                s.split(separator.as_str()).map(str::to_string).collect()
            }
        })
    }

    /// Replace the first occurrence of `from` with `to`.
    pub fn replace(
        &self,
        from: impl Into<MaybeSignal<String>>,
        to: impl Into<MaybeSignal<String>>,
    ) -> Derived<String> {
        let (from, to) = (from.into(), to.into());
        self.derive_with(move |s| s.replacen(from.value().as_str(), &to.value(), 1))
    }

    pub fn repeat(&self, count: impl Into<MaybeSignal<usize>>) -> Derived<String> {
        let count = count.into();
        self.derive_with(move |s| s.repeat(count.value()))
    }

    /// Pad at the start with `fill` until `target` characters long.
    pub fn pad_start(
        &self,
        target: impl Into<MaybeSignal<usize>>,
        fill: impl Into<MaybeSignal<String>>,
    ) -> Derived<String> {
        let (target, fill) = (target.into(), fill.into());
        self.derive_with(move |s| pad(&s, target.value(), &fill.value(), true))
    }

    /// Pad at the end with `fill` until `target` characters long.
    pub fn pad_end(
        &self,
        target: impl Into<MaybeSignal<usize>>,
        fill: impl Into<MaybeSignal<String>>,
    ) -> Derived<String> {
        let (target, fill) = (target.into(), fill.into());
        self.derive_with(move |s| pad(&s, target.value(), &fill.value(), false))
    }
}

// ----------------------------------------------------------------------------
// Vectors
// ----------------------------------------------------------------------------

impl<T: Clone + 'static> Trap<Vec<T>> {
    pub fn length(&self) -> Derived<usize> {
        self.derive_with(|items| items.len())
    }

    pub fn last_item(&self) -> Derived<Option<T>>
    where
        T: Identity,
    {
        self.derive_with(|mut items| items.pop())
    }

    pub fn reversed(&self) -> Derived<Vec<T>> {
        self.derive_with(|mut items| {
            items.reverse();
            items
        })
    }

    pub fn includes(&self, item: impl Into<MaybeSignal<T>>) -> Derived<bool>
    where
        T: PartialEq,
    {
        let item = item.into();
        self.derive_with(move |items| items.contains(&item.value()))
    }

    pub fn join(&self, separator: impl Into<MaybeSignal<String>>) -> Derived<String>
    where
        T: Display,
    {
        let separator = separator.into();
        self.derive_with(move |items| {
            items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(&separator.value())
        })
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U + 'static) -> Derived<Vec<U>>
    where
        U: Clone + 'static,
    {
        self.derive_with(move |items| items.iter().map(&f).collect())
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool + 'static) -> Derived<Vec<T>> {
        self.derive_with(move |items| items.into_iter().filter(|item| predicate(item)).collect())
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool + 'static) -> Derived<Option<T>>
    where
        T: Identity,
    {
        self.derive_with(move |items| items.into_iter().find(|item| predicate(item)))
    }

    pub fn find_index(&self, predicate: impl Fn(&T) -> bool + 'static) -> Derived<Option<usize>> {
        self.derive_with(move |items| items.iter().position(|item| predicate(item)))
    }

    pub fn every(&self, predicate: impl Fn(&T) -> bool + 'static) -> Derived<bool> {
        self.derive_with(move |items| items.iter().all(|item| predicate(item)))
    }

    pub fn some(&self, predicate: impl Fn(&T) -> bool + 'static) -> Derived<bool> {
        self.derive_with(move |items| items.iter().any(|item| predicate(item)))
    }

    /// Items passing `predicate` and items failing it, as two derived signals.
    pub fn partition(
        &self,
        predicate: impl Fn(&T) -> bool + 'static,
    ) -> (Derived<Vec<T>>, Derived<Vec<T>>) {
        let predicate = Rc::new(predicate);
        let pass = Rc::clone(&predicate);
        let passing = self.filter(move |item| (*pass)(item));
        let failing = self.filter(move |item| !(*predicate)(item));
        (passing, failing)
    }

    pub fn concat(&self, other: impl Into<MaybeSignal<Vec<T>>>) -> Derived<Vec<T>> {
        let other = other.into();
        self.derive_with(move |mut items| {
            items.extend(other.value());
            items
        })
    }

    pub fn reduce<U>(&self, initial: U, f: impl Fn(U, &T) -> U + 'static) -> Derived<U>
    where
        U: Clone + Identity + 'static,
    {
        self.derive_with(move |items| items.iter().fold(initial.clone(), &f))
    }
}

// ----------------------------------------------------------------------------
// Maps
// ----------------------------------------------------------------------------

impl<K, V> Trap<BTreeMap<K, V>>
where
    K: Ord + Clone + 'static,
    V: Clone + 'static,
{
    /// The entry at `key`, if present.
    pub fn prop(&self, key: K) -> Derived<Option<V>>
    where
        V: Identity,
    {
        self.derive_with(move |mut map| map.remove(&key))
    }

    /// Keys in order.
    pub fn keys(&self) -> Derived<Vec<K>> {
        self.derive_with(|map| map.into_keys().collect())
    }
}

impl<K, V> Trap<HashMap<K, V>>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
{
    /// The entry at `key`, if present.
    pub fn prop(&self, key: K) -> Derived<Option<V>>
    where
        V: Identity,
    {
        self.derive_with(move |mut map| map.remove(&key))
    }

    /// Keys in arbitrary order.
    pub fn keys(&self) -> Derived<Vec<K>> {
        self.derive_with(|map| map.into_keys().collect())
    }
}

impl Trap<serde_json::Value> {
    /// The member `key` of an object; `null` for anything else.
    pub fn prop(&self, key: impl Into<String>) -> Derived<serde_json::Value> {
        let key = key.into();
        self.derive_with(move |value| match value {
            serde_json::Value::Object(mut members) => {
                members.remove(&key).unwrap_or(serde_json::Value::Null)
            }
            _ => serde_json::Value::Null,
        })
    }

    /// Member names of an object; empty for anything else.
    pub fn keys(&self) -> Derived<Vec<String>> {
        self.derive_with(|value| match value {
            serde_json::Value::Object(members) => members.into_iter().map(|(k, _)| k).collect(),
            _ => Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Signal;
    use serde_json::json;

    #[test]
    fn generic_string_and_or() {
        let count = Signal::new(0_i32);
        let label = trap(&count).string();
        let shown = trap(&count).or(10_i32);

        assert_eq!(label.get(), "0");
        assert_eq!(shown.get(), 10);

        count.set(3);
        assert_eq!(label.get(), "3");
        assert_eq!(shown.get(), 3);
    }

    #[test]
    fn number_transforms() {
        let x = Signal::new(1234.5678_f64);
        assert_eq!(trap(&x).to_fixed(2_usize).get(), "1234.57");
        assert_eq!(trap(&x).to_exponential(2_usize).get(), "1.23e+3");
        assert_eq!(trap(0.00015_f64).to_exponential(1_usize).get(), "1.5e-4");

        let confined = trap(&x).to_confined(0.0, 100.0);
        assert_eq!(confined.get(), 100.0);
        x.set(-5.0);
        assert_eq!(confined.get(), 0.0);
        x.set(42.0);
        assert_eq!(confined.get(), 42.0);
    }

    #[test]
    fn string_cases() {
        let text = Signal::new("hELLO wORLD".to_string());
        assert_eq!(trap(&text).lower_case().get(), "hello world");
        assert_eq!(trap(&text).upper_case().get(), "HELLO WORLD");
        assert_eq!(trap(&text).sentence_case().get(), "Hello world");
        assert_eq!(trap(&text).title_case().get(), "Hello World");
        assert_eq!(trap(&text).length().get(), 11);
    }

    #[test]
    fn string_queries_follow_their_arguments() {
        let text = Signal::new("reactive".to_string());
        let needle = Signal::new("act".to_string());
        let found = trap(&text).includes(&needle);

        assert!(found.get());
        needle.set("xyz".to_string());
        assert!(!found.get());

        assert!(trap(&text).starts_with("re").get());
        assert!(trap(&text).ends_with("ive").get());
    }

    #[test]
    fn string_edits() {
        let text = trap("a-b-c");
        assert_eq!(text.split("-").get(), vec!["a", "b", "c"]);
        assert_eq!(text.split("").get(), vec!["a", "-", "b", "-", "c"]);
        assert_eq!(text.replace("-", "+").get(), "a+b-c");
        assert_eq!(trap("ab").repeat(3_usize).get(), "ababab");
        assert_eq!(trap("7").pad_start(3_usize, "0").get(), "007");
        assert_eq!(trap("7").pad_end(4_usize, "ab").get(), "7aba");
        assert_eq!(trap(" x ").trim_start().get(), "x ");
        assert_eq!(trap(" x ").trim_end().get(), " x");
    }

    #[test]
    fn vector_transforms() {
        let items = Signal::new(vec![3, 1, 4, 1, 5]);
        let t = trap(&items);

        assert_eq!(t.length().get(), 5);
        assert_eq!(t.last_item().get(), Some(5));
        assert_eq!(t.reversed().get(), vec![5, 1, 4, 1, 3]);
        assert!(t.includes(4).get());
        assert_eq!(t.join(", ").get(), "3, 1, 4, 1, 5");
        assert_eq!(t.map(|n| n * 10).get(), vec![30, 10, 40, 10, 50]);
        assert_eq!(t.filter(|n| *n > 2).get(), vec![3, 4, 5]);
        assert_eq!(t.find(|n| *n > 3).get(), Some(4));
        assert_eq!(t.find_index(|n| *n == 1).get(), Some(1));
        assert!(t.every(|n| *n > 0).get());
        assert!(!t.some(|n| *n > 5).get());
        assert_eq!(t.concat(vec![9]).get(), vec![3, 1, 4, 1, 5, 9]);
        assert_eq!(t.reduce(0, |acc, n| acc + n).get(), 14);

        let (small, large) = t.partition(|n| *n < 3);
        assert_eq!(small.get(), vec![1, 1]);
        assert_eq!(large.get(), vec![3, 4, 5]);

        items.set(vec![]);
        assert_eq!(small.get(), Vec::<i32>::new());
        assert!(!t.some(|_| true).get());
    }

    #[test]
    fn some_is_any_not_every() {
        let t = trap(vec![1, 2, 3]);
        assert!(t.some(|n| *n == 2).get());
        assert!(!t.every(|n| *n == 2).get());
    }

    #[test]
    fn map_props_and_keys() {
        let settings = Signal::new(BTreeMap::from([("theme", "dark"), ("lang", "en")]));
        let theme = trap(&settings).prop("theme");
        let keys = trap(&settings).keys();

        assert_eq!(theme.get(), Some("dark"));
        assert_eq!(keys.get(), vec!["lang", "theme"]);

        settings.update(|current| {
            let mut next = current.clone();
            next.insert("theme", "light");
            next
        });
        assert_eq!(theme.get(), Some("light"));
    }

    #[test]
    fn json_props() {
        let doc = Signal::new(json!({"name": "tributary", "stars": 3}));
        let name = trap(&doc).prop("name");
        assert_eq!(name.get(), json!("tributary"));
        assert_eq!(trap(&doc).prop("missing").get(), json!(null));
        assert_eq!(trap(&doc).keys().get(), vec!["name", "stars"]);

        doc.set(json!([1, 2]));
        assert_eq!(name.get(), json!(null));
    }
}
