//! In-place style helpers for collection signals.
//!
//! Every helper copies the current collection, edits the copy and stores it
//! back with a single write, so subscribers run once per call.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::reactive::Signal;

impl<T: Clone + 'static> Signal<Vec<T>> {
    /// Append an item.
    pub fn push(&self, item: T) {
        self.mutate(|items| items.push(item));
    }

    /// Remove and return the last item.
    pub fn pop(&self) -> Option<T> {
        self.mutate(Vec::pop)
    }

    /// Insert an item at `index`, or at the end when `index` is past it.
    pub fn insert(&self, index: usize, item: T) {
        self.mutate(|items| {
            let index = index.min(items.len());
            items.insert(index, item);
        });
    }

    /// Remove and return the first item.
    pub fn shift(&self) -> Option<T> {
        self.mutate(|items| (!items.is_empty()).then(|| items.remove(0)))
    }

    /// Prepend an item.
    pub fn unshift(&self, item: T) {
        self.mutate(|items| items.insert(0, item));
    }

    /// Remove every item matching `predicate`.
    pub fn remove_where(&self, predicate: impl Fn(&T) -> bool) {
        self.mutate(|items| items.retain(|item| !predicate(item)));
    }

    /// Keep only the items matching `predicate`.
    pub fn retain(&self, predicate: impl Fn(&T) -> bool) {
        self.mutate(|items| items.retain(|item| predicate(item)));
    }

    pub fn reverse(&self) {
        self.mutate(|items| items.reverse());
    }

    pub fn sort(&self)
    where
        T: Ord,
    {
        self.mutate(|items| items.sort());
    }

    pub fn sort_by(&self, compare: impl FnMut(&T, &T) -> Ordering) {
        self.mutate(|items| items.sort_by(compare));
    }

    /// Overwrite every item with `value`.
    pub fn fill(&self, value: T) {
        self.mutate(|items| items.fill(value));
    }

    /// Remove `delete_count` items starting at `start`, insert `replacement`
    /// in their place and return the removed items.
    ///
    /// Out-of-range positions are clamped to the vector.
    pub fn splice(
        &self,
        start: usize,
        delete_count: usize,
        replacement: impl IntoIterator<Item = T>,
    ) -> Vec<T> {
        self.mutate(|items| {
            let start = start.min(items.len());
            let end = start.saturating_add(delete_count).min(items.len());
            items.splice(start..end, replacement).collect()
        })
    }

    pub fn clear(&self) {
        self.mutate(Vec::clear);
    }
}

impl<K: Ord + Clone + 'static, V: Clone + 'static> Signal<BTreeMap<K, V>> {
    /// Shallow-merge `partial` into the map.
    pub fn merge(&self, partial: impl IntoIterator<Item = (K, V)>) {
        self.mutate(|map| map.extend(partial));
    }
}

impl<K, V, S> Signal<HashMap<K, V, S>>
where
    K: Eq + Hash + Clone + 'static,
    V: Clone + 'static,
    S: BuildHasher + Clone + 'static,
{
    /// Shallow-merge `partial` into the map.
    pub fn merge(&self, partial: impl IntoIterator<Item = (K, V)>) {
        self.mutate(|map| map.extend(partial));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Effect;
    use std::cell::Cell;
    use std::rc::Rc;

    fn watch<T: Clone + 'static>(signal: &Signal<T>) -> (Effect, Rc<Cell<usize>>) {
        let runs = Rc::new(Cell::new(0));
        let (source, counter) = (signal.clone(), Rc::clone(&runs));
        let effect = Effect::new(move || {
            source.get();
            counter.set(counter.get() + 1);
        });
        (effect, runs)
    }

    #[test]
    fn each_helper_is_one_write() {
        let list = Signal::new(vec![3, 1, 2]);
        let (_effect, runs) = watch(&list);

        list.push(4);
        list.unshift(0);
        list.insert(99, 5);
        list.sort();
        assert_eq!(list.get(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(runs.get(), 5);

        assert_eq!(list.pop(), Some(5));
        assert_eq!(list.shift(), Some(0));
        assert_eq!(list.get(), vec![1, 2, 3, 4]);
        assert_eq!(runs.get(), 7);
    }

    #[test]
    fn filtering_helpers() {
        let list = Signal::new(vec![1, 2, 3, 4, 5, 6]);
        list.remove_where(|n| n % 2 == 0);
        assert_eq!(list.get(), vec![1, 3, 5]);

        list.retain(|n| *n > 1);
        assert_eq!(list.get(), vec![3, 5]);
    }

    #[test]
    fn ordering_helpers() {
        let list = Signal::new(vec!["b", "c", "a"]);
        list.reverse();
        assert_eq!(list.get(), vec!["a", "c", "b"]);

        list.sort_by(|a, b| b.cmp(a));
        assert_eq!(list.get(), vec!["c", "b", "a"]);

        list.fill("z");
        assert_eq!(list.get(), vec!["z", "z", "z"]);

        list.clear();
        assert!(list.get().is_empty());
    }

    #[test]
    fn empty_vectors() {
        let list: Signal<Vec<i32>> = Signal::new(Vec::new());
        assert_eq!(list.pop(), None);
        assert_eq!(list.shift(), None);
    }

    #[test]
    fn splice_clamps_and_returns_removed() {
        let list = Signal::new(vec![1, 2, 3, 4]);
        let removed = list.splice(1, 2, [20, 30, 40]);
        assert_eq!(removed, vec![2, 3]);
        assert_eq!(list.get(), vec![1, 20, 30, 40, 4]);

        let removed = list.splice(10, 5, [5]);
        assert!(removed.is_empty());
        assert_eq!(list.get(), vec![1, 20, 30, 40, 4, 5]);
    }

    #[test]
    fn merge_is_shallow_and_single_write() {
        let settings = Signal::new(BTreeMap::from([("theme", "dark"), ("lang", "en")]));
        let (_effect, runs) = watch(&settings);

        settings.merge([("lang", "fr"), ("font", "mono")]);
        assert_eq!(runs.get(), 2);
        assert_eq!(
            settings.get(),
            BTreeMap::from([("theme", "dark"), ("lang", "fr"), ("font", "mono")])
        );

        let counts: Signal<HashMap<&str, i32>> = Signal::new(HashMap::new());
        counts.merge([("a", 1)]);
        counts.merge([("a", 2), ("b", 3)]);
        assert_eq!(counts.get().get("a"), Some(&2));
        assert_eq!(counts.get().len(), 2);
    }
}
