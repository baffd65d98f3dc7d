use core::{borrow::Borrow, fmt};

use ordered_float::{FloatCore, OrderedFloat};

use crate::{Handle, Iter, RbTree};

/// An ordered map from keys to values.
///
/// `Map` holds no state of its own: every operation is forwarded to the
/// underlying [`RbTree`], which keeps the entries sorted by key.
///
/// # Examples
///
/// ```
/// use rb_map::Map;
///
/// let mut map = Map::new();
/// assert!(map.is_empty());
///
/// assert!(map.insert("b", 2).1);
/// assert!(map.insert("a", 1).1);
/// assert!(!map.insert("a", 10).1);
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get("a"), Some(&1));
/// assert_eq!(map.iter().map(|(k, _)| *k).collect::<Vec<_>>(), ["a", "b"]);
/// ```
#[derive(Clone)]
pub struct Map<K, V> {
    tree: RbTree<K, V>,
}

/// A [`Map`] keyed by floating point numbers under a total order.
///
/// `NaN` sorts above every other value and compares equal to itself, so it
/// can be stored like any other key.
pub type FloatMap<F, V> = Map<OrderedFloat<F>, V>;

impl<K, V> Map<K, V> {
    /// Creates an empty map
    ///
    /// # Returns
    ///
    /// * `Self` - The empty map
    pub fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }

    /// Creates an empty map with room for `capacity` entries
    ///
    /// # Arguments
    ///
    /// * `capacity` - The number of entries that fit without reallocating
    ///
    /// # Returns
    ///
    /// * `Self` - The empty map
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: RbTree::with_capacity(capacity),
        }
    }

    /// Returns the number of entries in the map
    ///
    /// # Returns
    ///
    /// * `usize` - The number of entries
    #[inline]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the map holds no entries
    ///
    /// # Returns
    ///
    /// * `bool` - True if the map is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the position of the minimum entry, or `end()` when empty
    pub const fn begin(&self) -> Handle {
        self.tree.begin()
    }

    /// Returns the past-the-end position
    pub const fn end(&self) -> Handle {
        self.tree.end()
    }

    /// Steps `handle` to the next entry in key order
    pub fn next(&self, handle: Handle) -> Handle {
        self.tree.next(handle)
    }

    /// Steps `handle` to the previous entry in key order
    pub fn prev(&self, handle: Handle) -> Handle {
        self.tree.prev(handle)
    }

    /// Returns the key/value pair at `handle`, `None` for `end()`
    pub fn entry(&self, handle: Handle) -> Option<(&K, &V)> {
        self.tree.entry(handle)
    }

    /// Returns the value at `handle` for in-place modification
    pub fn value_mut(&mut self, handle: Handle) -> Option<&mut V> {
        self.tree.value_mut(handle)
    }

    /// Returns an iterator over the entries in key order
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    /// Returns the underlying tree
    pub const fn as_tree(&self) -> &RbTree<K, V> {
        &self.tree
    }
}

impl<K: Ord, V> Map<K, V> {
    /// Inserts `value` under `key` unless the key is already present
    ///
    /// See [`RbTree::insert`].
    pub fn insert(&mut self, key: K, value: V) -> (Handle, bool) {
        self.tree.insert(key, value)
    }

    /// Constructs an entry in place, see [`RbTree::emplace`]
    pub fn emplace(&mut self, key: K, value: V) -> (Handle, bool) {
        self.tree.emplace(key, value)
    }

    /// Inserts a value built by `make` only if `key` is absent, see [`RbTree::emplace_with`]
    pub fn emplace_with<F>(&mut self, key: K, make: F) -> (Handle, bool)
    where
        F: FnOnce() -> V,
    {
        self.tree.emplace_with(key, make)
    }

    /// Erases the entry at `handle` and returns the next position, see [`RbTree::erase`]
    pub fn erase(&mut self, handle: Handle) -> Handle {
        self.tree.erase(handle)
    }

    /// Removes `key` and returns its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key)
    }

    /// Returns the position of `key`, or `end()` when missing
    pub fn find<Q>(&self, key: &Q) -> Handle
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(key)
    }

    /// Returns a reference to the value stored under `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_mut(key)
    }

    /// Returns true if `key` is present
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(key)
    }
}

impl<F: FloatCore, V> Map<OrderedFloat<F>, V> {
    /// Inserts `value` under the float `key`, see [`Map::insert`]
    ///
    /// # Arguments
    ///
    /// * `key` - The float key, `NaN` included
    /// * `value` - The value to store under the key
    ///
    /// # Returns
    ///
    /// * `(Handle, bool)` - The position of the entry and whether it was inserted
    pub fn insert_float(&mut self, key: F, value: V) -> (Handle, bool) {
        self.insert(OrderedFloat(key), value)
    }

    /// Returns the value stored under the float `key`
    ///
    /// # Arguments
    ///
    /// * `key` - The float key, `NaN` included
    ///
    /// # Returns
    ///
    /// * `Option<&V>` - The value, if the key is present
    pub fn get_float(&self, key: F) -> Option<&V> {
        self.get(&OrderedFloat(key))
    }
}

impl<K, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Map<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<K: Ord, V> Extend<(K, V)> for Map<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.tree.extend(iter);
    }
}

impl<'a, K, V> IntoIterator for &'a Map<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_empty_on_construction() {
        let map = Map::<i32, i32>::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.begin(), map.end());
    }

    #[test]
    fn test_len_delegates_to_tree() {
        let mut map = Map::with_capacity(4);
        map.insert(1, 'a');
        map.insert(2, 'b');
        assert_eq!(map.len(), map.as_tree().len());
        assert!(!map.is_empty());

        map.remove(&1);
        map.remove(&2);
        assert!(map.is_empty());
    }

    #[test]
    fn test_pass_through_operations() {
        let mut map: Map<i32, i32> = [(3, 30), (1, 10), (2, 20)].into_iter().collect();

        let h = map.find(&2);
        assert_eq!(map.entry(h), Some((&2, &20)));
        assert_eq!(map.entry(map.next(h)), Some((&3, &30)));
        assert_eq!(map.entry(map.prev(h)), Some((&1, &10)));

        if let Some(v) = map.value_mut(h) {
            *v = 22;
        }
        assert_eq!(map.get(&2), Some(&22));

        let next = map.erase(h);
        assert_eq!(map.entry(next), Some((&3, &30)));
        assert!(!map.contains_key(&2));

        assert!(map.emplace(5, 50).1);
        assert!(!map.emplace_with(5, || 0).1);
        if let Some(v) = map.get_mut(&5) {
            *v += 1;
        }
        assert_eq!((&map).into_iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), [(1, 10), (3, 30), (5, 51)]);

        map.extend([(0, 0)]);
        assert_eq!(map.len(), 4);
        map.clear();
        assert!(map.is_empty());
    }

    #[test]
    fn test_float_keys_are_totally_ordered() {
        let mut map: FloatMap<f64, &str> = FloatMap::new();
        assert!(map.insert_float(1.5, "one and a half").1);
        assert!(map.insert_float(f64::NAN, "nan").1);
        assert!(map.insert_float(f64::NEG_INFINITY, "-inf").1);
        assert!(map.insert_float(-0.5, "negative").1);
        assert!(!map.insert_float(f64::NAN, "another nan").1);

        assert_eq!(map.get_float(f64::NAN), Some(&"nan"));
        assert_eq!(map.get_float(2.0), None);

        let values: Vec<_> = map.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, ["-inf", "negative", "one and a half", "nan"]);
    }
}
