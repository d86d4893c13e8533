use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Index;

/// A bidirectional map with O(1) lookup in both directions.
///
/// Keys and values are stored twice, so both must be `Clone`. Inserting a
/// pair replaces any previous binding of either the key or the value.
#[derive(Debug, Clone)]
pub struct BiMap<K, V> {
    forward: HashMap<K, V>,
    backward: HashMap<V, K>,
}

impl<K, V> Default for BiMap<K, V> {
    fn default() -> Self {
        Self {
            forward: HashMap::new(),
            backward: HashMap::new(),
        }
    }
}

impl<K, V> BiMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl<K, V> BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    pub fn insert(&mut self, key: K, value: V) {
        self.forward.insert(key.clone(), value.clone());
        self.backward.insert(value, key);
    }

    pub fn get_by_key(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    pub fn get_by_value(&self, value: &V) -> Option<&K> {
        self.backward.get(value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.backward.contains_key(value)
    }

    pub fn remove_by_key(&mut self, key: &K) -> Option<V> {
        let value = self.forward.remove(key)?;
        self.backward.remove(&value);
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.forward.iter()
    }
}

impl<K, V> Index<&K> for BiMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.get_by_key(key).expect("key not present in bimap")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let mut map = BiMap::new();
        map.insert("a", 1);
        map.insert("b", 2);

        assert_eq!(map.get_by_key(&"a"), Some(&1));
        assert_eq!(map.get_by_value(&2), Some(&"b"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn remove_clears_both_directions() {
        let mut map = BiMap::new();
        map.insert("a", 1);

        assert_eq!(map.remove_by_key(&"a"), Some(1));
        assert!(!map.contains_value(&1));
        assert!(map.is_empty());
    }
}
