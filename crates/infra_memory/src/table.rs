//! Insertion-ordered table
//!
//! Stores list their rows in the order they were inserted, like the arrays
//! a UI would render, while lookups by key stay O(1).

use std::collections::HashMap;
use std::hash::Hash;

/// A keyed table that remembers insertion order
#[derive(Debug, Clone)]
pub struct Table<K, V> {
    order: Vec<K>,
    rows: HashMap<K, V>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            rows: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash, V> Table<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a row; a replaced row keeps its position
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.rows.insert(key, value);
        if previous.is_none() {
            self.order.push(key);
        }
        previous
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.rows.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.rows.get_mut(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.rows.remove(key)?;
        self.order.retain(|k| k != key);
        Some(removed)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in insertion order
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.order.iter().filter_map(move |key| self.rows.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_insertion_order() {
        let mut table = Table::new();
        table.insert(3, "c");
        table.insert(1, "a");
        table.insert(2, "b");
        assert_eq!(table.values().copied().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut table = Table::new();
        table.insert(1, "a");
        table.insert(2, "b");
        assert_eq!(table.insert(1, "z"), Some("a"));
        assert_eq!(table.values().copied().collect::<Vec<_>>(), vec!["z", "b"]);
    }

    #[test]
    fn test_remove() {
        let mut table = Table::new();
        table.insert(1, "a");
        table.insert(2, "b");
        assert_eq!(table.remove(&1), Some("a"));
        assert_eq!(table.remove(&1), None);
        assert_eq!(table.len(), 1);
        assert!(!table.contains(&1));
    }
}
