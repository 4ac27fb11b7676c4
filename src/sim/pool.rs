//! Homogeneous entity pools
//!
//! A pass that removes entities while scanning marks them instead of erasing
//! in place; marked entities are skipped by the rest of the pass and dropped
//! by [`Pool::sweep`] once it ends.

use std::ops::{Index, IndexMut};

use serde::Serialize;

/// Ordered collection of live entities of one kind
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Pool<T> {
    items: Vec<T>,
    #[serde(skip)]
    doomed: Vec<bool>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            doomed: Vec::new(),
        }
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.doomed.push(false);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.doomed.clear();
    }

    /// Flag an entity for removal at the next sweep
    pub fn mark(&mut self, index: usize) {
        self.doomed[index] = true;
    }

    pub fn is_marked(&self, index: usize) -> bool {
        self.doomed[index]
    }

    /// Indices of entities not yet marked
    pub fn live_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.doomed
            .iter()
            .enumerate()
            .filter(|(_, doomed)| !**doomed)
            .map(|(i, _)| i)
    }

    /// Drop every marked entity; survivors keep their relative order
    pub fn sweep(&mut self) -> usize {
        let before = self.items.len();
        let mut flags = self.doomed.iter();
        self.items.retain(|_| !flags.next().copied().unwrap_or(false));
        self.doomed.clear();
        self.doomed.resize(self.items.len(), false);
        before - self.items.len()
    }

    /// Update every entity in place, dropping those for which `f` returns false
    pub fn update_retain(&mut self, mut f: impl FnMut(&mut T) -> bool) {
        self.items.retain_mut(|item| f(item));
        self.doomed.clear();
        self.doomed.resize(self.items.len(), false);
    }
}

impl<T> Index<usize> for Pool<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for Pool<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T> FromIterator<T> for Pool<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        let doomed = vec![false; items.len()];
        Self { items, doomed }
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_removes_marked_only() {
        let mut pool: Pool<u32> = (0..6).collect();
        pool.mark(1);
        pool.mark(4);
        assert!(pool.is_marked(1));
        assert_eq!(pool.live_indices().collect::<Vec<_>>(), vec![0, 2, 3, 5]);

        assert_eq!(pool.sweep(), 2);
        assert_eq!(pool.as_slice(), &[0, 2, 3, 5]);
        assert!(!pool.is_marked(0));
    }

    #[test]
    fn test_push_after_sweep() {
        let mut pool: Pool<u32> = (0..3).collect();
        pool.mark(0);
        pool.sweep();
        pool.push(9);
        assert_eq!(pool.as_slice(), &[1, 2, 9]);
        assert!(!pool.is_marked(2));
    }

    #[test]
    fn test_update_retain_visits_each_once() {
        let mut pool: Pool<u32> = (0..5).collect();
        let mut visits = 0;
        pool.update_retain(|v| {
            visits += 1;
            *v += 10;
            *v % 2 == 0
        });
        assert_eq!(visits, 5);
        assert_eq!(pool.as_slice(), &[10, 12, 14]);
    }

    #[test]
    fn test_clear() {
        let mut pool: Pool<u32> = (0..3).collect();
        pool.mark(0);
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.sweep(), 0);
    }
}
