use std::collections::HashMap;
use std::hash::Hash;

use derive_more::Display;

/// State of a node during a depth-first traversal.
///
/// `Visiting` marks nodes on the active path; revisiting one of those is a
/// cycle. `Visited` marks nodes whose subtree is fully processed.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VisitState {
    Unvisited,
    Visiting,
    Visited,
}

#[derive(Debug, Clone)]
pub struct VisitMap<T>(HashMap<T, VisitState>);

impl<T> VisitMap<T>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, key: &T) -> VisitState {
        self.0.get(key).copied().unwrap_or(VisitState::Unvisited)
    }

    pub fn set(&mut self, key: T, state: VisitState) {
        self.0.insert(key, state);
    }

    pub fn contains_key(&self, key: &T) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for VisitMap<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
