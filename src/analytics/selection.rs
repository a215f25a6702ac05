//! Manual asset selection.
//!
//! The selection set is owned by the caller and passed into the engine by
//! reference; the engine only ever reads it. Every operation here is plain
//! set bookkeeping over asset ids.

use crate::models::Asset;
use std::collections::HashSet;

/// The set of asset ids hand-picked in selection mode.
///
/// Starts empty, is mutated by the toggle/select operations below, and is
/// cleared when the dashboard switches mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<i64>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// Flip membership of a single id.
    #[allow(dead_code)] // Dashboard operation, exercised in tests
    pub fn toggle(&mut self, id: i64) {
        if !self.ids.insert(id) {
            self.ids.remove(&id);
        }
    }

    /// Replace the selection with the given ids.
    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = i64>,
    {
        self.ids = ids.into_iter().collect();
    }

    /// Empty the selection.
    #[allow(dead_code)] // Dashboard operation, exercised in tests
    pub fn deselect_all(&mut self) {
        self.ids.clear();
    }

    /// Add every asset satisfying `predicate`; unrelated members are kept.
    #[allow(dead_code)] // Dashboard operation, exercised in tests
    pub fn select_matching<F>(&mut self, assets: &[Asset], predicate: F)
    where
        F: Fn(&Asset) -> bool,
    {
        for asset in assets.iter().filter(|a| predicate(a)) {
            self.ids.insert(asset.id);
        }
    }

    /// Remove every asset satisfying `predicate`; unrelated members are kept.
    #[allow(dead_code)] // Dashboard operation, exercised in tests
    pub fn deselect_matching<F>(&mut self, assets: &[Asset], predicate: F)
    where
        F: Fn(&Asset) -> bool,
    {
        for asset in assets.iter().filter(|a| predicate(a)) {
            self.ids.remove(&asset.id);
        }
    }
}
