// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Immutable selection set of committed shapes.
//!
//! `Selection` wraps an `Arc<BTreeSet<ShapeId>>` so it can be cheaply
//! cloned. Mutations produce a new set. The `BTreeSet` gives deterministic
//! iteration order, which keeps grouping and alignment results stable.

use crate::model::ShapeId;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A set of selected shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    inner: Arc<BTreeSet<ShapeId>>,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BTreeSet::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn contains(&self, id: &ShapeId) -> bool {
        self.inner.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShapeId> {
        self.inner.iter()
    }

    /// Selected ids in ascending order
    pub fn ids(&self) -> Vec<ShapeId> {
        self.inner.iter().copied().collect()
    }

    pub fn insert(&mut self, id: ShapeId) {
        let mut set = (*self.inner).clone();
        set.insert(id);
        self.inner = Arc::new(set);
    }

    pub fn remove(&mut self, id: &ShapeId) {
        let mut set = (*self.inner).clone();
        set.remove(id);
        self.inner = Arc::new(set);
    }

    /// Add `id` if absent, remove it if present
    pub fn toggle(&mut self, id: ShapeId) {
        if self.contains(&id) {
            self.remove(&id);
        } else {
            self.insert(id);
        }
    }

    /// Replace the selection with a single shape
    pub fn select_only(&mut self, id: ShapeId) {
        self.inner = Arc::new(BTreeSet::from([id]));
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.inner = Arc::new(BTreeSet::new());
        }
    }

    /// Drop ids that no longer name a shape
    pub fn retain(&mut self, keep: impl Fn(&ShapeId) -> bool) {
        if self.inner.iter().all(&keep) {
            return;
        }
        let set = self.inner.iter().copied().filter(|id| keep(id)).collect();
        self.inner = Arc::new(set);
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<ShapeId> for Selection {
    fn from_iter<T: IntoIterator<Item = ShapeId>>(iter: T) -> Self {
        Self {
            inner: Arc::new(iter.into_iter().collect()),
        }
    }
}
