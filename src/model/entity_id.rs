// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Identifiers for shapes, arrows, groups and layers.
//!
//! Ids are allocated from an [`IdSource`] owned by each document, so two
//! editors never share a counter and tests always see the same sequence.
//! Ids are never reused within a document, so deleted shapes leave no
//! dangling references in selections or layers.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(u64);

        impl $name {
            /// Raw numeric value
            pub fn raw(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a committed shape
    ShapeId,
    "shape"
);
entity_id!(
    /// Identifies an arrow
    ArrowId,
    "arrow"
);
entity_id!(
    /// Identifies a group of shapes
    GroupId,
    "group"
);
entity_id!(
    /// Identifies a layer
    LayerId,
    "layer"
);

/// Per-document id allocator.
#[derive(Debug, Clone)]
pub struct IdSource {
    next: u64,
}

impl IdSource {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next id of any kind
    pub fn next<I: From<u64>>(&mut self) -> I {
        let raw = self.next;
        self.next += 1;
        I::from(raw)
    }
}

impl Default for IdSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_across_kinds() {
        let mut ids = IdSource::new();
        let shape: ShapeId = ids.next();
        let group: GroupId = ids.next();
        assert_ne!(shape.raw(), group.raw());
    }

    #[test]
    fn test_independent_sources() {
        let mut a = IdSource::new();
        let mut b = IdSource::new();
        let first: ShapeId = a.next();
        let second: ShapeId = b.next();
        assert_eq!(first, second);
    }

    #[test]
    fn test_display_prefix() {
        assert_eq!(ShapeId::from(3).to_string(), "shape-3");
        assert_eq!(LayerId::from(1).to_string(), "layer-1");
    }
}
