// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Linear undo/redo over snapshots of the pen path.
//!
//! The history always holds at least one entry (the empty path it started
//! from) and a cursor pointing at the entry that matches the current
//! state. Entries are never merged: one committing action, one entry.

use crate::model::AnchorList;

/// What produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Initial,
    AddAnchor,
    InsertAnchor,
    RemoveAnchor,
    ConvertAnchor,
    ClosePath,
    MoveAnchor,
    MoveHandle,
    CommitShape,
    CommitArrow,
}

/// One snapshot of the pen path
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub anchors: AnchorList,
    pub action: EditAction,
}

#[derive(Debug, Clone)]
pub struct UndoState {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl UndoState {
    /// A history holding only the empty path
    pub fn new() -> Self {
        Self {
            entries: vec![HistoryEntry {
                anchors: AnchorList::new(),
                action: EditAction::Initial,
            }],
            cursor: 0,
        }
    }

    /// Record the state after a committing action. Anything past the cursor
    /// is discarded first.
    pub fn push(&mut self, anchors: AnchorList, action: EditAction) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry { anchors, action });
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry and return the path to restore
    pub fn undo(&mut self) -> Option<AnchorList> {
        if self.cursor == 0 {
            return None;
        }
        let undone = self.entries[self.cursor].action;
        self.cursor -= 1;
        tracing::debug!("Undo: reverted {:?}", undone);
        Some(self.entries[self.cursor].anchors.clone())
    }

    /// Step forward one entry and return the path to restore
    pub fn redo(&mut self) -> Option<AnchorList> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        let entry = &self.entries[self.cursor];
        tracing::debug!("Redo: reapplied {:?}", entry.action);
        Some(entry.anchors.clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    /// Forget everything and start over from the empty path
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for UndoState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn path(n: usize) -> AnchorList {
        (0..n).fold(AnchorList::new(), |acc, i| {
            acc.add_anchor(Point::new(i as f64 * 10.0, 0.0), false)
        })
    }

    #[test]
    fn test_starts_with_empty_entry() {
        let undo = UndoState::new();
        assert_eq!(undo.len(), 1);
        assert_eq!(undo.cursor(), 0);
        assert!(undo.current().anchors.is_empty());
        assert!(!undo.can_undo());
        assert!(!undo.can_redo());
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut undo = UndoState::new();
        undo.push(path(1), EditAction::AddAnchor);
        undo.push(path(2), EditAction::AddAnchor);

        assert_eq!(undo.undo(), Some(path(1)));
        assert_eq!(undo.undo(), Some(path(0)));
        assert_eq!(undo.undo(), None);
        assert_eq!(undo.redo(), Some(path(1)));
        assert_eq!(undo.redo(), Some(path(2)));
        assert_eq!(undo.redo(), None);
    }

    #[test]
    fn test_push_truncates_redo_branch() {
        let mut undo = UndoState::new();
        undo.push(path(1), EditAction::AddAnchor);
        undo.push(path(2), EditAction::AddAnchor);
        undo.undo();
        undo.push(path(3), EditAction::AddAnchor);

        assert_eq!(undo.len(), 3);
        assert!(!undo.can_redo());
        assert_eq!(undo.undo(), Some(path(1)));
    }

    #[test]
    fn test_reset() {
        let mut undo = UndoState::new();
        undo.push(path(1), EditAction::AddAnchor);
        undo.reset();
        assert_eq!(undo.len(), 1);
        assert!(!undo.can_undo());
    }
}
