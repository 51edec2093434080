// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Pen path editing methods for EditSession.
//!
//! Each committing operation replaces the pen path with the list returned
//! by the model and records exactly one history entry. Operations that
//! miss their target leave both the path and the history untouched and
//! return `false`.

use super::EditSession;
use crate::editing::undo::EditAction;
use crate::model::{AnchorList, HandleSide};
use kurbo::Point;

impl EditSession {
    /// Append an anchor; `smooth` synthesizes handles toward the previous
    /// anchor.
    pub fn add_anchor(&mut self, pos: Point, smooth: bool) {
        let anchors = self.anchors.add_anchor(pos, smooth);
        self.record(anchors, EditAction::AddAnchor);
    }

    pub fn insert_anchor(&mut self, pos: Point) -> bool {
        let result = self.anchors.insert_anchor(pos);
        self.apply(result, EditAction::InsertAnchor)
    }

    pub fn remove_anchor(&mut self, pos: Point) -> bool {
        let result = self.anchors.remove_anchor(pos);
        let changed = self.apply(result, EditAction::RemoveAnchor);
        if changed {
            self.anchor_selection = None;
        }
        changed
    }

    pub fn convert_anchor(&mut self, pos: Point) -> bool {
        let result = self.anchors.toggle_smooth(pos);
        self.apply(result, EditAction::ConvertAnchor)
    }

    pub fn close_path(&mut self) -> bool {
        let result = self.anchors.close_path();
        self.apply(result, EditAction::ClosePath)
    }

    /// Mid-drag anchor move; recorded when the drag ends
    pub(crate) fn drag_anchor(&mut self, index: usize, pos: Point) -> bool {
        match self.anchors.move_anchor(index, pos) {
            Some(anchors) => {
                self.set_anchors_transient(anchors);
                true
            }
            None => false,
        }
    }

    /// Mid-drag handle move; recorded when the drag ends
    pub(crate) fn drag_handle(&mut self, index: usize, side: HandleSide, pos: Point) -> bool {
        match self.anchors.move_handle(index, side, pos) {
            Some(anchors) => {
                self.set_anchors_transient(anchors);
                true
            }
            None => false,
        }
    }

    // ===== PRIVATE HELPERS =====

    fn apply(&mut self, result: Option<AnchorList>, action: EditAction) -> bool {
        match result {
            Some(anchors) => {
                self.record(anchors, action);
                true
            }
            None => {
                tracing::debug!("{:?} missed; nothing changed", action);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::editing::session::EditSession;
    use kurbo::Point;

    fn session_with(points: &[(f64, f64)]) -> EditSession {
        let mut session = EditSession::default();
        for &(x, y) in points {
            session.add_anchor(Point::new(x, y), false);
        }
        session
    }

    #[test]
    fn test_each_action_records_one_entry() {
        let mut session = session_with(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]);
        assert_eq!(session.undo_state().len(), 4);

        assert!(session.insert_anchor(Point::new(50.0, 2.0)));
        assert!(session.convert_anchor(Point::new(50.0, 2.0)));
        assert!(session.remove_anchor(Point::new(50.0, 2.0)));
        assert!(session.close_path());
        assert_eq!(session.undo_state().len(), 8);
    }

    #[test]
    fn test_misses_record_nothing() {
        let mut session = session_with(&[(0.0, 0.0), (100.0, 0.0)]);
        assert!(!session.insert_anchor(Point::new(50.0, 10.0)));
        assert!(!session.remove_anchor(Point::new(50.0, 0.0)));
        assert!(!session.convert_anchor(Point::new(200.0, 0.0)));
        assert!(!session.close_path());
        assert_eq!(session.undo_state().len(), 3);
    }

    #[test]
    fn test_undo_redo_symmetry() {
        let mut session = EditSession::default();
        session.add_anchor(Point::new(0.0, 0.0), false);
        session.add_anchor(Point::new(40.0, 0.0), true);
        session.add_anchor(Point::new(40.0, 40.0), false);
        session.convert_anchor(Point::new(40.0, 40.0));
        session.insert_anchor(Point::new(20.0, 1.0));
        session.close_path();
        let final_state = session.anchors().clone();
        let actions = session.undo_state().len() - 1;

        for _ in 0..actions {
            assert!(session.undo());
        }
        assert!(session.anchors().is_empty());
        assert!(!session.undo());

        for _ in 0..actions {
            assert!(session.redo());
        }
        assert_eq!(session.anchors(), &final_state);
        assert!(!session.redo());
    }

    #[test]
    fn test_new_action_after_undo_discards_redo() {
        let mut session = session_with(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        session.undo();
        session.add_anchor(Point::new(0.0, 30.0), false);
        assert!(!session.redo());
        assert_eq!(session.anchors()[2].point, Point::new(0.0, 30.0));
    }

    #[test]
    fn test_drag_is_transient_until_recorded() {
        let mut session = session_with(&[(0.0, 0.0), (10.0, 0.0)]);
        assert!(session.drag_anchor(1, Point::new(10.0, 10.0)));
        assert_eq!(session.undo_state().len(), 3);
        session.record_current(crate::editing::undo::EditAction::MoveAnchor);
        assert_eq!(session.undo_state().len(), 4);
        assert!(session.undo());
        assert_eq!(session.anchors()[1].point, Point::new(10.0, 0.0));
    }
}
