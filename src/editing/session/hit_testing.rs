// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Hit testing methods for EditSession

use super::{AnchorTarget, EditSession};
use crate::settings;
use kurbo::Point;

impl EditSession {
    /// Anchor or handle of the pen path under `pos`.
    ///
    /// Handles are tested before anchors: they are smaller targets and
    /// often sit close to their own anchor.
    pub fn anchor_target_at(&self, pos: Point) -> Option<AnchorTarget> {
        let tolerance = settings::hit::TOLERANCE;
        if let Some((index, side)) = self.anchors.handle_near(pos, tolerance) {
            return Some(AnchorTarget::Handle(index, side));
        }
        self.anchors
            .anchor_near(pos, tolerance)
            .map(AnchorTarget::Anchor)
    }

    /// Whether any pen anchor lies under `pos`
    pub fn anchor_at(&self, pos: Point) -> Option<usize> {
        self.anchors.anchor_near(pos, settings::hit::TOLERANCE)
    }

    /// Whether a click at `pos` would close the pen path
    pub fn closes_path_at(&self, pos: Point) -> bool {
        self.anchors.len() > settings::pen::MIN_ANCHORS_TO_CLOSE
            && !self.anchors.is_closed()
            && self
                .anchors
                .first()
                .is_some_and(|first| first.point.distance(pos) < settings::hit::CLOSE_PATH)
    }

    /// Anchor under the last known pointer position
    pub fn hovered_anchor(&self) -> Option<usize> {
        self.pointer.and_then(|pos| self.anchor_at(pos))
    }
}

#[cfg(test)]
mod tests {
    use crate::editing::session::{AnchorTarget, EditSession};
    use crate::model::HandleSide;
    use kurbo::Point;

    #[test]
    fn test_handles_win_over_anchors() {
        let mut session = EditSession::default();
        session.add_anchor(Point::new(0.0, 0.0), false);
        session.add_anchor(Point::new(9.0, 0.0), true);
        // Handle of anchor 0 sits at (3, 0), anchor 0 itself at (0, 0)
        assert_eq!(
            session.anchor_target_at(Point::new(2.0, 0.0)),
            Some(AnchorTarget::Handle(0, HandleSide::Out))
        );
        assert_eq!(
            session.anchor_target_at(Point::new(0.0, 20.0)),
            None
        );
        assert_eq!(
            session.anchor_target_at(Point::new(9.0, 4.0)),
            Some(AnchorTarget::Anchor(1))
        );
    }

    #[test]
    fn test_closing_tolerance() {
        let mut session = EditSession::default();
        for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (1.0, 1.0)] {
            session.add_anchor(Point::new(x, y), false);
        }
        assert!(session.closes_path_at(Point::new(2.0, 2.0)));
        assert!(!session.closes_path_at(Point::new(30.0, 30.0)));
    }

    #[test]
    fn test_closing_needs_three_anchors() {
        let mut session = EditSession::default();
        session.add_anchor(Point::new(0.0, 0.0), false);
        session.add_anchor(Point::new(50.0, 0.0), false);
        assert!(!session.closes_path_at(Point::new(1.0, 1.0)));
    }
}
