// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Arrow tool for drawing curved connectors

use crate::editing::{EditSession, MouseDelegate, MouseEvent};
use crate::model::arrow_controls;
use crate::render::{RenderList, Stroke, arrow_commands};
use crate::settings;
use crate::tools::{Tool, ToolId};
use kurbo::Point;

/// Drag from the tail to the head of the arrow
#[derive(Debug, Clone, Default)]
pub struct ArrowTool {
    /// Tail and current head while dragging
    drag: Option<(Point, Point)>,
}

impl Tool for ArrowTool {
    fn id(&self) -> ToolId {
        ToolId::Arrow
    }

    fn paint(&self, session: &EditSession, out: &mut RenderList) {
        let Some((start, end)) = self.drag else {
            return;
        };
        let (c1, c2) = arrow_controls(start, end);
        let stroke = Stroke::dashed(
            session.style.stroke.as_str(),
            session.style.stroke_width,
            settings::render::PREVIEW_DASH,
        );
        arrow_commands(start, c1, c2, end, &stroke, settings::arrow::HEAD_SIZE, out);
    }
}

impl MouseDelegate for ArrowTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, _session: &mut EditSession) {
        self.drag = Some((event.pos, event.pos));
    }

    fn mouse_moved(&mut self, event: MouseEvent, _session: &mut EditSession) {
        if let Some((_, end)) = self.drag.as_mut() {
            *end = event.pos;
        }
    }

    fn left_up(&mut self, event: MouseEvent, session: &mut EditSession) {
        let Some((start, _)) = self.drag.take() else {
            return;
        };
        if start == event.pos {
            return;
        }
        let id = session.commit_arrow(start, event.pos);
        tracing::debug!("Arrow tool: created {}", id);
    }

    fn cancel(&mut self, _session: &mut EditSession) {
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{EditAction, Modifiers};

    #[test]
    fn test_drag_commits_arrow() {
        let mut session = EditSession::default();
        let mut tool = ArrowTool::default();
        tool.left_down(MouseEvent::new(Point::new(0.0, 0.0), Modifiers::NONE), &mut session);
        tool.mouse_moved(MouseEvent::new(Point::new(90.0, 60.0), Modifiers::NONE), &mut session);

        let mut preview = RenderList::new();
        tool.paint(&session, &mut preview);
        assert_eq!(preview.len(), 2);

        tool.left_up(MouseEvent::new(Point::new(90.0, 60.0), Modifiers::NONE), &mut session);
        let arrow = &session.document.arrows()[0];
        assert_eq!(arrow.controls(), (Point::new(45.0, 20.0), Point::new(45.0, 40.0)));
        assert_eq!(session.undo_state().current().action, EditAction::CommitArrow);
    }

    #[test]
    fn test_click_creates_nothing() {
        let mut session = EditSession::default();
        let mut tool = ArrowTool::default();
        tool.left_down(MouseEvent::new(Point::new(5.0, 5.0), Modifiers::NONE), &mut session);
        tool.left_up(MouseEvent::new(Point::new(5.0, 5.0), Modifiers::NONE), &mut session);
        assert!(session.document.arrows().is_empty());
    }
}
