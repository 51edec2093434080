// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Select tool for picking, moving and resizing committed shapes

use crate::editing::{EditSession, MouseDelegate, MouseEvent};
use crate::geometry::{ResizeHandle, resize_handle_at};
use crate::model::ResizeSnapshot;
use crate::tools::{Tool, ToolId};
use kurbo::Point;

// ===== Gesture State =====

#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    /// Dragging the selected shapes
    Moving { origin: Point, last: Point },
    /// Dragging a resize handle of the selected group
    Resizing {
        snapshot: ResizeSnapshot,
        handle: ResizeHandle,
        origin: Point,
    },
}

/// The select tool.
///
/// Resize handles of the selected group win over shapes beneath them.
#[derive(Debug, Clone)]
pub struct SelectTool {
    gesture: Gesture,
}

impl Default for SelectTool {
    fn default() -> Self {
        Self {
            gesture: Gesture::Idle,
        }
    }
}

impl Tool for SelectTool {
    fn id(&self) -> ToolId {
        ToolId::Select
    }
}

// ===== MouseDelegate Implementation =====

impl MouseDelegate for SelectTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        if let Some(gesture) = self.resize_gesture_at(event.pos, session) {
            self.gesture = gesture;
            return;
        }

        self.gesture = Gesture::Idle;
        match session.document.shape_at(event.pos) {
            Some(id) if event.mods.shift => {
                session.selection.toggle(id);
            }
            Some(id) => {
                if !session.selection.contains(&id) {
                    session.selection.select_only(id);
                }
                self.gesture = Gesture::Moving {
                    origin: event.pos,
                    last: event.pos,
                };
            }
            None if event.mods.shift => {}
            None => session.selection.clear(),
        }
    }

    fn mouse_moved(&mut self, event: MouseEvent, session: &mut EditSession) {
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Moving { last, .. } => {
                let delta = event.pos - *last;
                *last = event.pos;
                session
                    .document
                    .translate_shapes(&session.selection.ids(), delta);
            }
            Gesture::Resizing {
                snapshot,
                handle,
                origin,
            } => {
                session
                    .document
                    .apply_resize(snapshot, *handle, event.pos - *origin);
            }
        }
    }

    fn left_up(&mut self, _event: MouseEvent, _session: &mut EditSession) {
        if let Gesture::Resizing { snapshot, .. } = &self.gesture {
            tracing::debug!("Select tool: resized {}", snapshot.group);
        }
        self.gesture = Gesture::Idle;
    }

    /// Put everything back where the gesture found it
    fn cancel(&mut self, session: &mut EditSession) {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => {}
            Gesture::Moving { origin, last } => {
                session
                    .document
                    .translate_shapes(&session.selection.ids(), origin - last);
            }
            Gesture::Resizing { snapshot, .. } => {
                session.document.restore_resize(&snapshot);
            }
        }
    }
}

// ===== Helper Methods =====

impl SelectTool {
    fn resize_gesture_at(&self, pos: Point, session: &EditSession) -> Option<Gesture> {
        if session.selection.is_empty() {
            return None;
        }
        let document = &session.document;
        let group = match document.resize_target(&session.selection.ids()) {
            Ok(group) => group?,
            Err(err) => {
                tracing::warn!("Select tool: resize ignored: {}", err);
                return None;
            }
        };
        let bounds = document.group_by_id(group)?.bounds;
        let handle = resize_handle_at(pos, bounds)?;
        let snapshot = document.begin_resize(group).ok()?;
        tracing::debug!("Select tool: resizing {} by {:?}", group, handle);
        Some(Gesture::Resizing {
            snapshot,
            handle,
            origin: pos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Modifiers;
    use crate::model::{Shape, ShapeId};
    use kurbo::Rect;

    fn rect(session: &mut EditSession, a: (f64, f64), b: (f64, f64)) -> ShapeId {
        session.commit_shape(|id, style| {
            Shape::rectangle(id, Point::new(a.0, a.1), Point::new(b.0, b.1), style)
        })
    }

    fn at(x: f64, y: f64) -> MouseEvent {
        MouseEvent::new(Point::new(x, y), Modifiers::NONE)
    }

    fn drag(tool: &mut SelectTool, session: &mut EditSession, from: (f64, f64), to: (f64, f64)) {
        tool.left_down(at(from.0, from.1), session);
        tool.mouse_moved(at(to.0, to.1), session);
        tool.left_up(at(to.0, to.1), session);
    }

    #[test]
    fn test_click_selects_and_empty_click_clears() {
        let mut session = EditSession::default();
        let a = rect(&mut session, (10.0, 10.0), (50.0, 50.0));
        let b = rect(&mut session, (100.0, 10.0), (150.0, 50.0));
        let mut tool = SelectTool::default();

        tool.left_down(at(20.0, 20.0), &mut session);
        assert!(session.selection.contains(&a));

        tool.left_down(MouseEvent::new(Point::new(120.0, 20.0), Modifiers::SHIFT), &mut session);
        assert_eq!(session.selection.len(), 2);
        tool.left_down(MouseEvent::new(Point::new(120.0, 20.0), Modifiers::SHIFT), &mut session);
        assert!(!session.selection.contains(&b));

        tool.left_down(at(400.0, 400.0), &mut session);
        assert!(session.selection.is_empty());
    }

    #[test]
    fn test_drag_moves_selection() {
        let mut session = EditSession::default();
        let a = rect(&mut session, (10.0, 10.0), (50.0, 50.0));
        let mut tool = SelectTool::default();
        drag(&mut tool, &mut session, (20.0, 20.0), (50.0, 40.0));
        assert_eq!(
            session.document.shape(a).unwrap().anchor_bounds(),
            Some(Rect::new(40.0, 30.0, 80.0, 70.0))
        );
    }

    #[test]
    fn test_group_resize_keeps_bounds_in_sync() {
        let mut session = EditSession::default();
        let a = rect(&mut session, (0.0, 0.0), (50.0, 50.0));
        let b = rect(&mut session, (50.0, 50.0), (100.0, 100.0));
        let group = session.document.group(&[a, b]).unwrap();
        session.selection.insert(a);
        let mut tool = SelectTool::default();

        // Bottom-right handle, dragged out by 100 in both directions
        drag(&mut tool, &mut session, (100.0, 100.0), (200.0, 200.0));
        let bounds = session.document.group_by_id(group).unwrap().bounds;
        assert_eq!(bounds, Rect::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(
            session.document.shape(b).unwrap().anchor_bounds(),
            Some(Rect::new(100.0, 100.0, 200.0, 200.0))
        );
        assert_eq!(session.document.shape(a).unwrap().style.width, Some(100.0));
    }

    #[test]
    fn test_resize_never_inverts() {
        let mut session = EditSession::default();
        let a = rect(&mut session, (0.0, 0.0), (50.0, 50.0));
        let b = rect(&mut session, (50.0, 50.0), (100.0, 100.0));
        let group = session.document.group(&[a, b]).unwrap();
        session.selection.insert(b);
        let mut tool = SelectTool::default();

        drag(&mut tool, &mut session, (100.0, 50.0), (-300.0, 50.0));
        let bounds = session.document.group_by_id(group).unwrap().bounds;
        assert_eq!(bounds.width(), 1.0);
        assert_eq!(bounds.x0, 0.0);
    }

    #[test]
    fn test_flat_group_resize_and_cancel_stay_put() {
        let mut session = EditSession::default();
        let a = session.commit_shape(|id, style| Shape::text(id, Point::new(20.0, 50.0), "a".into(), style));
        let b = session.commit_shape(|id, style| Shape::text(id, Point::new(80.0, 50.0), "b".into(), style));
        let group = session.document.group(&[a, b]).unwrap();
        session.selection.insert(a);
        let before = session.document.group_by_id(group).unwrap().bounds;
        assert_eq!(before, Rect::new(20.0, 50.0, 80.0, 50.0));
        let mut tool = SelectTool::default();

        // Top handle of a group lying on one baseline
        tool.left_down(at(50.0, 50.0), &mut session);
        assert_eq!(session.document.group_by_id(group).unwrap().bounds, before);
        tool.mouse_moved(at(50.0, 50.1), &mut session);
        assert_eq!(session.document.group_by_id(group).unwrap().bounds, before);
        tool.cancel(&mut session);
        assert_eq!(session.document.group_by_id(group).unwrap().bounds, before);
    }

    #[test]
    fn test_cancel_restores_resize() {
        let mut session = EditSession::default();
        let a = rect(&mut session, (0.0, 0.0), (50.0, 50.0));
        let b = rect(&mut session, (50.0, 50.0), (100.0, 100.0));
        session.document.group(&[a, b]).unwrap();
        session.selection.insert(a);
        let mut tool = SelectTool::default();

        tool.left_down(at(100.0, 100.0), &mut session);
        tool.mouse_moved(at(160.0, 130.0), &mut session);
        tool.cancel(&mut session);
        assert_eq!(
            session.document.shape(b).unwrap().anchor_bounds(),
            Some(Rect::new(50.0, 50.0, 100.0, 100.0))
        );
        assert_eq!(session.document.shape(a).unwrap().style.width, Some(50.0));
    }

    #[test]
    fn test_ambiguous_resize_falls_back_to_selection() {
        let mut session = EditSession::default();
        let a = rect(&mut session, (0.0, 0.0), (50.0, 50.0));
        let b = rect(&mut session, (10.0, 10.0), (40.0, 40.0));
        let c = rect(&mut session, (200.0, 0.0), (250.0, 50.0));
        let d = rect(&mut session, (210.0, 10.0), (240.0, 40.0));
        session.document.group(&[a, b]).unwrap();
        session.document.group(&[c, d]).unwrap();
        session.selection.insert(a);
        session.selection.insert(c);
        let mut tool = SelectTool::default();

        // Corner of the first group, but two groups are selected
        tool.left_down(at(50.0, 50.0), &mut session);
        tool.mouse_moved(at(80.0, 80.0), &mut session);
        tool.left_up(at(80.0, 80.0), &mut session);
        assert_eq!(
            session.document.shape(a).unwrap().anchor_bounds(),
            Some(Rect::new(30.0, 30.0, 80.0, 80.0))
        );
    }

    #[test]
    fn test_locked_layer_not_selectable() {
        let mut session = EditSession::default();
        rect(&mut session, (10.0, 10.0), (50.0, 50.0));
        let layer = session.document.active_layer();
        session.document.toggle_layer_lock(layer).unwrap();
        let mut tool = SelectTool::default();
        tool.left_down(at(20.0, 20.0), &mut session);
        assert!(session.selection.is_empty());
    }

    #[test]
    fn test_cancel_undoes_move() {
        let mut session = EditSession::default();
        let a = rect(&mut session, (10.0, 10.0), (50.0, 50.0));
        let mut tool = SelectTool::default();
        tool.left_down(at(20.0, 20.0), &mut session);
        tool.mouse_moved(at(60.0, 20.0), &mut session);
        tool.cancel(&mut session);
        assert_eq!(
            session.document.shape(a).unwrap().anchor_bounds(),
            Some(Rect::new(10.0, 10.0, 50.0, 50.0))
        );
    }
}
