// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Shapes tool for dragging out rectangles and circles
//!
//! - Rectangle: the drag spans two opposite corners
//! - Circle: the drag starts at the center and ends on the rim

use crate::editing::{EditSession, MouseDelegate, MouseEvent};
use crate::model::{Shape, ShapeId};
use crate::render::{DrawCommand, RenderList, Stroke};
use crate::settings;
use crate::tools::{Tool, ToolId};
use kurbo::{Point, Rect};

// ===== Shape Type =====

/// Type of shape being drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Rectangle,
    Circle,
}

// ===== Gesture State =====

/// State of the shape drawing gesture
#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    /// Ready to start drawing
    Ready,
    /// Mouse down, tracking the pointer
    Dragging { start: Point, current: Point },
}

// ===== ShapesTool Struct =====

#[derive(Debug, Clone)]
pub struct ShapesTool {
    shape_type: ShapeType,
    gesture: GestureState,
}

impl ShapesTool {
    pub fn new(shape_type: ShapeType) -> Self {
        Self {
            shape_type,
            gesture: GestureState::Ready,
        }
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }
}

// ===== Tool Implementation =====

impl Tool for ShapesTool {
    fn id(&self) -> ToolId {
        match self.shape_type {
            ShapeType::Rectangle => ToolId::Rectangle,
            ShapeType::Circle => ToolId::Circle,
        }
    }

    fn paint(&self, session: &EditSession, out: &mut RenderList) {
        let GestureState::Dragging { start, current } = self.gesture else {
            return;
        };
        let stroke = Stroke::dashed(
            session.style.stroke.as_str(),
            session.style.stroke_width,
            settings::render::PREVIEW_DASH,
        );
        match self.shape_type {
            ShapeType::Rectangle => out.push(DrawCommand::Rect {
                rect: Rect::from_points(start, current),
                corner_radius: 0.0,
                fill: None,
                stroke: Some(stroke),
            }),
            ShapeType::Circle => out.push(DrawCommand::Circle {
                center: start,
                radius: start.distance(current),
                fill: None,
                stroke: Some(stroke),
            }),
        }
    }
}

// ===== MouseDelegate Implementation =====

impl MouseDelegate for ShapesTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, _session: &mut EditSession) {
        self.gesture = GestureState::Dragging {
            start: event.pos,
            current: event.pos,
        };
        tracing::debug!("Shapes tool: {:?} started at {:?}", self.shape_type, event.pos);
    }

    fn mouse_moved(&mut self, event: MouseEvent, _session: &mut EditSession) {
        if let GestureState::Dragging { start, .. } = self.gesture {
            self.gesture = GestureState::Dragging {
                start,
                current: event.pos,
            };
        }
    }

    fn left_up(&mut self, event: MouseEvent, session: &mut EditSession) {
        let GestureState::Dragging { start, .. } = self.gesture else {
            return;
        };
        self.gesture = GestureState::Ready;
        if start == event.pos {
            tracing::debug!("Shapes tool: zero-size drag ignored");
            return;
        }
        let id = self.commit(session, start, event.pos);
        tracing::debug!("Shapes tool: created {:?} {}", self.shape_type, id);
    }

    fn cancel(&mut self, _session: &mut EditSession) {
        self.gesture = GestureState::Ready;
    }
}

// ===== Helper Methods =====

impl ShapesTool {
    fn commit(&self, session: &mut EditSession, start: Point, end: Point) -> ShapeId {
        match self.shape_type {
            ShapeType::Rectangle => {
                session.commit_shape(|id, style| Shape::rectangle(id, start, end, style))
            }
            ShapeType::Circle => {
                let radius = start.distance(end);
                session.commit_shape(|id, style| Shape::circle(id, start, radius, style))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{EditAction, Modifiers};
    use crate::model::ShapeKind;

    fn drag(tool: &mut ShapesTool, session: &mut EditSession, from: (f64, f64), to: (f64, f64)) {
        let from = Point::new(from.0, from.1);
        let to = Point::new(to.0, to.1);
        tool.left_down(MouseEvent::new(from, Modifiers::NONE), session);
        tool.mouse_moved(MouseEvent::new(to, Modifiers::NONE), session);
        tool.left_up(MouseEvent::new(to, Modifiers::NONE), session);
    }

    #[test]
    fn test_rectangle_from_any_direction() {
        let mut session = EditSession::default();
        let mut tool = ShapesTool::new(ShapeType::Rectangle);
        drag(&mut tool, &mut session, (80.0, 60.0), (20.0, 10.0));

        let shape = session.document.visible_shapes().next().unwrap();
        assert_eq!(shape.kind, ShapeKind::Rectangle);
        assert_eq!(shape.points[0].point, Point::new(20.0, 10.0));
        assert_eq!(shape.style.width, Some(60.0));
        assert_eq!(shape.style.height, Some(50.0));
        assert_eq!(session.undo_state().current().action, EditAction::CommitShape);
    }

    #[test]
    fn test_circle_center_and_rim() {
        let mut session = EditSession::default();
        let mut tool = ShapesTool::new(ShapeType::Circle);
        drag(&mut tool, &mut session, (100.0, 100.0), (130.0, 140.0));

        let shape = session.document.visible_shapes().next().unwrap();
        assert_eq!(shape.kind, ShapeKind::Circle);
        assert_eq!(shape.radius(), 50.0);
        assert_eq!(shape.style.width, Some(100.0));
    }

    #[test]
    fn test_preview_only_while_dragging() {
        let mut session = EditSession::default();
        let mut tool = ShapesTool::new(ShapeType::Rectangle);
        let mut out = RenderList::new();
        tool.paint(&session, &mut out);
        assert!(out.is_empty());

        tool.left_down(MouseEvent::new(Point::new(0.0, 0.0), Modifiers::NONE), &mut session);
        tool.mouse_moved(MouseEvent::new(Point::new(40.0, 30.0), Modifiers::NONE), &mut session);
        tool.paint(&session, &mut out);
        assert!(matches!(&out[0], DrawCommand::Rect { stroke: Some(stroke), .. } if stroke.dash.is_some()));
    }

    #[test]
    fn test_click_without_drag_creates_nothing() {
        let mut session = EditSession::default();
        let mut tool = ShapesTool::new(ShapeType::Circle);
        drag(&mut tool, &mut session, (50.0, 50.0), (50.0, 50.0));
        assert_eq!(session.document.shape_count(), 0);
    }
}
