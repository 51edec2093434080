// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Committed shapes, arrows, groups, layers and guides.

use super::anchor::Anchor;
use super::entity_id::{ArrowId, GroupId, LayerId, ShapeId};
use crate::geometry::bounds_of;
use crate::{settings, theme};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

// ===== Styles =====

/// Horizontal alignment of text shapes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Current picker state supplied by the host. Applied to shapes as they
/// are committed; existing shapes keep their own style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub font_family: String,
    pub font_size: f64,
    pub text_align: TextAlign,
}

impl Default for DrawingStyle {
    fn default() -> Self {
        Self {
            fill: theme::shape::FILL.to_string(),
            stroke: theme::shape::STROKE.to_string(),
            stroke_width: settings::shapes::DEFAULT_STROKE_WIDTH,
            font_family: settings::shapes::DEFAULT_FONT_FAMILY.to_string(),
            font_size: settings::shapes::DEFAULT_FONT_SIZE,
            text_align: TextAlign::Left,
        }
    }
}

/// Per-shape style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub font_size: f64,
    pub font_family: String,
    pub text_align: TextAlign,
    pub corner_radius: f64,
    /// Mirrors the shape's extent for rectangles and circles
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub dashed: bool,
}

impl From<&DrawingStyle> for ShapeStyle {
    fn from(style: &DrawingStyle) -> Self {
        Self {
            fill: style.fill.clone(),
            stroke: style.stroke.clone(),
            stroke_width: style.stroke_width,
            font_size: style.font_size,
            font_family: style.font_family.clone(),
            text_align: style.text_align,
            corner_radius: 0.0,
            width: None,
            height: None,
            dashed: false,
        }
    }
}

// ===== Shape =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Path,
    Rectangle,
    Circle,
    Text,
}

/// A committed shape.
///
/// - rectangle: two anchors, top-left and bottom-right corners
/// - circle: two anchors, the center and a point on the rim
/// - text: one anchor at the text origin
/// - path: the anchors of a saved pen path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub points: Vec<Anchor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub style: ShapeStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
}

impl Shape {
    pub fn rectangle(id: ShapeId, corner_a: Point, corner_b: Point, style: ShapeStyle) -> Self {
        let rect = Rect::from_points(corner_a, corner_b);
        let mut shape = Self {
            id,
            kind: ShapeKind::Rectangle,
            points: vec![Anchor::new(rect.origin()), Anchor::new(Point::new(rect.x1, rect.y1))],
            text: None,
            style,
            group_id: None,
        };
        shape.sync_extent();
        shape
    }

    pub fn circle(id: ShapeId, center: Point, radius: f64, style: ShapeStyle) -> Self {
        let mut shape = Self {
            id,
            kind: ShapeKind::Circle,
            points: vec![Anchor::new(center), Anchor::new(center + Vec2::new(radius, 0.0))],
            text: None,
            style,
            group_id: None,
        };
        shape.sync_extent();
        shape
    }

    pub fn text(id: ShapeId, origin: Point, text: String, mut style: ShapeStyle) -> Self {
        style.fill = theme::shape::TEXT_FILL.to_string();
        Self {
            id,
            kind: ShapeKind::Text,
            points: vec![Anchor::new(origin)],
            text: Some(text),
            style,
            group_id: None,
        }
    }

    pub fn path(id: ShapeId, anchors: Vec<Anchor>, style: ShapeStyle) -> Self {
        Self {
            id,
            kind: ShapeKind::Path,
            points: anchors,
            text: None,
            style,
            group_id: None,
        }
    }

    /// Anchor positions
    pub fn anchor_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(|anchor| anchor.point)
    }

    /// Bounds of the shape's anchors
    pub fn anchor_bounds(&self) -> Option<Rect> {
        bounds_of(self.anchor_points())
    }

    /// Circle radius (distance from center to rim anchor)
    pub fn radius(&self) -> f64 {
        match self.points.as_slice() {
            [center, rim, ..] => center.point.distance(rim.point),
            _ => 0.0,
        }
    }

    /// Painted extent, used for hit-testing
    pub fn visual_bounds(&self) -> Option<Rect> {
        match self.kind {
            ShapeKind::Circle => {
                let center = self.points.first()?.point;
                let r = self.radius();
                Some(Rect::new(center.x - r, center.y - r, center.x + r, center.y + r))
            }
            ShapeKind::Text => {
                let origin = self.points.first()?.point;
                let chars = self.text.as_deref().map_or(0, |t| t.chars().count()) as f64;
                let width = chars * self.style.font_size * settings::shapes::TEXT_ADVANCE_FACTOR;
                let x0 = match self.style.text_align {
                    TextAlign::Left => origin.x,
                    TextAlign::Center => origin.x - width / 2.0,
                    TextAlign::Right => origin.x - width,
                };
                Some(Rect::new(x0, origin.y - self.style.font_size, x0 + width, origin.y))
            }
            ShapeKind::Path | ShapeKind::Rectangle => self.anchor_bounds(),
        }
    }

    /// Whether `pos` hits this shape, allowing `tolerance` around its extent
    pub fn hit(&self, pos: Point, tolerance: f64) -> bool {
        self.visual_bounds().is_some_and(|bounds| {
            let grown = bounds.inflate(tolerance, tolerance);
            pos.x >= grown.x0 && pos.x <= grown.x1 && pos.y >= grown.y0 && pos.y <= grown.y1
        })
    }

    pub fn translate(&mut self, delta: Vec2) {
        for anchor in &mut self.points {
            anchor.translate(delta);
        }
    }

    /// Refresh `style.width`/`style.height` from the anchors
    pub fn sync_extent(&mut self) {
        match self.kind {
            ShapeKind::Rectangle => {
                if let Some(bounds) = self.anchor_bounds() {
                    self.style.width = Some(bounds.width());
                    self.style.height = Some(bounds.height());
                }
            }
            ShapeKind::Circle => {
                let diameter = self.radius() * 2.0;
                self.style.width = Some(diameter);
                self.style.height = Some(diameter);
            }
            ShapeKind::Path | ShapeKind::Text => {}
        }
    }
}

/// Min/max over every anchor of every shape
pub fn bounds_of_shapes<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Option<Rect> {
    bounds_of(shapes.into_iter().flat_map(|shape| shape.anchor_points()))
}

// ===== Arrow =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowStyle {
    pub stroke: String,
    pub stroke_width: f64,
    pub arrow_size: f64,
}

impl From<&DrawingStyle> for ArrowStyle {
    fn from(style: &DrawingStyle) -> Self {
        Self {
            stroke: style.stroke.clone(),
            stroke_width: style.stroke_width,
            arrow_size: settings::arrow::HEAD_SIZE,
        }
    }
}

/// A curved connector with an arrowhead at `end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub id: ArrowId,
    pub start: Point,
    pub end: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control1: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control2: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub style: ArrowStyle,
}

impl Arrow {
    pub fn new(id: ArrowId, start: Point, end: Point, style: ArrowStyle) -> Self {
        let (control1, control2) = arrow_controls(start, end);
        Self {
            id,
            start,
            end,
            control1: Some(control1),
            control2: Some(control2),
            label: None,
            style,
        }
    }

    /// Control points, falling back to the derived ones
    pub fn controls(&self) -> (Point, Point) {
        let (c1, c2) = arrow_controls(self.start, self.end);
        (self.control1.unwrap_or(c1), self.control2.unwrap_or(c2))
    }
}

/// Derived control points giving a gentle S-curve from `start` to `end`
pub fn arrow_controls(start: Point, end: Point) -> (Point, Point) {
    let d = end - start;
    (
        Point::new(start.x + d.x / 2.0, start.y + d.y / 3.0),
        Point::new(start.x + d.x / 2.0, end.y - d.y / 3.0),
    )
}

// ===== Group / Layer / Guide =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub shapes: Vec<ShapeId>,
    /// Derived from the members' anchors, never edited directly
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub shapes: Vec<ShapeId>,
    pub visible: bool,
    pub locked: bool,
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            shapes: Vec::new(),
            visible: true,
            locked: false,
        }
    }

    /// Whether shapes on this layer respond to the pointer
    pub fn is_interactive(&self) -> bool {
        self.visible && !self.locked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    Horizontal,
    Vertical,
}

/// An alignment guide line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    pub orientation: GuideOrientation,
    pub position: f64,
    pub active: bool,
}
