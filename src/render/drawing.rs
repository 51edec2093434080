// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing helpers for each layer of the frame

use super::{DrawCommand, RenderList, Stroke};
use crate::editing::EditSession;
use crate::geometry::resize_handle_positions;
use crate::model::{Arrow, Guide, GuideOrientation, Shape, ShapeKind, TextAlign};
use crate::serialize::to_bezpath;
use crate::settings::{self, CanvasSettings};
use crate::theme;
use crate::tools::ToolId;
use kurbo::{BezPath, CubicBez, ParamCurve, Point, Rect, Vec2};
use std::collections::BTreeSet;
use std::f64::consts::PI;

/// Colors of `"none"` paint nothing
fn paint(color: &str) -> Option<String> {
    (color != "none").then(|| color.to_string())
}

// ===== Background =====

pub(super) fn background(canvas: &CanvasSettings, out: &mut RenderList) {
    out.push(DrawCommand::Clear {
        width: canvas.width,
        height: canvas.height,
        color: theme::canvas::BACKGROUND.to_string(),
    });

    if !canvas.show_grid || canvas.validate().is_err() {
        return;
    }
    let stroke = Stroke::solid(theme::canvas::GRID_LINE, 1.0);
    let columns = (canvas.width / canvas.grid_size).floor() as usize;
    for i in 0..=columns {
        let x = i as f64 * canvas.grid_size;
        out.push(DrawCommand::Line {
            from: Point::new(x, 0.0),
            to: Point::new(x, canvas.height),
            stroke: stroke.clone(),
        });
    }
    let rows = (canvas.height / canvas.grid_size).floor() as usize;
    for i in 0..=rows {
        let y = i as f64 * canvas.grid_size;
        out.push(DrawCommand::Line {
            from: Point::new(0.0, y),
            to: Point::new(canvas.width, y),
            stroke: stroke.clone(),
        });
    }
}

pub(super) fn guides(guides: &[Guide], canvas: &CanvasSettings, out: &mut RenderList) {
    for guide in guides {
        // Inactive guides stay visible but faint
        let width = if guide.active { 1.0 } else { 0.5 };
        let (from, to) = match guide.orientation {
            GuideOrientation::Horizontal => (
                Point::new(0.0, guide.position),
                Point::new(canvas.width, guide.position),
            ),
            GuideOrientation::Vertical => (
                Point::new(guide.position, 0.0),
                Point::new(guide.position, canvas.height),
            ),
        };
        out.push(DrawCommand::Line {
            from,
            to,
            stroke: Stroke::solid(theme::canvas::GUIDE_LINE, width),
        });
    }
}

// ===== Committed Content =====

pub(super) fn shape(shape: &Shape, out: &mut RenderList) {
    let style = &shape.style;
    let stroke = paint(&style.stroke).map(|color| {
        if style.dashed {
            Stroke::dashed(color, style.stroke_width, settings::render::PREVIEW_DASH)
        } else {
            Stroke::solid(color, style.stroke_width)
        }
    });

    match shape.kind {
        ShapeKind::Rectangle => {
            if let Some(rect) = shape.anchor_bounds() {
                out.push(DrawCommand::Rect {
                    rect,
                    corner_radius: style.corner_radius,
                    fill: paint(&style.fill),
                    stroke,
                });
            }
        }
        ShapeKind::Circle => {
            if let Some(center) = shape.points.first() {
                out.push(DrawCommand::Circle {
                    center: center.point,
                    radius: shape.radius(),
                    fill: paint(&style.fill),
                    stroke,
                });
            }
        }
        ShapeKind::Text => {
            if let (Some(origin), Some(text)) = (shape.points.first(), shape.text.as_ref()) {
                out.push(DrawCommand::Text {
                    origin: origin.point,
                    text: text.clone(),
                    font_family: style.font_family.clone(),
                    font_size: style.font_size,
                    align: style.text_align,
                    color: style.fill.clone(),
                });
            }
        }
        ShapeKind::Path => {
            let closed = shape.points.last().is_some_and(|anchor| anchor.connected);
            out.push(DrawCommand::Path {
                path: to_bezpath(&shape.points),
                fill: if closed { paint(&style.fill) } else { None },
                stroke,
            });
        }
    }
}

pub(super) fn arrow(arrow: &Arrow, out: &mut RenderList) {
    let (c1, c2) = arrow.controls();
    let stroke = Stroke::solid(arrow.style.stroke.as_str(), arrow.style.stroke_width);
    arrow_commands(arrow.start, c1, c2, arrow.end, &stroke, arrow.style.arrow_size, out);

    if let Some(label) = &arrow.label {
        let mid = CubicBez::new(arrow.start, c1, c2, arrow.end).eval(0.5);
        out.push(DrawCommand::Text {
            origin: mid - Vec2::new(0.0, settings::arrow::LABEL_OFFSET),
            text: label.clone(),
            font_family: settings::shapes::DEFAULT_FONT_FAMILY.to_string(),
            font_size: settings::shapes::DEFAULT_FONT_SIZE,
            align: TextAlign::Center,
            color: theme::shape::ARROW_LABEL.to_string(),
        });
    }
}

/// A cubic connector plus a filled arrowhead at `end`, pointing along the
/// curve's final tangent.
pub fn arrow_commands(
    start: Point,
    control1: Point,
    control2: Point,
    end: Point,
    stroke: &Stroke,
    head_size: f64,
    out: &mut RenderList,
) {
    let mut curve = BezPath::new();
    curve.move_to(start);
    curve.curve_to(control1, control2, end);
    out.push(DrawCommand::Path {
        path: curve,
        fill: None,
        stroke: Some(stroke.clone()),
    });

    // Degenerate tangent falls back to the chord
    let tangent = if end != control2 { end - control2 } else { end - start };
    let angle = tangent.atan2();
    let wing = |offset: f64| end - Vec2::from_angle(angle + offset) * head_size;

    let mut head = BezPath::new();
    head.move_to(end);
    head.line_to(wing(-PI / 6.0));
    head.line_to(wing(PI / 6.0));
    head.close_path();
    out.push(DrawCommand::Path {
        path: head,
        fill: Some(stroke.color.clone()),
        stroke: Some(Stroke::solid(stroke.color.as_str(), stroke.width)),
    });
}

// ===== Selection =====

pub(super) fn selection(session: &EditSession, out: &mut RenderList) {
    if session.selection.is_empty() {
        return;
    }
    let document = &session.document;
    let padding = settings::shapes::GROUP_OUTLINE_PADDING;
    let outline = Stroke::dashed(theme::selection::OUTLINE, 1.0, settings::render::PREVIEW_DASH);

    let groups: BTreeSet<_> = session
        .selection
        .iter()
        .filter_map(|id| document.shape(*id)?.group_id)
        .collect();

    // Ungrouped shapes get their own outline
    for id in session.selection.iter() {
        let Some(shape) = document.shape(*id) else {
            continue;
        };
        if shape.group_id.is_some() {
            continue;
        }
        if let Some(bounds) = shape.visual_bounds() {
            out.push(DrawCommand::Rect {
                rect: bounds.inflate(padding, padding),
                corner_radius: 0.0,
                fill: None,
                stroke: Some(outline.clone()),
            });
        }
    }

    // Handles only for a group the select tool could actually resize
    let resizable = groups.len() == 1;
    for group in groups.into_iter().filter_map(|id| document.group_by_id(id)) {
        out.push(DrawCommand::Rect {
            rect: group.bounds.inflate(padding, padding),
            corner_radius: 0.0,
            fill: None,
            stroke: Some(outline.clone()),
        });
        if !resizable {
            continue;
        }
        let size = settings::shapes::RESIZE_HANDLE_SIZE;
        for (_, center) in resize_handle_positions(group.bounds) {
            out.push(DrawCommand::Rect {
                rect: Rect::from_center_size(center, (size, size)),
                corner_radius: 0.0,
                fill: Some(theme::selection::HANDLE_FILL.to_string()),
                stroke: Some(Stroke::solid(theme::selection::HANDLE_STROKE, 1.0)),
            });
        }
    }
}

// ===== Pen Path =====

pub(super) fn pen_path(session: &EditSession, tool: ToolId, out: &mut RenderList) {
    let anchors = session.anchors();
    if anchors.len() >= 2 {
        out.push(DrawCommand::Path {
            path: to_bezpath(anchors),
            fill: anchors.is_closed().then(|| theme::path::FILL.to_string()),
            stroke: Some(Stroke::solid(theme::path::STROKE, settings::shapes::DEFAULT_STROKE_WIDTH)),
        });
    }

    if tool != ToolId::Pen || !session.is_drawing() {
        return;
    }
    let (Some(pointer), Some(last)) = (session.pointer, anchors.last()) else {
        return;
    };

    if session.closes_path_at(pointer)
        && let Some(first) = anchors.first()
    {
        let stroke = Stroke::dashed(theme::path::STROKE, 1.0, settings::render::CLOSING_DASH);
        match last.handle_out_pos() {
            Some(control) => {
                let mut segment = BezPath::new();
                segment.move_to(last.point);
                segment.curve_to(control, first.point, first.point);
                out.push(DrawCommand::Path {
                    path: segment,
                    fill: None,
                    stroke: Some(stroke),
                });
            }
            None => out.push(DrawCommand::Line {
                from: last.point,
                to: first.point,
                stroke,
            }),
        }
        out.push(DrawCommand::Circle {
            center: first.point,
            radius: settings::hit::CLOSE_PATH,
            fill: None,
            stroke: Some(Stroke::dashed(
                theme::anchor::FIRST_WHILE_DRAWING,
                1.0,
                settings::render::CLOSING_DASH,
            )),
        });
        return;
    }

    let stroke = Stroke::solid(theme::path::STROKE, 1.0);
    match last.handle_out_pos() {
        Some(control) => {
            let mut segment = BezPath::new();
            segment.move_to(last.point);
            segment.curve_to(control, pointer, pointer);
            out.push(DrawCommand::Path {
                path: segment,
                fill: None,
                stroke: Some(stroke),
            });
        }
        None => out.push(DrawCommand::Line {
            from: last.point,
            to: pointer,
            stroke,
        }),
    }
}

pub(super) fn handles_and_anchors(session: &EditSession, out: &mut RenderList) {
    let anchors = session.anchors();
    if anchors.is_empty() {
        return;
    }

    // Handle lines and dots
    for anchor in anchors.iter() {
        for handle in [anchor.handle_in_pos(), anchor.handle_out_pos()].into_iter().flatten() {
            out.push(DrawCommand::Line {
                from: anchor.point,
                to: handle,
                stroke: Stroke::solid(theme::handle::LINE, 1.0),
            });
            out.push(DrawCommand::Circle {
                center: handle,
                radius: settings::render::HANDLE_RADIUS,
                fill: Some(theme::handle::DOT.to_string()),
                stroke: None,
            });
        }
    }

    // Anchor dots on top
    let selected = session.anchor_selection.map(|target| target.index());
    let hovered = session.hovered_anchor();
    let drawing = session.is_drawing();
    for (i, anchor) in anchors.iter().enumerate() {
        let color = if selected == Some(i) || hovered == Some(i) {
            theme::anchor::HIGHLIGHT
        } else if i == 0 && drawing {
            theme::anchor::FIRST_WHILE_DRAWING
        } else {
            theme::anchor::DOT
        };
        out.push(DrawCommand::Circle {
            center: anchor.point,
            radius: settings::render::ANCHOR_RADIUS,
            fill: Some(color.to_string()),
            stroke: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrowhead_points_back_along_tangent() {
        let mut out = RenderList::new();
        let stroke = Stroke::solid("#ffffff", 2.0);
        arrow_commands(
            Point::ZERO,
            Point::new(50.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(100.0, 0.0),
            &stroke,
            8.0,
            &mut out,
        );
        assert_eq!(out.len(), 2);
        let DrawCommand::Path { path, fill, .. } = &out[1] else {
            panic!("expected arrowhead path");
        };
        assert_eq!(fill.as_deref(), Some("#ffffff"));
        let bounds = kurbo::Shape::bounding_box(path);
        assert!((bounds.x0 - (100.0 - 8.0 * (PI / 6.0).cos())).abs() < 1e-9);
        assert!((bounds.x1 - 100.0).abs() < 1e-9);
        assert!((bounds.height() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_none_fill_paints_nothing() {
        assert_eq!(paint("none"), None);
        assert_eq!(paint("#123456").as_deref(), Some("#123456"));
    }

    #[test]
    fn test_open_saved_path_not_filled() {
        use crate::model::{Anchor, DrawingStyle, ShapeId, ShapeStyle};
        let shape = Shape::path(
            ShapeId::from(1),
            vec![Anchor::new(Point::ZERO), Anchor::new(Point::new(10.0, 0.0))],
            ShapeStyle::from(&DrawingStyle::default()),
        );
        let mut out = RenderList::new();
        super::shape(&shape, &mut out);
        assert!(matches!(&out[0], DrawCommand::Path { fill: None, .. }));
    }
}
