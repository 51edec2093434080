// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Geometry kernel: pure functions for hit-testing, handle synthesis,
//! bounding boxes and resize math.
//!
//! Nothing in here holds state. Both the tools (hit-testing) and the
//! render driver (preview geometry) call into this module.

use crate::settings;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

// ===== Distances =====

/// Distance from `p` to the segment `a`-`b`, clamped to the segment.
///
/// A degenerate segment (`a == b`) measures the distance to `a`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.hypot2();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

// ===== Handle Synthesis =====

/// Handle offsets produced for a smooth segment between two anchors.
///
/// Both offsets are relative to their owning anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesizedHandles {
    /// Outgoing handle of the previous anchor
    pub handle_out: Vec2,
    /// Incoming handle of the new anchor
    pub handle_in: Vec2,
}

/// Synthesize handles along the `prev` -> `next` tangent.
///
/// Each handle sits a third of the inter-anchor distance from its anchor,
/// pointing toward the other anchor.
pub fn synthesize_handles(prev: Point, next: Point) -> SynthesizedHandles {
    let reach = (next - prev) / settings::pen::SMOOTH_HANDLE_DIVISOR;
    SynthesizedHandles {
        handle_out: reach,
        handle_in: -reach,
    }
}

// ===== Bounds =====

/// Axis-aligned bounds of a set of points, `None` when empty.
pub fn bounds_of(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
    let mut points = points.into_iter();
    let first = points.next()?;
    Some(points.fold(Rect::from_points(first, first), |rect, p| {
        rect.union_pt(p)
    }))
}

// ===== Resize Handles =====

/// One of the eight resize handles around a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl ResizeHandle {
    /// All handles in hit-test order
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Left,
        ResizeHandle::Right,
        ResizeHandle::BottomLeft,
        ResizeHandle::Bottom,
        ResizeHandle::BottomRight,
    ];

    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::Left | ResizeHandle::BottomLeft
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopRight | ResizeHandle::Right | ResizeHandle::BottomRight
        )
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::Top | ResizeHandle::TopRight
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeHandle::BottomLeft | ResizeHandle::Bottom | ResizeHandle::BottomRight
        )
    }

    /// Center of this handle on `bounds`
    pub fn position(self, bounds: Rect) -> Point {
        let x = if self.moves_left() {
            bounds.x0
        } else if self.moves_right() {
            bounds.x1
        } else {
            (bounds.x0 + bounds.x1) / 2.0
        };
        let y = if self.moves_top() {
            bounds.y0
        } else if self.moves_bottom() {
            bounds.y1
        } else {
            (bounds.y0 + bounds.y1) / 2.0
        };
        Point::new(x, y)
    }
}

/// Centers of all eight handles, in hit-test order.
pub fn resize_handle_positions(bounds: Rect) -> [(ResizeHandle, Point); 8] {
    ResizeHandle::ALL.map(|handle| (handle, handle.position(bounds)))
}

/// Which resize handle box (if any) contains `p`. Box edges are inclusive
/// and the first hit in [`ResizeHandle::ALL`] order wins.
pub fn resize_handle_at(p: Point, bounds: Rect) -> Option<ResizeHandle> {
    let half = settings::shapes::RESIZE_HANDLE_SIZE / 2.0;
    resize_handle_positions(bounds)
        .into_iter()
        .find(|(_, center)| (p.x - center.x).abs() <= half && (p.y - center.y).abs() <= half)
        .map(|(handle, _)| handle)
}

/// Bounds after dragging `handle` by `delta`.
///
/// Only the edges the handle controls move. Each moving edge is clamped so
/// the extent never drops below the minimum resize extent, so a drag past
/// the opposite edge pins instead of inverting. An axis that starts out
/// thinner than the minimum cannot be scaled and stays as it is.
pub fn resized_bounds(start: Rect, handle: ResizeHandle, delta: Vec2) -> Rect {
    let min = settings::shapes::MIN_RESIZE_EXTENT;
    let mut rect = start;
    if start.width() >= min {
        if handle.moves_right() {
            rect.x1 = (start.x1 + delta.x).max(start.x0 + min);
        }
        if handle.moves_left() {
            rect.x0 = (start.x0 + delta.x).min(start.x1 - min);
        }
    }
    if start.height() >= min {
        if handle.moves_bottom() {
            rect.y1 = (start.y1 + delta.y).max(start.y0 + min);
        }
        if handle.moves_top() {
            rect.y0 = (start.y0 + delta.y).min(start.y1 - min);
        }
    }
    rect
}

/// Map `p` from `from` into `to`, scaling each axis about the box origin.
///
/// A degenerate axis (zero extent) cannot be scaled, so points on it are
/// translated by the change of the origin instead.
pub fn map_point(p: Point, from: Rect, to: Rect) -> Point {
    fn axis(v: f64, from0: f64, from1: f64, to0: f64, to1: f64) -> f64 {
        let extent = from1 - from0;
        if extent.abs() < f64::EPSILON {
            v + (to0 - from0)
        } else {
            to0 + (v - from0) * (to1 - to0) / extent
        }
    }
    Point::new(
        axis(p.x, from.x0, from.x1, to.x0, to.x1),
        axis(p.y, from.y0, from.y1, to.y0, to.y1),
    )
}

// ===== Snapping =====

/// Snap `value` to the nearest candidate within `distance`.
pub fn snap_coordinate(value: f64, candidates: impl IntoIterator<Item = f64>, distance: f64) -> f64 {
    candidates
        .into_iter()
        .map(|c| (c, (c - value).abs()))
        .filter(|(_, d)| *d <= distance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
        .unwrap_or(value)
}
