// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Path serialization.
//!
//! Produces standard SVG path data: `M x y`, then `C h1x h1y, h2x h2y, x y`
//! for segments with both handles and `L x y` otherwise, and a trailing
//! `Z` when the last anchor closes the path.

use crate::model::Anchor;
use kurbo::BezPath;
use std::fmt::Write;

/// Serialize anchors to path data. Empty input gives an empty string.
pub fn to_path_string(anchors: &[Anchor]) -> String {
    let mut out = String::new();
    let Some(first) = anchors.first() else {
        return out;
    };
    // Writing into a String cannot fail.
    let _ = write!(out, "M {} {}", first.point.x, first.point.y);
    for pair in anchors.windows(2) {
        let (prev, anchor) = (&pair[0], &pair[1]);
        match (prev.handle_out_pos(), anchor.handle_in_pos()) {
            (Some(c1), Some(c2)) => {
                let _ = write!(
                    out,
                    " C {} {}, {} {}, {} {}",
                    c1.x, c1.y, c2.x, c2.y, anchor.point.x, anchor.point.y
                );
            }
            _ => {
                let _ = write!(out, " L {} {}", anchor.point.x, anchor.point.y);
            }
        }
    }
    if anchors.last().is_some_and(|anchor| anchor.connected) {
        out.push_str(" Z");
    }
    out
}

/// Build the kurbo path matching [`to_path_string`]
pub fn to_bezpath(anchors: &[Anchor]) -> BezPath {
    let mut path = BezPath::new();
    let Some(first) = anchors.first() else {
        return path;
    };
    path.move_to(first.point);
    for pair in anchors.windows(2) {
        let (prev, anchor) = (&pair[0], &pair[1]);
        match (prev.handle_out_pos(), anchor.handle_in_pos()) {
            (Some(c1), Some(c2)) => path.curve_to(c1, c2, anchor.point),
            _ => path.line_to(anchor.point),
        }
    }
    if anchors.last().is_some_and(|anchor| anchor.connected) {
        path.close_path();
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnchorList;
    use kurbo::{PathEl, Point};

    fn approx_pt(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-6
    }

    /// End points of each drawing command, plus whether the path closes
    fn parse_back(data: &str) -> (Vec<Point>, bool) {
        let path = BezPath::from_svg(data).unwrap();
        let mut points = Vec::new();
        let mut closed = false;
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => points.push(p),
                PathEl::CurveTo(_, _, p) => points.push(p),
                PathEl::QuadTo(_, p) => points.push(p),
                PathEl::ClosePath => closed = true,
            }
        }
        (points, closed)
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_path_string(&[]), "");
        assert!(to_bezpath(&[]).elements().is_empty());
    }

    #[test]
    fn test_lines_and_close() {
        let anchors = AnchorList::new()
            .add_anchor(Point::new(0.0, 0.0), false)
            .add_anchor(Point::new(10.0, 0.0), false)
            .add_anchor(Point::new(10.0, 10.0), false)
            .close_path()
            .unwrap();
        assert_eq!(to_path_string(&anchors), "M 0 0 L 10 0 L 10 10 Z");
    }

    #[test]
    fn test_curve_needs_both_handles() {
        let anchors = AnchorList::new()
            .add_anchor(Point::new(0.0, 0.0), false)
            .add_anchor(Point::new(30.0, 0.0), true);
        assert_eq!(to_path_string(&anchors), "M 0 0 C 10 0, 20 0, 30 0");

        let corner = anchors.toggle_smooth(Point::new(30.0, 0.0)).unwrap();
        let data = to_path_string(&corner.add_anchor(Point::new(60.0, 0.0), false));
        assert!(data.ends_with("L 60 0"));
    }

    #[test]
    fn test_round_trip_open_and_closed() {
        let anchors = AnchorList::new()
            .add_anchor(Point::new(12.5, 40.0), false)
            .add_anchor(Point::new(100.0, 40.0), true)
            .add_anchor(Point::new(100.0, 140.0), false)
            .add_anchor(Point::new(-20.0, 90.0), true)
            .toggle_smooth(Point::new(100.0, 140.0))
            .unwrap();

        let (points, closed) = parse_back(&to_path_string(&anchors));
        assert!(!closed);
        assert_eq!(points.len(), anchors.len());
        for (parsed, anchor) in points.iter().zip(anchors.iter()) {
            assert!(approx_pt(*parsed, anchor.point));
        }

        let closed_anchors = anchors.close_path().unwrap();
        let (points, closed) = parse_back(&to_path_string(&closed_anchors));
        assert!(closed);
        assert_eq!(points.len(), closed_anchors.len());
    }

    #[test]
    fn test_bezpath_matches_string() {
        let anchors = AnchorList::new()
            .add_anchor(Point::new(0.0, 0.0), false)
            .add_anchor(Point::new(30.0, 0.0), true)
            .add_anchor(Point::new(30.0, 30.0), false)
            .close_path()
            .unwrap();
        let parsed = BezPath::from_svg(&to_path_string(&anchors)).unwrap();
        assert_eq!(parsed.elements().len(), to_bezpath(&anchors).elements().len());
    }
}
