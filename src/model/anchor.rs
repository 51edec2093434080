// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Anchors and the copy-on-write anchor list.
//!
//! An [`AnchorList`] is never mutated once shared: every operation builds
//! a fresh list and returns it, which is what lets the undo history hold
//! plain clones as snapshots. Operations that can miss their target return
//! `Option<AnchorList>`, with `None` meaning "nothing was hit, nothing
//! changed".

use crate::geometry::{distance_to_segment, synthesize_handles};
use crate::settings;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

// ===== Anchor =====

/// Whether an anchor is an on-path vertex or a free control point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorKind {
    #[default]
    Point,
    Control,
}

/// Which of an anchor's two handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    In,
    Out,
}

impl HandleSide {
    pub fn opposite(self) -> Self {
        match self {
            HandleSide::In => HandleSide::Out,
            HandleSide::Out => HandleSide::In,
        }
    }
}

/// One vertex of an authored path.
///
/// Handles are stored as offsets from `point`, so moving the anchor moves
/// its handles with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub point: Point,
    #[serde(default)]
    pub kind: AnchorKind,
    #[serde(default)]
    pub smooth: bool,
    /// Set on the final anchor of a path that closes back to the first
    #[serde(default)]
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_in: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_out: Option<Vec2>,
}

impl Anchor {
    /// A plain corner anchor with no handles
    pub fn new(point: Point) -> Self {
        Self {
            point,
            kind: AnchorKind::Point,
            smooth: false,
            connected: false,
            handle_in: None,
            handle_out: None,
        }
    }

    pub fn handle(&self, side: HandleSide) -> Option<Vec2> {
        match side {
            HandleSide::In => self.handle_in,
            HandleSide::Out => self.handle_out,
        }
    }

    fn handle_mut(&mut self, side: HandleSide) -> &mut Option<Vec2> {
        match side {
            HandleSide::In => &mut self.handle_in,
            HandleSide::Out => &mut self.handle_out,
        }
    }

    /// Absolute position of the incoming handle
    pub fn handle_in_pos(&self) -> Option<Point> {
        self.handle_in.map(|offset| self.point + offset)
    }

    /// Absolute position of the outgoing handle
    pub fn handle_out_pos(&self) -> Option<Point> {
        self.handle_out.map(|offset| self.point + offset)
    }

    pub fn handle_pos(&self, side: HandleSide) -> Option<Point> {
        self.handle(side).map(|offset| self.point + offset)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.point += delta;
    }
}

// ===== AnchorList =====

/// An immutable, cheaply clonable list of anchors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorList {
    inner: Arc<Vec<Anchor>>,
}

impl Deref for AnchorList {
    type Target = [Anchor];

    fn deref(&self) -> &[Anchor] {
        &self.inner
    }
}

impl From<Vec<Anchor>> for AnchorList {
    fn from(anchors: Vec<Anchor>) -> Self {
        Self {
            inner: Arc::new(anchors),
        }
    }
}

impl FromIterator<Anchor> for AnchorList {
    fn from_iter<T: IntoIterator<Item = Anchor>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl AnchorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last anchor closes the path
    pub fn is_closed(&self) -> bool {
        self.last().is_some_and(|anchor| anchor.connected)
    }

    /// Whether two lists share the same storage
    pub fn ptr_eq(&self, other: &AnchorList) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn to_vec(&self) -> Vec<Anchor> {
        (*self.inner).clone()
    }

    /// Build a new list by editing a private copy of this one
    fn edited(&self, edit: impl FnOnce(&mut Vec<Anchor>)) -> AnchorList {
        let mut anchors = self.to_vec();
        edit(&mut anchors);
        AnchorList::from(anchors)
    }

    // ===== Lookups =====

    /// Index of the anchor nearest to `pos` within `tolerance`
    pub fn anchor_near(&self, pos: Point, tolerance: f64) -> Option<usize> {
        self.iter()
            .enumerate()
            .map(|(index, anchor)| (index, anchor.point.distance(pos)))
            .filter(|(_, dist)| *dist < tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// First handle within `tolerance` of `pos`, testing each anchor's
    /// incoming handle before its outgoing one
    pub fn handle_near(&self, pos: Point, tolerance: f64) -> Option<(usize, HandleSide)> {
        self.iter().enumerate().find_map(|(index, anchor)| {
            [HandleSide::In, HandleSide::Out].into_iter().find_map(|side| {
                anchor
                    .handle_pos(side)
                    .filter(|handle| handle.distance(pos) < tolerance)
                    .map(|_| (index, side))
            })
        })
    }

    /// Nearest consecutive-pair segment to `pos`: `(index of the segment's
    /// end anchor, distance)`
    pub fn nearest_segment(&self, pos: Point) -> Option<(usize, f64)> {
        self.windows(2)
            .enumerate()
            .map(|(i, pair)| (i + 1, distance_to_segment(pos, pair[0].point, pair[1].point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    // ===== Operations =====

    /// Append an anchor at `point`.
    ///
    /// With `smooth` held and a previous anchor present, the previous
    /// anchor's outgoing handle and the new anchor's incoming handle are
    /// synthesized along the segment.
    pub fn add_anchor(&self, point: Point, smooth: bool) -> AnchorList {
        self.edited(|anchors| {
            let mut anchor = Anchor::new(point);
            anchor.smooth = smooth;
            if smooth && let Some(prev) = anchors.last_mut() {
                let handles = synthesize_handles(prev.point, point);
                prev.handle_out = Some(handles.handle_out);
                anchor.handle_in = Some(handles.handle_in);
            }
            anchors.push(anchor);
        })
    }

    /// Insert a plain anchor on the nearest segment when `point` lies
    /// within the hit tolerance of it.
    pub fn insert_anchor(&self, point: Point) -> Option<AnchorList> {
        let (index, dist) = self.nearest_segment(point)?;
        if dist >= settings::hit::TOLERANCE {
            return None;
        }
        Some(self.edited(|anchors| anchors.insert(index, Anchor::new(point))))
    }

    /// Remove the anchor nearest to `point` within the hit tolerance.
    ///
    /// Neighbor handles are left as they are. Removing the closing anchor
    /// moves the `connected` flag onto the new last anchor when enough
    /// anchors remain to stay closed.
    pub fn remove_anchor(&self, point: Point) -> Option<AnchorList> {
        let index = self.anchor_near(point, settings::hit::TOLERANCE)?;
        Some(self.edited(|anchors| {
            let removed = anchors.remove(index);
            if removed.connected
                && anchors.len() > settings::pen::MIN_ANCHORS_TO_CLOSE
                && let Some(last) = anchors.last_mut()
            {
                last.connected = true;
            }
        }))
    }

    /// Flip the `smooth` flag of the anchor nearest to `point`.
    ///
    /// Turning smooth on adds horizontal handles where missing; turning it
    /// off removes both handles.
    pub fn toggle_smooth(&self, point: Point) -> Option<AnchorList> {
        let index = self.anchor_near(point, settings::hit::TOLERANCE)?;
        let offset = settings::pen::CONVERT_HANDLE_OFFSET;
        Some(self.edited(|anchors| {
            let anchor = &mut anchors[index];
            anchor.smooth = !anchor.smooth;
            if anchor.smooth {
                anchor.handle_in.get_or_insert(Vec2::new(-offset, 0.0));
                anchor.handle_out.get_or_insert(Vec2::new(offset, 0.0));
            } else {
                anchor.handle_in = None;
                anchor.handle_out = None;
            }
        }))
    }

    /// Mark the last anchor as closing the path.
    pub fn close_path(&self) -> Option<AnchorList> {
        if self.len() <= settings::pen::MIN_ANCHORS_TO_CLOSE || self.is_closed() {
            return None;
        }
        Some(self.edited(|anchors| {
            if let Some(last) = anchors.last_mut() {
                last.connected = true;
            }
        }))
    }

    /// Move an anchor to `point`; its handles follow.
    pub fn move_anchor(&self, index: usize, point: Point) -> Option<AnchorList> {
        self.get(index)?;
        Some(self.edited(|anchors| anchors[index].point = point))
    }

    /// Move one handle to the absolute position `point`, keeping its anchor
    /// fixed. On a smooth anchor the opposite handle keeps its length and is
    /// rotated to stay collinear.
    pub fn move_handle(&self, index: usize, side: HandleSide, point: Point) -> Option<AnchorList> {
        self.get(index)?.handle(side)?;
        Some(self.edited(|anchors| {
            let anchor = &mut anchors[index];
            let offset = point - anchor.point;
            *anchor.handle_mut(side) = Some(offset);
            if anchor.smooth
                && let Some(opposite) = anchor.handle(side.opposite())
            {
                *anchor.handle_mut(side.opposite()) = Some(constrained_opposite(offset, opposite));
            }
        }))
    }
}

// ===== PRIVATE HELPERS =====

/// Rotate `opposite` to point directly away from `moved`, keeping its length
fn constrained_opposite(moved: Vec2, opposite: Vec2) -> Vec2 {
    let length = opposite.length();
    if moved.hypot2() == 0.0 {
        return opposite;
    }
    -moved.normalize() * length
}
