// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Grouping, group resize and alignment.

use super::Document;
use crate::error::EditError;
use crate::geometry::{ResizeHandle, map_point, resized_bounds};
use crate::model::anchor::Anchor;
use crate::model::entity_id::{GroupId, ShapeId};
use crate::model::shape::{Group, bounds_of_shapes};
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Edge or center line shapes are aligned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

/// Group geometry captured when a resize gesture starts.
///
/// Every pointer move maps the captured anchors from `start_bounds` into
/// the new bounds, so rounding never accumulates across moves.
#[derive(Debug, Clone)]
pub struct ResizeSnapshot {
    pub group: GroupId,
    pub start_bounds: Rect,
    shapes: Vec<(ShapeId, Vec<Anchor>)>,
}

impl Document {
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group_by_id(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    /// Group the given shapes. Needs at least two existing shapes; members
    /// leave any group they were in before.
    pub fn group(&mut self, ids: &[ShapeId]) -> Option<GroupId> {
        let members: Vec<ShapeId> = ids
            .iter()
            .copied()
            .filter(|id| self.shapes.contains_key(id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if members.len() < 2 {
            tracing::debug!("Group needs at least 2 shapes, got {}", members.len());
            return None;
        }

        for group in &mut self.groups {
            group.shapes.retain(|id| !members.contains(id));
        }

        let id = self.ids.next();
        for member in &members {
            if let Some(shape) = self.shapes.get_mut(member) {
                shape.group_id = Some(id);
            }
        }
        self.groups.push(Group {
            id,
            shapes: members,
            bounds: Rect::ZERO,
        });
        self.refresh_groups();
        tracing::debug!("Created {}", id);
        Some(id)
    }

    /// Take the given shapes out of their groups. Groups left empty are
    /// deleted; shapes are never deleted. Returns how many shapes left a
    /// group.
    pub fn ungroup(&mut self, ids: &[ShapeId]) -> usize {
        let mut released = 0;
        for id in ids {
            if let Some(shape) = self.shapes.get_mut(id)
                && shape.group_id.take().is_some()
            {
                released += 1;
            }
        }
        for group in &mut self.groups {
            group.shapes.retain(|id| !ids.contains(id));
        }
        self.refresh_groups();
        released
    }

    /// Recompute every group's bounds from its members' anchors and drop
    /// groups with no members left.
    pub(crate) fn refresh_groups(&mut self) {
        let shapes = &self.shapes;
        self.groups.retain_mut(|group| {
            group.shapes.retain(|id| shapes.contains_key(id));
            match bounds_of_shapes(group.shapes.iter().filter_map(|id| shapes.get(id))) {
                Some(bounds) => {
                    group.bounds = bounds;
                    true
                }
                None => false,
            }
        });
    }

    // ===== Resize =====

    /// The group a resize of `selection` would act on.
    ///
    /// `Ok(None)` when no selected shape is grouped. A selection touching
    /// more than one group is rejected instead of picking one arbitrarily.
    pub fn resize_target(&self, selection: &[ShapeId]) -> Result<Option<GroupId>, EditError> {
        let groups: BTreeSet<GroupId> = selection
            .iter()
            .filter_map(|id| self.shapes.get(id)?.group_id)
            .collect();
        match groups.len() {
            0 => Ok(None),
            1 => Ok(groups.into_iter().next()),
            count => Err(EditError::AmbiguousResizeTarget { count }),
        }
    }

    /// Capture a group's geometry at the start of a resize gesture
    pub fn begin_resize(&self, group: GroupId) -> Result<ResizeSnapshot, EditError> {
        let found = self.group_by_id(group).ok_or(EditError::UnknownGroup(group))?;
        let shapes = found
            .shapes
            .iter()
            .filter_map(|id| Some((*id, self.shapes.get(id)?.points.clone())))
            .collect();
        Ok(ResizeSnapshot {
            group,
            start_bounds: found.bounds,
            shapes,
        })
    }

    /// Resize a group by dragging `handle` by `delta` from where the gesture
    /// started. Member anchors are scaled away from the fixed edges and the
    /// group bounds recomputed. Returns the new bounds.
    pub fn apply_resize(&mut self, snapshot: &ResizeSnapshot, handle: ResizeHandle, delta: Vec2) -> Option<Rect> {
        let target = resized_bounds(snapshot.start_bounds, handle, delta);
        for (id, anchors) in &snapshot.shapes {
            if let Some(shape) = self.shapes.get_mut(id) {
                shape.points = anchors
                    .iter()
                    .map(|anchor| Anchor {
                        point: map_point(anchor.point, snapshot.start_bounds, target),
                        ..anchor.clone()
                    })
                    .collect();
                shape.sync_extent();
            }
        }
        self.refresh_groups();
        self.group_by_id(snapshot.group).map(|group| group.bounds)
    }

    /// Put every member of a resize snapshot back where it started
    pub fn restore_resize(&mut self, snapshot: &ResizeSnapshot) {
        for (id, anchors) in &snapshot.shapes {
            if let Some(shape) = self.shapes.get_mut(id) {
                shape.points = anchors.clone();
                shape.sync_extent();
            }
        }
        self.refresh_groups();
    }

    // ===== Alignment =====

    /// Align shapes to an edge or center line of their combined extent.
    /// Needs at least two shapes. Returns whether anything moved.
    pub fn align(&mut self, ids: &[ShapeId], alignment: Alignment) -> bool {
        let extents: Vec<(ShapeId, Rect)> = ids
            .iter()
            .filter_map(|id| Some((*id, self.shapes.get(id)?.visual_bounds()?)))
            .collect();
        if extents.len() < 2 {
            return false;
        }
        let Some(all) = extents.iter().map(|(_, rect)| *rect).reduce(|a, b| a.union(b)) else {
            return false;
        };

        let mut moved = false;
        for (id, rect) in extents {
            let delta = match alignment {
                Alignment::Left => Vec2::new(all.x0 - rect.x0, 0.0),
                Alignment::Center => Vec2::new(all.center().x - rect.center().x, 0.0),
                Alignment::Right => Vec2::new(all.x1 - rect.x1, 0.0),
                Alignment::Top => Vec2::new(0.0, all.y0 - rect.y0),
                Alignment::Middle => Vec2::new(0.0, all.center().y - rect.center().y),
                Alignment::Bottom => Vec2::new(0.0, all.y1 - rect.y1),
            };
            if delta != Vec2::ZERO
                && let Some(shape) = self.shapes.get_mut(&id)
            {
                shape.translate(delta);
                moved = true;
            }
        }
        self.refresh_groups();
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::tests::add_rect;
    use crate::model::shape::bounds_of_shapes;
    use kurbo::Point;

    fn member_bounds(doc: &Document, group: GroupId) -> Rect {
        let group = doc.group_by_id(group).unwrap();
        bounds_of_shapes(group.shapes.iter().map(|id| doc.shape(*id).unwrap())).unwrap()
    }

    #[test]
    fn test_group_requires_two_shapes() {
        let mut doc = Document::new();
        let a = add_rect(&mut doc, (0.0, 0.0), (10.0, 10.0));
        assert!(doc.group(&[a]).is_none());
        assert!(doc.group(&[a, ShapeId::from(999)]).is_none());
        assert!(doc.groups().is_empty());
    }

    #[test]
    fn test_group_stamps_members_and_bounds() {
        let mut doc = Document::new();
        let a = add_rect(&mut doc, (0.0, 0.0), (10.0, 10.0));
        let b = add_rect(&mut doc, (20.0, 30.0), (40.0, 50.0));
        let group = doc.group(&[a, b]).unwrap();
        assert_eq!(doc.shape(a).unwrap().group_id, Some(group));
        assert_eq!(doc.shape(b).unwrap().group_id, Some(group));
        assert_eq!(doc.group_by_id(group).unwrap().bounds, Rect::new(0.0, 0.0, 40.0, 50.0));
    }

    #[test]
    fn test_regroup_moves_members() {
        let mut doc = Document::new();
        let a = add_rect(&mut doc, (0.0, 0.0), (10.0, 10.0));
        let b = add_rect(&mut doc, (20.0, 20.0), (30.0, 30.0));
        let c = add_rect(&mut doc, (50.0, 50.0), (60.0, 60.0));
        let first = doc.group(&[a, b]).unwrap();
        let second = doc.group(&[b, c]).unwrap();
        assert_eq!(doc.group_by_id(first).unwrap().shapes, vec![a]);
        assert_eq!(doc.shape(b).unwrap().group_id, Some(second));
    }

    #[test]
    fn test_ungroup_keeps_shapes_and_drops_empty_groups() {
        let mut doc = Document::new();
        let a = add_rect(&mut doc, (0.0, 0.0), (10.0, 10.0));
        let b = add_rect(&mut doc, (20.0, 20.0), (30.0, 30.0));
        let group = doc.group(&[a, b]).unwrap();

        assert_eq!(doc.ungroup(&[a]), 1);
        assert_eq!(doc.group_by_id(group).unwrap().bounds, Rect::new(20.0, 20.0, 30.0, 30.0));

        assert_eq!(doc.ungroup(&[b]), 1);
        assert!(doc.groups().is_empty());
        assert_eq!(doc.shape_count(), 2);
        assert!(doc.shape(a).unwrap().group_id.is_none());
    }

    #[test]
    fn test_resize_target() {
        let mut doc = Document::new();
        let a = add_rect(&mut doc, (0.0, 0.0), (10.0, 10.0));
        let b = add_rect(&mut doc, (20.0, 20.0), (30.0, 30.0));
        let c = add_rect(&mut doc, (50.0, 50.0), (60.0, 60.0));
        let d = add_rect(&mut doc, (70.0, 70.0), (80.0, 80.0));
        assert_eq!(doc.resize_target(&[a]), Ok(None));

        let first = doc.group(&[a, b]).unwrap();
        doc.group(&[c, d]).unwrap();
        assert_eq!(doc.resize_target(&[a]), Ok(Some(first)));
        assert_eq!(doc.resize_target(&[a, b]), Ok(Some(first)));
        assert_eq!(
            doc.resize_target(&[a, c]),
            Err(EditError::AmbiguousResizeTarget { count: 2 })
        );
    }

    #[test]
    fn test_resize_keeps_bounds_in_sync() {
        let mut doc = Document::new();
        let a = add_rect(&mut doc, (0.0, 0.0), (50.0, 50.0));
        let b = add_rect(&mut doc, (50.0, 50.0), (100.0, 100.0));
        let group = doc.group(&[a, b]).unwrap();
        let snapshot = doc.begin_resize(group).unwrap();

        let bounds = doc
            .apply_resize(&snapshot, ResizeHandle::BottomRight, Vec2::new(100.0, 20.0))
            .unwrap();
        assert_eq!(bounds, member_bounds(&doc, group));
        assert!((bounds.width() - 200.0).abs() < 1e-9);
        assert!((bounds.height() - 120.0).abs() < 1e-9);
        assert_eq!(bounds.origin(), Point::ZERO);

        let rect = doc.shape(b).unwrap();
        assert_eq!(rect.style.width, Some(rect.anchor_bounds().unwrap().width()));
    }

    #[test]
    fn test_resize_clamps_instead_of_inverting() {
        let mut doc = Document::new();
        let a = add_rect(&mut doc, (0.0, 0.0), (50.0, 50.0));
        let b = add_rect(&mut doc, (50.0, 50.0), (100.0, 100.0));
        let group = doc.group(&[a, b]).unwrap();
        let snapshot = doc.begin_resize(group).unwrap();

        let bounds = doc
            .apply_resize(&snapshot, ResizeHandle::Left, Vec2::new(500.0, 0.0))
            .unwrap();
        assert!(bounds.width() > 0.0);
        assert_eq!(bounds.x1, 100.0);
        assert_eq!(bounds, member_bounds(&doc, group));
    }

    #[test]
    fn test_translate_keeps_bounds_in_sync() {
        let mut doc = Document::new();
        let a = add_rect(&mut doc, (0.0, 0.0), (10.0, 10.0));
        let b = add_rect(&mut doc, (20.0, 20.0), (30.0, 30.0));
        let group = doc.group(&[a, b]).unwrap();
        doc.translate_shapes(&[b], Vec2::new(5.0, 5.0));
        assert_eq!(doc.group_by_id(group).unwrap().bounds, Rect::new(0.0, 0.0, 35.0, 35.0));
    }

    #[test]
    fn test_align_left_and_bottom() {
        let mut doc = Document::new();
        let a = add_rect(&mut doc, (10.0, 0.0), (20.0, 10.0));
        let b = add_rect(&mut doc, (40.0, 30.0), (60.0, 50.0));
        assert!(doc.align(&[a, b], Alignment::Left));
        assert_eq!(doc.shape(b).unwrap().anchor_bounds().unwrap().x0, 10.0);

        assert!(doc.align(&[a, b], Alignment::Bottom));
        assert_eq!(doc.shape(a).unwrap().anchor_bounds().unwrap().y1, 50.0);
        assert!(!doc.align(&[a], Alignment::Left));
    }
}
