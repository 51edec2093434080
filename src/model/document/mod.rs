// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! The document: committed shapes, arrows, groups, layers and guides.
//!
//! The document owns everything that outlives a single gesture. The pen
//! path under construction lives in the edit session, not here.
//!
//! Group bounds are derived data. Every method that changes membership or
//! member geometry ends by calling `refresh_groups`, so bounds are never
//! stale when the next frame is drawn.

mod groups;
mod layers;

pub use groups::{Alignment, ResizeSnapshot};
pub use layers::LayerMove;

use super::entity_id::{ArrowId, IdSource, LayerId, ShapeId};
use super::shape::{Arrow, ArrowStyle, Group, Guide, GuideOrientation, Layer, Shape};
use crate::error::EditError;
use crate::geometry::snap_coordinate;
use crate::settings;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which paint of a shape a color change applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTarget {
    Fill,
    Stroke,
}

#[derive(Debug, Clone)]
pub struct Document {
    ids: IdSource,
    shapes: BTreeMap<ShapeId, Shape>,
    arrows: Vec<Arrow>,
    groups: Vec<Group>,
    /// Bottom to top
    layers: Vec<Layer>,
    active_layer: LayerId,
    guides: Vec<Guide>,
    /// Whether guides are drawn
    pub show_guides: bool,
    /// Whether the pointer snaps onto active guides
    pub snap_to_guides: bool,
}

impl Document {
    /// An empty document with a single active layer
    pub fn new() -> Self {
        let mut ids = IdSource::new();
        let layer = Layer::new(ids.next(), "Layer 1");
        Self {
            active_layer: layer.id,
            layers: vec![layer],
            ids,
            shapes: BTreeMap::new(),
            arrows: Vec::new(),
            groups: Vec::new(),
            guides: Vec::new(),
            show_guides: false,
            snap_to_guides: false,
        }
    }

    // ===== Shapes =====

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Shapes of visible layers, bottom layer first
    pub fn visible_shapes(&self) -> impl Iterator<Item = &Shape> {
        self.layers
            .iter()
            .filter(|layer| layer.visible)
            .flat_map(|layer| layer.shapes.iter())
            .filter_map(|id| self.shapes.get(id))
    }

    /// Commit a new shape into the active layer. `build` receives the id
    /// allocated for it.
    pub fn add_shape(&mut self, build: impl FnOnce(ShapeId) -> Shape) -> ShapeId {
        let id = self.ids.next();
        let shape = build(id);
        debug_assert_eq!(shape.id, id);
        let layer = self.active_layer;
        if let Some(layer) = self.layer_mut(layer) {
            layer.shapes.push(id);
        }
        tracing::debug!("Committed {:?} {} to {}", shape.kind, id, layer);
        self.shapes.insert(id, shape);
        id
    }

    /// Delete shapes. Their ids leave layers and groups; groups left empty
    /// are dropped. Returns how many shapes were removed.
    pub fn delete_shapes(&mut self, ids: &[ShapeId]) -> usize {
        let mut removed = 0;
        for id in ids {
            if self.shapes.remove(id).is_some() {
                removed += 1;
            }
        }
        for layer in &mut self.layers {
            layer.shapes.retain(|id| !ids.contains(id));
        }
        for group in &mut self.groups {
            group.shapes.retain(|id| !ids.contains(id));
        }
        self.refresh_groups();
        removed
    }

    /// Translate shapes by `delta`
    pub fn translate_shapes(&mut self, ids: &[ShapeId], delta: Vec2) {
        for id in ids {
            if let Some(shape) = self.shapes.get_mut(id) {
                shape.translate(delta);
            }
        }
        self.refresh_groups();
    }

    /// Topmost shape under `pos`, skipping hidden and locked layers
    pub fn shape_at(&self, pos: Point) -> Option<ShapeId> {
        self.layers
            .iter()
            .rev()
            .filter(|layer| layer.is_interactive())
            .flat_map(|layer| layer.shapes.iter().rev())
            .copied()
            .find(|id| {
                self.shapes
                    .get(id)
                    .is_some_and(|shape| shape.hit(pos, settings::hit::TOLERANCE))
            })
    }

    /// Apply a fill or stroke color to shapes. Returns whether any changed.
    pub fn recolor(&mut self, ids: &[ShapeId], target: ColorTarget, color: &str) -> bool {
        let mut changed = false;
        for id in ids {
            if let Some(shape) = self.shapes.get_mut(id) {
                let paint = match target {
                    ColorTarget::Fill => &mut shape.style.fill,
                    ColorTarget::Stroke => &mut shape.style.stroke,
                };
                if paint != color {
                    *paint = color.to_string();
                    changed = true;
                }
            }
        }
        changed
    }

    // ===== Arrows =====

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    pub fn add_arrow(&mut self, start: Point, end: Point, style: ArrowStyle) -> ArrowId {
        let id = self.ids.next();
        self.arrows.push(Arrow::new(id, start, end, style));
        tracing::debug!("Committed {} from {:?} to {:?}", id, start, end);
        id
    }

    /// Set or clear an arrow's label
    pub fn label_arrow(&mut self, id: ArrowId, label: Option<String>) -> Result<(), EditError> {
        let arrow = self
            .arrows
            .iter_mut()
            .find(|arrow| arrow.id == id)
            .ok_or(EditError::UnknownArrow(id))?;
        arrow.label = label.filter(|text| !text.is_empty());
        Ok(())
    }

    // ===== Guides =====

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn add_guide(&mut self, orientation: GuideOrientation, position: f64) {
        self.guides.push(Guide {
            orientation,
            position,
            active: true,
        });
    }

    /// Toggle a guide on or off. Returns the new state, `None` if out of range.
    pub fn toggle_guide(&mut self, index: usize) -> Option<bool> {
        let guide = self.guides.get_mut(index)?;
        guide.active = !guide.active;
        Some(guide.active)
    }

    /// Snap `pos` onto nearby active guides when snapping is enabled
    pub fn snap_point(&self, pos: Point) -> Point {
        if !self.snap_to_guides {
            return pos;
        }
        let positions = |orientation: GuideOrientation| {
            self.guides
                .iter()
                .filter(move |guide| guide.active && guide.orientation == orientation)
                .map(|guide| guide.position)
        };
        let distance = settings::guides::SNAP_DISTANCE;
        Point::new(
            snap_coordinate(pos.x, positions(GuideOrientation::Vertical), distance),
            snap_coordinate(pos.y, positions(GuideOrientation::Horizontal), distance),
        )
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
