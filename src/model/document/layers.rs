// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Layer management: ordering, visibility, locking and z-order of shapes
//! within a layer.

use super::Document;
use crate::error::EditError;
use crate::model::entity_id::{LayerId, ShapeId};
use crate::model::shape::Layer;
use serde::{Deserialize, Serialize};

/// Direction for reordering a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerMove {
    /// Toward the front (drawn later)
    Up,
    /// Toward the back (drawn earlier)
    Down,
}

impl Document {
    /// Layers, bottom to top
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub(super) fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    fn layer_index(&self, id: LayerId) -> Result<usize, EditError> {
        self.layers
            .iter()
            .position(|layer| layer.id == id)
            .ok_or(EditError::UnknownLayer(id))
    }

    /// Layer new shapes are committed into
    pub fn active_layer(&self) -> LayerId {
        self.active_layer
    }

    /// Layer holding `shape`
    pub fn layer_of(&self, shape: ShapeId) -> Option<LayerId> {
        self.layers
            .iter()
            .find(|layer| layer.shapes.contains(&shape))
            .map(|layer| layer.id)
    }

    /// Add a layer on top of the stack and make it active
    pub fn add_layer(&mut self) -> LayerId {
        let id = self.ids.next();
        let name = format!("Layer {}", self.layers.len() + 1);
        tracing::debug!("Added {} ({})", id, name);
        self.layers.push(Layer::new(id, name));
        self.active_layer = id;
        id
    }

    pub fn set_active_layer(&mut self, id: LayerId) -> Result<(), EditError> {
        self.layer_index(id)?;
        self.active_layer = id;
        Ok(())
    }

    /// Delete a layer together with its shapes. The last remaining layer
    /// cannot be deleted.
    pub fn delete_layer(&mut self, id: LayerId) -> Result<(), EditError> {
        let index = self.layer_index(id)?;
        if self.layers.len() == 1 {
            return Err(EditError::LastLayer);
        }
        let layer = self.layers.remove(index);
        self.delete_shapes(&layer.shapes);
        if self.active_layer == id {
            self.active_layer = self.layers[index.saturating_sub(1)].id;
        }
        tracing::debug!("Deleted {} with {} shapes", id, layer.shapes.len());
        Ok(())
    }

    /// Returns the new visibility
    pub fn toggle_layer_visibility(&mut self, id: LayerId) -> Result<bool, EditError> {
        let layer = self.layer_mut(id).ok_or(EditError::UnknownLayer(id))?;
        layer.visible = !layer.visible;
        Ok(layer.visible)
    }

    /// Returns the new lock state
    pub fn toggle_layer_lock(&mut self, id: LayerId) -> Result<bool, EditError> {
        let layer = self.layer_mut(id).ok_or(EditError::UnknownLayer(id))?;
        layer.locked = !layer.locked;
        Ok(layer.locked)
    }

    /// Move a layer one step. Returns `false` when it is already at the end
    /// of the stack in that direction.
    pub fn move_layer(&mut self, id: LayerId, direction: LayerMove) -> Result<bool, EditError> {
        let index = self.layer_index(id)?;
        let target = match direction {
            LayerMove::Up if index + 1 < self.layers.len() => index + 1,
            LayerMove::Down if index > 0 => index - 1,
            _ => return Ok(false),
        };
        self.layers.swap(index, target);
        Ok(true)
    }

    // ===== Z-order within a layer =====

    /// Move shapes to the top of their layers, keeping their relative order
    pub fn bring_to_front(&mut self, ids: &[ShapeId]) {
        for layer in &mut self.layers {
            let (mut picked, rest): (Vec<_>, Vec<_>) =
                layer.shapes.iter().copied().partition(|id| ids.contains(id));
            let mut reordered = rest;
            reordered.append(&mut picked);
            layer.shapes = reordered;
        }
    }

    /// Move shapes to the bottom of their layers, keeping their relative order
    pub fn send_to_back(&mut self, ids: &[ShapeId]) {
        for layer in &mut self.layers {
            let (mut picked, mut rest): (Vec<_>, Vec<_>) =
                layer.shapes.iter().copied().partition(|id| ids.contains(id));
            picked.append(&mut rest);
            layer.shapes = picked;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::tests::add_rect;

    #[test]
    fn test_add_layer_becomes_active() {
        let mut doc = Document::new();
        let id = doc.add_layer();
        assert_eq!(doc.active_layer(), id);
        assert_eq!(doc.layers().len(), 2);
        assert_eq!(doc.layers()[1].name, "Layer 2");

        let shape = add_rect(&mut doc, (0.0, 0.0), (5.0, 5.0));
        assert_eq!(doc.layer_of(shape), Some(id));
    }

    #[test]
    fn test_last_layer_cannot_be_deleted() {
        let mut doc = Document::new();
        let only = doc.active_layer();
        assert_eq!(doc.delete_layer(only), Err(EditError::LastLayer));
    }

    #[test]
    fn test_delete_layer_removes_its_shapes() {
        let mut doc = Document::new();
        let first = doc.active_layer();
        let keep = add_rect(&mut doc, (0.0, 0.0), (5.0, 5.0));
        let second = doc.add_layer();
        let gone = add_rect(&mut doc, (10.0, 10.0), (15.0, 15.0));

        doc.delete_layer(second).unwrap();
        assert_eq!(doc.active_layer(), first);
        assert!(doc.shape(gone).is_none());
        assert!(doc.shape(keep).is_some());
    }

    #[test]
    fn test_toggle_flags() {
        let mut doc = Document::new();
        let id = doc.active_layer();
        assert_eq!(doc.toggle_layer_visibility(id), Ok(false));
        assert_eq!(doc.toggle_layer_lock(id), Ok(true));
        assert!(!doc.layer(id).unwrap().is_interactive());
        assert!(doc.toggle_layer_lock(LayerId::from(999)).is_err());
    }

    #[test]
    fn test_move_layer() {
        let mut doc = Document::new();
        let bottom = doc.active_layer();
        let top = doc.add_layer();
        assert_eq!(doc.move_layer(top, LayerMove::Up), Ok(false));
        assert_eq!(doc.move_layer(top, LayerMove::Down), Ok(true));
        assert_eq!(doc.layers()[0].id, top);
        assert_eq!(doc.layers()[1].id, bottom);
    }

    #[test]
    fn test_hidden_layer_not_visible() {
        let mut doc = Document::new();
        add_rect(&mut doc, (0.0, 0.0), (5.0, 5.0));
        let id = doc.active_layer();
        doc.toggle_layer_visibility(id).unwrap();
        assert_eq!(doc.visible_shapes().count(), 0);
    }

    #[test]
    fn test_z_order() {
        let mut doc = Document::new();
        let a = add_rect(&mut doc, (0.0, 0.0), (5.0, 5.0));
        let b = add_rect(&mut doc, (0.0, 0.0), (5.0, 5.0));
        let c = add_rect(&mut doc, (0.0, 0.0), (5.0, 5.0));
        doc.bring_to_front(&[a]);
        assert_eq!(doc.layers()[0].shapes, vec![b, c, a]);
        doc.send_to_back(&[c]);
        assert_eq!(doc.layers()[0].shapes, vec![c, b, a]);
    }
}
