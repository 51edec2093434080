// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor facade
//!
//! One `Editor` per open canvas. It owns the edit session, the active tool
//! and the host callbacks, and routes every input the host forwards.

use crate::editing::{EditSession, Key, Modifiers, MouseEvent};
use crate::error::EditError;
use crate::model::{
    Alignment, ArrowId, ColorTarget, GroupId, GuideOrientation, LayerId, LayerMove, ShapeId,
    TextAlign,
};
use crate::render::{RenderList, draw_frame};
use crate::serialize::to_path_string;
use crate::settings::CanvasSettings;
use crate::tools::{ToolBox, ToolId};
use kurbo::Point;

/// Callbacks into the embedding application
pub trait EditorHost {
    /// The pen path was saved; `path` is its SVG path data
    fn on_save(&mut self, path: &str);

    /// The user asked to close the editor
    fn on_close(&mut self) {}
}

pub struct Editor<H: EditorHost> {
    session: EditSession,
    tool: ToolBox,
    host: H,
}

impl<H: EditorHost> Editor<H> {
    pub fn new(host: H, canvas: CanvasSettings) -> Self {
        Self {
            session: EditSession::new(canvas),
            tool: ToolBox::default(),
            host,
        }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ===== Tools =====

    pub fn tool(&self) -> ToolId {
        self.tool.id()
    }

    /// Switch tools, abandoning any gesture of the current one
    pub fn set_tool(&mut self, id: ToolId) {
        if self.tool.id() == id {
            return;
        }
        self.tool.cancel(&mut self.session);
        self.tool = ToolBox::for_id(id);
        tracing::debug!("Tool: {:?}", id);
    }

    // ===== Pointer =====

    pub fn pointer_down(&mut self, pos: Point, mods: Modifiers) {
        let event = self.pointer_event(pos, mods);
        self.tool.mouse_down(event, &mut self.session);
    }

    pub fn pointer_move(&mut self, pos: Point, mods: Modifiers) {
        let event = self.pointer_event(pos, mods);
        self.tool.mouse_moved(event, &mut self.session);
    }

    pub fn pointer_up(&mut self, pos: Point, mods: Modifiers) {
        let event = self.pointer_event(pos, mods);
        self.tool.mouse_up(event, &mut self.session);
    }

    /// Snap onto guides and remember the pointer for hover feedback
    fn pointer_event(&mut self, pos: Point, mods: Modifiers) -> MouseEvent {
        let pos = self.session.document.snap_point(pos);
        self.session.pointer = Some(pos);
        MouseEvent::new(pos, mods)
    }

    // ===== Keyboard =====

    /// Handle a key press. Returns whether the key was consumed.
    ///
    /// - Cmd/Ctrl+Z undoes, with Shift it redoes (as does Cmd/Ctrl+Y)
    /// - Escape abandons the current gesture and text entry, and closes
    ///   the pen path
    /// - Delete/Backspace removes the selected shapes
    pub fn key_down(&mut self, key: &Key, mods: Modifiers) -> bool {
        if mods.command() {
            if key.is_char('z') {
                return if mods.shift { self.redo() } else { self.undo() };
            }
            if key.is_char('y') {
                return self.redo();
            }
            return false;
        }

        match key {
            Key::Escape => {
                self.tool.cancel(&mut self.session);
                self.session.cancel_text_entry();
                if !self.session.anchors().is_empty() {
                    self.session.close_path();
                }
                true
            }
            // Text entry owns the keyboard while open
            Key::Delete | Key::Backspace if self.session.pending_text.is_none() => {
                self.delete_selection() > 0
            }
            _ => false,
        }
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    // ===== Style Pickers =====

    pub fn set_fill(&mut self, color: impl Into<String>) {
        self.session.style.fill = color.into();
    }

    pub fn set_stroke(&mut self, color: impl Into<String>) {
        self.session.style.stroke = color.into();
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.session.style.stroke_width = width;
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.session.style.font_family = family.into();
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.session.style.font_size = size;
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.session.style.text_align = align;
    }

    // ===== Text Entry =====

    pub fn commit_text(&mut self, text: &str) -> Option<ShapeId> {
        let id = self.session.commit_text(text)?;
        tracing::info!("Committed text {}", id);
        Some(id)
    }

    pub fn cancel_text(&mut self) {
        self.session.cancel_text_entry();
    }

    // ===== Save / Close =====

    /// Save the pen path: hand its path data to the host, keep it as a
    /// `path` shape and start over with an empty path and history.
    /// Needs at least two anchors.
    pub fn save(&mut self) -> Option<String> {
        let (id, anchors) = self.session.take_path()?;
        let data = to_path_string(&anchors);
        tracing::info!("Saved {} ({} anchors): {}", id, anchors.len(), data);
        self.host.on_save(&data);
        Some(data)
    }

    pub fn close(&mut self) {
        self.tool.cancel(&mut self.session);
        self.host.on_close();
    }

    pub fn render(&self) -> RenderList {
        draw_frame(&self.session, &self.tool)
    }

    // ===== Selection =====

    pub fn select_shape(&mut self, id: ShapeId, extend: bool) -> Result<(), EditError> {
        if self.session.document.shape(id).is_none() {
            return Err(EditError::UnknownShape(id));
        }
        if extend {
            self.session.selection.insert(id);
        } else {
            self.session.selection.select_only(id);
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.session.selection.clear();
    }

    pub fn delete_selection(&mut self) -> usize {
        let removed = self.session.delete_selection();
        if removed > 0 {
            tracing::info!("Deleted {} shapes", removed);
        }
        removed
    }

    pub fn group_selection(&mut self) -> Result<GroupId, EditError> {
        let ids = self.session.selection.ids();
        let got = ids
            .iter()
            .filter(|id| self.session.document.shape(**id).is_some())
            .count();
        let group = self
            .session
            .document
            .group(&ids)
            .ok_or(EditError::NotEnoughShapes { needed: 2, got })?;
        tracing::info!("Grouped {} shapes into {}", got, group);
        Ok(group)
    }

    /// Returns how many shapes left their group
    pub fn ungroup_selection(&mut self) -> usize {
        self.session.document.ungroup(&self.session.selection.ids())
    }

    pub fn align_selection(&mut self, alignment: Alignment) -> Result<bool, EditError> {
        let ids = self.session.selection.ids();
        if ids.len() < 2 {
            return Err(EditError::NotEnoughShapes {
                needed: 2,
                got: ids.len(),
            });
        }
        Ok(self.session.document.align(&ids, alignment))
    }

    pub fn recolor_selection(&mut self, target: ColorTarget, color: &str) -> bool {
        self.session
            .document
            .recolor(&self.session.selection.ids(), target, color)
    }

    pub fn bring_selection_to_front(&mut self) {
        self.session
            .document
            .bring_to_front(&self.session.selection.ids());
    }

    pub fn send_selection_to_back(&mut self) {
        self.session
            .document
            .send_to_back(&self.session.selection.ids());
    }

    // ===== Layers =====

    pub fn add_layer(&mut self) -> LayerId {
        self.session.document.add_layer()
    }

    pub fn delete_layer(&mut self, id: LayerId) -> Result<(), EditError> {
        self.session.document.delete_layer(id)?;
        self.session.prune_selection();
        Ok(())
    }

    pub fn set_active_layer(&mut self, id: LayerId) -> Result<(), EditError> {
        self.session.document.set_active_layer(id)
    }

    pub fn toggle_layer_visibility(&mut self, id: LayerId) -> Result<bool, EditError> {
        self.session.document.toggle_layer_visibility(id)
    }

    pub fn toggle_layer_lock(&mut self, id: LayerId) -> Result<bool, EditError> {
        self.session.document.toggle_layer_lock(id)
    }

    pub fn move_layer(&mut self, id: LayerId, direction: LayerMove) -> Result<bool, EditError> {
        self.session.document.move_layer(id, direction)
    }

    // ===== Guides =====

    pub fn add_guide(&mut self, orientation: GuideOrientation, position: f64) {
        self.session.document.add_guide(orientation, position);
    }

    pub fn toggle_guide(&mut self, index: usize) -> Option<bool> {
        self.session.document.toggle_guide(index)
    }

    pub fn set_show_guides(&mut self, show: bool) {
        self.session.document.show_guides = show;
    }

    pub fn set_snap_to_guides(&mut self, snap: bool) {
        self.session.document.snap_to_guides = snap;
    }

    // ===== Arrows =====

    pub fn label_arrow(&mut self, id: ArrowId, label: Option<String>) -> Result<(), EditError> {
        self.session.document.label_arrow(id, label)
    }
}
