// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit session - all editing state for one open editor
//!
//! The session owns the committed document, the pen path under
//! construction and its undo history, the shape selection, and the bits of
//! interaction state the renderer needs (pointer position, pending text
//! entry, picker style). Tools receive `&mut EditSession` for every pointer
//! phase.

mod hit_testing;
mod path_editing;

use super::selection::Selection;
use super::undo::{EditAction, UndoState};
use crate::model::{
    Anchor, AnchorList, ArrowId, ArrowStyle, Document, DrawingStyle, HandleSide, Shape, ShapeId,
    ShapeStyle,
};
use crate::settings::{self, CanvasSettings};
use kurbo::Point;

/// What direct-select is holding on the pen path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorTarget {
    Anchor(usize),
    Handle(usize, HandleSide),
}

impl AnchorTarget {
    pub fn index(&self) -> usize {
        match *self {
            AnchorTarget::Anchor(index) | AnchorTarget::Handle(index, _) => index,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditSession {
    /// Committed shapes, arrows, groups, layers and guides
    pub document: Document,

    /// The pen path under construction
    anchors: AnchorList,

    /// Snapshots of `anchors`
    undo: UndoState,

    /// Selected committed shapes
    pub selection: Selection,

    /// Anchor or handle picked by direct-select
    pub anchor_selection: Option<AnchorTarget>,

    /// Last known pointer position
    pub pointer: Option<Point>,

    /// Style applied to newly committed shapes
    pub style: DrawingStyle,

    /// Drawing surface size and grid
    pub canvas: CanvasSettings,

    /// Where a text entry was opened, awaiting `commit_text`
    pub pending_text: Option<Point>,
}

impl EditSession {
    pub fn new(canvas: CanvasSettings) -> Self {
        Self {
            document: Document::new(),
            anchors: AnchorList::new(),
            undo: UndoState::new(),
            selection: Selection::new(),
            anchor_selection: None,
            pointer: None,
            style: DrawingStyle::default(),
            canvas,
            pending_text: None,
        }
    }

    // ===== Pen path and history =====

    pub fn anchors(&self) -> &AnchorList {
        &self.anchors
    }

    pub fn undo_state(&self) -> &UndoState {
        &self.undo
    }

    /// Whether the pen path is open and accepting anchors
    pub fn is_drawing(&self) -> bool {
        !self.anchors.is_empty() && !self.anchors.is_closed()
    }

    /// Replace the pen path and record one history entry
    pub(crate) fn record(&mut self, anchors: AnchorList, action: EditAction) {
        tracing::debug!("{:?}: path now has {} anchors", action, anchors.len());
        self.anchors = anchors;
        self.undo.push(self.anchors.clone(), action);
    }

    /// Replace the pen path without recording (mid-drag updates)
    pub(crate) fn set_anchors_transient(&mut self, anchors: AnchorList) {
        self.anchors = anchors;
    }

    /// Record the current path, closing a gesture made of transient updates
    pub(crate) fn record_current(&mut self, action: EditAction) {
        self.undo.push(self.anchors.clone(), action);
    }

    pub fn undo(&mut self) -> bool {
        match self.undo.undo() {
            Some(anchors) => {
                self.restore(anchors);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.undo.redo() {
            Some(anchors) => {
                self.restore(anchors);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, anchors: AnchorList) {
        self.anchors = anchors;
        if self
            .anchor_selection
            .is_some_and(|target| target.index() >= self.anchors.len())
        {
            self.anchor_selection = None;
        }
    }

    /// Turn the pen path into a committed `path` shape and start a fresh,
    /// empty path with a fresh history. Needs at least two anchors.
    ///
    /// Returns the anchors that were committed.
    pub(crate) fn take_path(&mut self) -> Option<(ShapeId, AnchorList)> {
        if self.anchors.len() < settings::pen::MIN_ANCHORS_TO_SAVE {
            tracing::debug!("Save ignored: path has {} anchors", self.anchors.len());
            return None;
        }
        let anchors = std::mem::take(&mut self.anchors);
        let mut style = ShapeStyle::from(&self.style);
        if !anchors.is_closed() {
            style.fill = String::from("none");
        }
        let points: Vec<Anchor> = anchors.to_vec();
        let id = self.document.add_shape(|id| Shape::path(id, points, style));
        self.undo.reset();
        self.anchor_selection = None;
        Some((id, anchors))
    }

    // ===== Shape commits =====

    /// Commit a shape built by a tool into the active layer
    pub(crate) fn commit_shape(&mut self, build: impl FnOnce(ShapeId, ShapeStyle) -> Shape) -> ShapeId {
        let style = ShapeStyle::from(&self.style);
        let id = self.document.add_shape(|id| build(id, style));
        self.record_current(EditAction::CommitShape);
        id
    }

    pub(crate) fn commit_arrow(&mut self, start: Point, end: Point) -> ArrowId {
        let id = self
            .document
            .add_arrow(start, end, ArrowStyle::from(&self.style));
        self.record_current(EditAction::CommitArrow);
        id
    }

    // ===== Text entry =====

    pub(crate) fn begin_text_entry(&mut self, pos: Point) {
        self.pending_text = Some(pos);
    }

    /// Commit the pending text entry. Empty text, or no pending entry,
    /// commits nothing.
    pub fn commit_text(&mut self, text: &str) -> Option<ShapeId> {
        let origin = self.pending_text.take()?;
        if text.trim().is_empty() {
            return None;
        }
        let text = text.to_string();
        Some(self.commit_shape(|id, style| Shape::text(id, origin, text, style)))
    }

    pub fn cancel_text_entry(&mut self) {
        self.pending_text = None;
    }

    // ===== Shape selection =====

    /// Drop selected ids whose shapes are gone
    pub(crate) fn prune_selection(&mut self) {
        let document = &self.document;
        self.selection.retain(|id| document.shape(*id).is_some());
    }

    /// Delete the selected shapes. Returns how many were removed.
    pub fn delete_selection(&mut self) -> usize {
        let removed = self.document.delete_shapes(&self.selection.ids());
        self.selection.clear();
        removed
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(CanvasSettings::default())
    }
}
