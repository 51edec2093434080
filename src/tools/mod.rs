// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Tool system for canvas editing

use crate::editing::{EditSession, MouseDelegate, MouseEvent};
use crate::render::RenderList;
use serde::{Deserialize, Serialize};

// ===== Tool Identifier =====

/// Tool identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    /// Draw a path anchor by anchor
    #[default]
    Pen,
    /// Drag anchors and handles of the pen path
    DirectSelect,
    /// Insert an anchor on a segment
    AddAnchor,
    /// Delete an anchor
    RemoveAnchor,
    /// Toggle an anchor between corner and smooth
    ConvertAnchor,
    Rectangle,
    Circle,
    Text,
    /// Draw a curved connector
    Arrow,
    /// Select, move and resize committed shapes
    Select,
}

// ===== Tool Trait =====

/// A tool for editing the canvas
pub trait Tool: MouseDelegate<Data = EditSession> {
    /// Get the tool identifier
    fn id(&self) -> ToolId;

    /// Paint tool-specific overlays
    fn paint(&self, _session: &EditSession, _out: &mut RenderList) {}
}

// ===== ToolBox Enum =====

/// Enum wrapping all tool types
#[derive(Debug, Clone)]
pub enum ToolBox {
    Pen(pen::PenTool),
    DirectSelect(direct_select::DirectSelectTool),
    AddAnchor(anchor_edit::AddAnchorTool),
    RemoveAnchor(anchor_edit::RemoveAnchorTool),
    ConvertAnchor(anchor_edit::ConvertAnchorTool),
    Shapes(shapes::ShapesTool),
    Text(text::TextTool),
    Arrow(arrow::ArrowTool),
    Select(select::SelectTool),
}

/// Run `$body` with `$tool` bound to the wrapped tool
macro_rules! dispatch {
    ($toolbox:expr, $tool:ident => $body:expr) => {
        match $toolbox {
            ToolBox::Pen($tool) => $body,
            ToolBox::DirectSelect($tool) => $body,
            ToolBox::AddAnchor($tool) => $body,
            ToolBox::RemoveAnchor($tool) => $body,
            ToolBox::ConvertAnchor($tool) => $body,
            ToolBox::Shapes($tool) => $body,
            ToolBox::Text($tool) => $body,
            ToolBox::Arrow($tool) => $body,
            ToolBox::Select($tool) => $body,
        }
    };
}

// ===== ToolBox Implementation =====

impl ToolBox {
    /// Create a tool by ID
    pub fn for_id(id: ToolId) -> Self {
        match id {
            ToolId::Pen => ToolBox::Pen(pen::PenTool),
            ToolId::DirectSelect => ToolBox::DirectSelect(direct_select::DirectSelectTool::default()),
            ToolId::AddAnchor => ToolBox::AddAnchor(anchor_edit::AddAnchorTool),
            ToolId::RemoveAnchor => ToolBox::RemoveAnchor(anchor_edit::RemoveAnchorTool),
            ToolId::ConvertAnchor => ToolBox::ConvertAnchor(anchor_edit::ConvertAnchorTool),
            ToolId::Rectangle => ToolBox::Shapes(shapes::ShapesTool::new(shapes::ShapeType::Rectangle)),
            ToolId::Circle => ToolBox::Shapes(shapes::ShapesTool::new(shapes::ShapeType::Circle)),
            ToolId::Text => ToolBox::Text(text::TextTool),
            ToolId::Arrow => ToolBox::Arrow(arrow::ArrowTool::default()),
            ToolId::Select => ToolBox::Select(select::SelectTool::default()),
        }
    }

    /// Get the tool ID
    pub fn id(&self) -> ToolId {
        dispatch!(self, tool => tool.id())
    }

    /// Paint tool overlays
    pub fn paint(&self, session: &EditSession, out: &mut RenderList) {
        dispatch!(self, tool => tool.paint(session, out))
    }

    /// Handle mouse down
    pub fn mouse_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        dispatch!(self, tool => tool.left_down(event, session))
    }

    /// Handle mouse moved
    pub fn mouse_moved(&mut self, event: MouseEvent, session: &mut EditSession) {
        dispatch!(self, tool => tool.mouse_moved(event, session))
    }

    /// Handle mouse up
    pub fn mouse_up(&mut self, event: MouseEvent, session: &mut EditSession) {
        dispatch!(self, tool => tool.left_up(event, session))
    }

    /// Cancel current operation
    pub fn cancel(&mut self, session: &mut EditSession) {
        dispatch!(self, tool => tool.cancel(session))
    }
}

impl Default for ToolBox {
    fn default() -> Self {
        Self::for_id(ToolId::default())
    }
}

// ===== MouseDelegate Implementation =====

impl MouseDelegate for ToolBox {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, data: &mut EditSession) {
        self.mouse_down(event, data);
    }

    fn mouse_moved(&mut self, event: MouseEvent, data: &mut EditSession) {
        ToolBox::mouse_moved(self, event, data);
    }

    fn left_up(&mut self, event: MouseEvent, data: &mut EditSession) {
        self.mouse_up(event, data);
    }

    fn cancel(&mut self, data: &mut EditSession) {
        ToolBox::cancel(self, data);
    }
}

// ===== Tool Modules =====

pub mod anchor_edit;
pub mod arrow;
pub mod direct_select;
pub mod pen;
pub mod select;
pub mod shapes;
pub mod text;
