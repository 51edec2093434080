// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Single-click anchor editing tools

use crate::editing::{EditSession, MouseDelegate, MouseEvent};
use crate::tools::{Tool, ToolId};

/// Inserts a corner anchor on the segment under the click
#[derive(Debug, Clone, Copy, Default)]
pub struct AddAnchorTool;

/// Deletes the anchor under the click
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveAnchorTool;

/// Toggles the anchor under the click between corner and smooth
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertAnchorTool;

impl Tool for AddAnchorTool {
    fn id(&self) -> ToolId {
        ToolId::AddAnchor
    }
}

impl MouseDelegate for AddAnchorTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        session.insert_anchor(event.pos);
    }
}

impl Tool for RemoveAnchorTool {
    fn id(&self) -> ToolId {
        ToolId::RemoveAnchor
    }
}

impl MouseDelegate for RemoveAnchorTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        session.remove_anchor(event.pos);
    }
}

impl Tool for ConvertAnchorTool {
    fn id(&self) -> ToolId {
        ToolId::ConvertAnchor
    }
}

impl MouseDelegate for ConvertAnchorTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        session.convert_anchor(event.pos);
    }
}
