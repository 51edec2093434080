// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Pen tool for drawing paths one anchor per click

use crate::editing::{EditSession, MouseDelegate, MouseEvent};
use crate::tools::{Tool, ToolId};

/// The pen tool. Holding shift adds a smooth anchor.
///
/// A click near the first anchor of an open path with more than two
/// anchors closes it. Clicks on an existing anchor, or on a path that is
/// already closed, do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PenTool;

impl Tool for PenTool {
    fn id(&self) -> ToolId {
        ToolId::Pen
    }
}

impl MouseDelegate for PenTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        if session.closes_path_at(event.pos) {
            session.close_path();
            tracing::debug!("Pen tool: closed path");
            return;
        }
        if session.anchors().is_closed() {
            tracing::debug!("Pen tool: path already closed, click ignored");
            return;
        }
        if session.anchor_at(event.pos).is_some() {
            return;
        }
        session.add_anchor(event.pos, event.mods.shift);
    }
}
