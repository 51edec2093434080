// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Text tool
//!
//! A click opens a text entry at the click position. The host collects the
//! string and hands it to `Editor::commit_text`.

use crate::editing::{EditSession, MouseDelegate, MouseEvent};
use crate::render::{DrawCommand, RenderList, Stroke};
use crate::theme;
use crate::tools::{Tool, ToolId};
use kurbo::Point;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextTool;

impl Tool for TextTool {
    fn id(&self) -> ToolId {
        ToolId::Text
    }

    /// Caret marker where the pending entry will land
    fn paint(&self, session: &EditSession, out: &mut RenderList) {
        if let Some(origin) = session.pending_text {
            out.push(DrawCommand::Line {
                from: Point::new(origin.x, origin.y - session.style.font_size),
                to: origin,
                stroke: Stroke::solid(theme::shape::TEXT_FILL, 1.0),
            });
        }
    }
}

impl MouseDelegate for TextTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        session.begin_text_entry(event.pos);
        tracing::debug!("Text tool: entry opened at {:?}", event.pos);
    }

    fn cancel(&mut self, session: &mut EditSession) {
        session.cancel_text_entry();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Modifiers;

    #[test]
    fn test_click_opens_entry() {
        let mut session = EditSession::default();
        let mut tool = TextTool;
        tool.left_down(MouseEvent::new(Point::new(30.0, 40.0), Modifiers::NONE), &mut session);
        assert_eq!(session.pending_text, Some(Point::new(30.0, 40.0)));

        let mut out = RenderList::new();
        tool.paint(&session, &mut out);
        assert_eq!(out.len(), 1);

        tool.cancel(&mut session);
        assert!(session.pending_text.is_none());
    }
}
