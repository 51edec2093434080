// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Direct-select tool for dragging anchors and handles of the pen path

use crate::editing::session::AnchorTarget;
use crate::editing::{EditAction, EditSession, MouseDelegate, MouseEvent};
use crate::model::AnchorList;
use crate::tools::{Tool, ToolId};
use kurbo::{Point, Vec2};

/// An anchor or handle being dragged
#[derive(Debug, Clone)]
struct Drag {
    target: AnchorTarget,
    /// Target position minus pointer position at mouse-down
    grab: Vec2,
    /// Path before the drag, restored on cancel
    start: AnchorList,
    moved: bool,
}

/// The direct-select tool.
///
/// Clicking an anchor or handle selects it; dragging moves it. The whole
/// drag is recorded as a single history entry when the mouse is released.
#[derive(Debug, Clone, Default)]
pub struct DirectSelectTool {
    drag: Option<Drag>,
}

impl Tool for DirectSelectTool {
    fn id(&self) -> ToolId {
        ToolId::DirectSelect
    }
}

impl MouseDelegate for DirectSelectTool {
    type Data = EditSession;

    fn left_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        let Some(target) = session.anchor_target_at(event.pos) else {
            session.anchor_selection = None;
            self.drag = None;
            return;
        };
        let Some(anchor) = session.anchors().get(target.index()) else {
            return;
        };
        let grabbed = match target {
            AnchorTarget::Anchor(_) => Some(anchor.point),
            AnchorTarget::Handle(_, side) => anchor.handle_pos(side),
        };
        let Some(grabbed) = grabbed else {
            return;
        };

        session.anchor_selection = Some(target);
        self.drag = Some(Drag {
            target,
            grab: grabbed - event.pos,
            start: session.anchors().clone(),
            moved: false,
        });
        tracing::debug!("Direct select: grabbed {:?}", target);
    }

    fn mouse_moved(&mut self, event: MouseEvent, session: &mut EditSession) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let pos: Point = event.pos + drag.grab;
        let changed = match drag.target {
            AnchorTarget::Anchor(index) => session.drag_anchor(index, pos),
            AnchorTarget::Handle(index, side) => session.drag_handle(index, side, pos),
        };
        drag.moved |= changed;
    }

    fn left_up(&mut self, _event: MouseEvent, session: &mut EditSession) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        if drag.moved {
            let action = match drag.target {
                AnchorTarget::Anchor(_) => EditAction::MoveAnchor,
                AnchorTarget::Handle(..) => EditAction::MoveHandle,
            };
            session.record_current(action);
        }
    }

    fn cancel(&mut self, session: &mut EditSession) {
        if let Some(drag) = self.drag.take()
            && drag.moved
        {
            session.set_anchors_transient(drag.start);
            tracing::debug!("Direct select: drag cancelled");
        }
    }
}
