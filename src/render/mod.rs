// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Render driver: turns the session into a display list.
//!
//! The host replays the list against its 2D surface in order. The order is
//! part of the contract, so anything that mirrors the canvas z-order (such
//! as click-through zones) can rely on it:
//!
//! 1. background and grid
//! 2. guides, when enabled
//! 3. shapes of visible layers, bottom layer first
//! 4. arrows with arrowheads and labels
//! 5. selection outlines and group resize handles
//! 6. the active tool's preview overlay
//! 7. the pen path under construction and its live segment
//! 8. handle lines, handle dots and anchor dots

mod drawing;

pub use drawing::arrow_commands;

use crate::editing::EditSession;
use crate::model::TextAlign;
use crate::tools::ToolBox;
use kurbo::{BezPath, Point, Rect};

/// Stroke paint for an outline
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    pub fn solid(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            dash: None,
        }
    }

    pub fn dashed(color: impl Into<String>, width: f64, dash: [f64; 2]) -> Self {
        Self {
            color: color.into(),
            width,
            dash: Some(dash),
        }
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear { width: f64, height: f64, color: String },
    Line { from: Point, to: Point, stroke: Stroke },
    Rect {
        rect: Rect,
        corner_radius: f64,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Path {
        path: BezPath,
        fill: Option<String>,
        stroke: Option<Stroke>,
    },
    Text {
        origin: Point,
        text: String,
        font_family: String,
        font_size: f64,
        align: TextAlign,
        color: String,
    },
}

pub type RenderList = Vec<DrawCommand>;

/// Build the display list for one frame
pub fn draw_frame(session: &EditSession, tool: &ToolBox) -> RenderList {
    let mut out = RenderList::new();

    // Layer 1: background and grid
    drawing::background(&session.canvas, &mut out);

    // Layer 2: guides
    if session.document.show_guides {
        drawing::guides(session.document.guides(), &session.canvas, &mut out);
    }

    // Layer 3: committed shapes
    for shape in session.document.visible_shapes() {
        drawing::shape(shape, &mut out);
    }

    // Layer 4: arrows
    for arrow in session.document.arrows() {
        drawing::arrow(arrow, &mut out);
    }

    // Layer 5: selection
    drawing::selection(session, &mut out);

    // Layer 6: tool overlay
    tool.paint(session, &mut out);

    // Layer 7: pen path and live segment
    drawing::pen_path(session, tool.id(), &mut out);

    // Layer 8: handles and anchors
    drawing::handles_and_anchors(session, &mut out);

    out
}
