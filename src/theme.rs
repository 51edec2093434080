// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Theme colors
//!
//! All colors are CSS hex strings (`#rrggbb` or `#rrggbbaa`) so the host
//! can hand them straight to its drawing surface.

// ============================================================================
// BASE COLORS -- Slate ramp used for canvas chrome
// ============================================================================
const SLATE_900: &str = "#0f172a";
const SLATE_800: &str = "#1e293b";
const SLATE_500: &str = "#64748b";

// ============================================================================
// ACCENTS
// ============================================================================
const CYAN: &str = "#22d3ee";
const CYAN_FILL: &str = "#22d3ee20";
const CYAN_GUIDE: &str = "#22d3ee50";
const CYAN_BRIGHT: &str = "#22ffee";
const ORANGE: &str = "#f97316";
const WHITE: &str = "#ffffff";

// ============================================================================
// CANVAS
// ============================================================================
const CANVAS_BACKGROUND: &str = SLATE_900;
const GRID_LINE: &str = SLATE_800;
const GUIDE_LINE: &str = CYAN_GUIDE;

// ============================================================================
// PATHS, HANDLES AND ANCHORS
// ============================================================================
const PATH_STROKE: &str = CYAN;
const PATH_FILL: &str = CYAN_FILL;
const HANDLE_LINE: &str = SLATE_500;
const HANDLE_DOT: &str = ORANGE;
const ANCHOR_DOT: &str = CYAN;
const ANCHOR_HIGHLIGHT: &str = WHITE;
const FIRST_ANCHOR_DRAWING: &str = CYAN_BRIGHT;

// ============================================================================
// SHAPES, ARROWS AND SELECTION
// ============================================================================
const SHAPE_FILL: &str = CYAN_FILL;
const SHAPE_STROKE: &str = CYAN;
const TEXT_FILL: &str = WHITE;
const ARROW_LABEL: &str = WHITE;
const SELECTION_OUTLINE: &str = CYAN;
const RESIZE_HANDLE_FILL: &str = WHITE;
const RESIZE_HANDLE_STROKE: &str = CYAN;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Canvas background and overlays
pub mod canvas {
    pub const BACKGROUND: &str = super::CANVAS_BACKGROUND;
    pub const GRID_LINE: &str = super::GRID_LINE;
    pub const GUIDE_LINE: &str = super::GUIDE_LINE;
}

/// The pen path under construction
pub mod path {
    pub const STROKE: &str = super::PATH_STROKE;
    pub const FILL: &str = super::PATH_FILL;
}

/// Handle and anchor markers
pub mod handle {
    pub const LINE: &str = super::HANDLE_LINE;
    pub const DOT: &str = super::HANDLE_DOT;
}

pub mod anchor {
    pub const DOT: &str = super::ANCHOR_DOT;
    pub const HIGHLIGHT: &str = super::ANCHOR_HIGHLIGHT;
    pub const FIRST_WHILE_DRAWING: &str = super::FIRST_ANCHOR_DRAWING;
}

/// Default styles for committed shapes
pub mod shape {
    pub const FILL: &str = super::SHAPE_FILL;
    pub const STROKE: &str = super::SHAPE_STROKE;
    pub const TEXT_FILL: &str = super::TEXT_FILL;
    pub const ARROW_LABEL: &str = super::ARROW_LABEL;
}

/// Group selection outline and resize handles
pub mod selection {
    pub const OUTLINE: &str = super::SELECTION_OUTLINE;
    pub const HANDLE_FILL: &str = super::RESIZE_HANDLE_FILL;
    pub const HANDLE_STROKE: &str = super::RESIZE_HANDLE_STROKE;
}
