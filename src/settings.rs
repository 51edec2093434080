// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor settings and tuning constants.
//!
//! This module holds non-visual settings: hit-test tolerances, handle
//! geometry and canvas defaults. Colors belong in `theme.rs`.
//!
//! The surface size and grid can also be overridden at runtime through
//! [`CanvasSettings`], which the replay harness loads from TOML.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// HIT TESTING
// ============================================================================
/// Pick radius for anchors, handles and segments (pixels)
const HIT_TOLERANCE: f64 = 5.0;

/// Distance from the first anchor that closes the pen path (pixels)
const CLOSE_PATH_TOLERANCE: f64 = 10.0;

// ============================================================================
// PEN AND ANCHOR EDITING
// ============================================================================
/// Synthesized handles reach this fraction (1/n) of the inter-anchor distance
const SMOOTH_HANDLE_DIVISOR: f64 = 3.0;

/// Horizontal handle offset added when an anchor is converted to smooth
const CONVERT_HANDLE_OFFSET: f64 = 20.0;

/// Minimum anchor count before a path can be closed (exclusive)
const MIN_ANCHORS_TO_CLOSE: usize = 2;

/// Minimum anchor count for a path to be saved
const MIN_ANCHORS_TO_SAVE: usize = 2;

// ============================================================================
// SHAPES AND RESIZE
// ============================================================================
/// Side length of a resize handle box (pixels)
const RESIZE_HANDLE_SIZE: f64 = 8.0;

/// Smallest width/height a resized group can shrink to
const MIN_RESIZE_EXTENT: f64 = 1.0;

/// Padding between a group's bounds and its selection outline
const GROUP_OUTLINE_PADDING: f64 = 5.0;

/// Default stroke width for new shapes and arrows
const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Default font size for text shapes
const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Default font family for text shapes
const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Advance width per character as a fraction of the font size, used to
/// approximate text extents for hit-testing
const TEXT_ADVANCE_FACTOR: f64 = 0.6;

// ============================================================================
// ARROWS
// ============================================================================
/// Arrowhead side length (pixels)
const ARROW_HEAD_SIZE: f64 = 8.0;

/// Vertical offset of an arrow label above the arrow midpoint
const ARROW_LABEL_OFFSET: f64 = 10.0;

// ============================================================================
// CANVAS AND GRID
// ============================================================================
/// Default drawing surface width (pixels)
const CANVAS_WIDTH: f64 = 800.0;

/// Default drawing surface height (pixels)
const CANVAS_HEIGHT: f64 = 600.0;

/// Background grid spacing (pixels)
const GRID_SIZE: f64 = 40.0;

/// Smallest grid spacing that is drawn (pixels)
const MIN_GRID_SIZE: f64 = 2.0;

/// Largest accepted surface width or height (pixels)
const MAX_SURFACE_EXTENT: f64 = 32768.0;

// ============================================================================
// GUIDES
// ============================================================================
/// Distance within which the pointer snaps onto an active guide
const GUIDE_SNAP_DISTANCE: f64 = 5.0;

// ============================================================================
// RENDERING
// ============================================================================
/// Anchor dot radius
const ANCHOR_RADIUS: f64 = 4.0;

/// Handle dot radius
const HANDLE_RADIUS: f64 = 3.0;

/// Dash pattern for previews and selection outlines
const PREVIEW_DASH: [f64; 2] = [5.0, 5.0];

/// Dash pattern for the segment that snaps to the first anchor
const CLOSING_DASH: [f64; 2] = [2.0, 2.0];

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Hit-test tolerances
pub mod hit {
    /// Pick radius for anchors, handles and segments
    pub const TOLERANCE: f64 = super::HIT_TOLERANCE;

    /// Closing distance around the first anchor
    pub const CLOSE_PATH: f64 = super::CLOSE_PATH_TOLERANCE;
}

/// Pen path authoring
pub mod pen {
    pub const SMOOTH_HANDLE_DIVISOR: f64 = super::SMOOTH_HANDLE_DIVISOR;
    pub const CONVERT_HANDLE_OFFSET: f64 = super::CONVERT_HANDLE_OFFSET;
    pub const MIN_ANCHORS_TO_CLOSE: usize = super::MIN_ANCHORS_TO_CLOSE;
    pub const MIN_ANCHORS_TO_SAVE: usize = super::MIN_ANCHORS_TO_SAVE;
}

/// Shape defaults and resize behavior
pub mod shapes {
    pub const RESIZE_HANDLE_SIZE: f64 = super::RESIZE_HANDLE_SIZE;
    pub const MIN_RESIZE_EXTENT: f64 = super::MIN_RESIZE_EXTENT;
    pub const GROUP_OUTLINE_PADDING: f64 = super::GROUP_OUTLINE_PADDING;
    pub const DEFAULT_STROKE_WIDTH: f64 = super::DEFAULT_STROKE_WIDTH;
    pub const DEFAULT_FONT_SIZE: f64 = super::DEFAULT_FONT_SIZE;
    pub const DEFAULT_FONT_FAMILY: &str = super::DEFAULT_FONT_FAMILY;
    pub const TEXT_ADVANCE_FACTOR: f64 = super::TEXT_ADVANCE_FACTOR;
}

/// Arrow rendering
pub mod arrow {
    pub const HEAD_SIZE: f64 = super::ARROW_HEAD_SIZE;
    pub const LABEL_OFFSET: f64 = super::ARROW_LABEL_OFFSET;
}

/// Canvas defaults (see [`super::CanvasSettings`] for runtime overrides)
pub mod canvas {
    pub const WIDTH: f64 = super::CANVAS_WIDTH;
    pub const HEIGHT: f64 = super::CANVAS_HEIGHT;
    pub const GRID_SIZE: f64 = super::GRID_SIZE;
    pub const MIN_GRID_SIZE: f64 = super::MIN_GRID_SIZE;
    pub const MAX_SURFACE_EXTENT: f64 = super::MAX_SURFACE_EXTENT;
}

/// Guide snapping
pub mod guides {
    pub const SNAP_DISTANCE: f64 = super::GUIDE_SNAP_DISTANCE;
}

/// Display list geometry
pub mod render {
    pub const ANCHOR_RADIUS: f64 = super::ANCHOR_RADIUS;
    pub const HANDLE_RADIUS: f64 = super::HANDLE_RADIUS;
    pub const PREVIEW_DASH: [f64; 2] = super::PREVIEW_DASH;
    pub const CLOSING_DASH: [f64; 2] = super::CLOSING_DASH;
}

// ============================================================================
// RUNTIME SETTINGS
// ============================================================================

/// Drawing surface settings supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Surface width in pixels
    pub width: f64,
    /// Surface height in pixels
    pub height: f64,
    /// Grid spacing in pixels
    pub grid_size: f64,
    /// Whether the background grid is drawn
    pub show_grid: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: canvas::WIDTH,
            height: canvas::HEIGHT,
            grid_size: canvas::GRID_SIZE,
            show_grid: true,
        }
    }
}

/// Top-level layout of a settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    canvas: CanvasSettings,
}

impl CanvasSettings {
    /// Parse settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(text).context("Invalid settings TOML")?;
        file.canvas.validate()?;
        Ok(file.canvas)
    }

    /// Reject surface sizes and grid spacing that cannot be drawn.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value.is_nan() || value <= 0.0 || value > canvas::MAX_SURFACE_EXTENT {
                bail!(
                    "Canvas {name} must be in (0, {}], got {value}",
                    canvas::MAX_SURFACE_EXTENT
                );
            }
        }
        if !self.grid_size.is_finite() || self.grid_size < canvas::MIN_GRID_SIZE {
            bail!(
                "Canvas grid_size must be at least {}, got {}",
                canvas::MIN_GRID_SIZE,
                self.grid_size
            );
        }
        Ok(())
    }

    /// Load settings from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let settings = CanvasSettings::default();
        assert_eq!(settings.width, 800.0);
        assert_eq!(settings.height, 600.0);
        assert_eq!(settings.grid_size, 40.0);
        assert!(settings.show_grid);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = CanvasSettings::from_toml_str("[canvas]\nwidth = 1024.0\n").unwrap();
        assert_eq!(settings.width, 1024.0);
        assert_eq!(settings.height, 600.0);
    }

    #[test]
    fn test_empty_toml() {
        let settings = CanvasSettings::from_toml_str("").unwrap();
        assert_eq!(settings, CanvasSettings::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(CanvasSettings::from_toml_str("[canvas]\nwidth = \"wide\"").is_err());
    }

    #[test]
    fn test_degenerate_values_rejected() {
        assert!(CanvasSettings::from_toml_str("[canvas]\ngrid_size = 1e-300\n").is_err());
        assert!(CanvasSettings::from_toml_str("[canvas]\ngrid_size = nan\n").is_err());
        assert!(CanvasSettings::from_toml_str("[canvas]\nwidth = inf\n").is_err());
        assert!(CanvasSettings::from_toml_str("[canvas]\nheight = 0.0\n").is_err());
        assert!(CanvasSettings::from_toml_str("[canvas]\ngrid_size = 10.0\n").is_ok());
    }
}
