// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Headless gesture replay
//!
//! A script is a JSON array of steps, each tagged by `op`:
//!
//! ```json
//! [
//!   { "op": "tool", "tool": "pen" },
//!   { "op": "click", "x": 100, "y": 100 },
//!   { "op": "click", "x": 200, "y": 100, "mods": { "shift": true } },
//!   { "op": "save" }
//! ]
//! ```
//!
//! Steps drive an [`Editor`] exactly as a host would, and every saved path
//! is collected in order.

use crate::editing::{Key, Modifiers};
use crate::editor::{Editor, EditorHost};
use crate::model::{Alignment, ArrowId, ColorTarget, GuideOrientation, LayerId, LayerMove, TextAlign};
use crate::settings::CanvasSettings;
use crate::tools::ToolId;
use anyhow::{Context, Result};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One scripted input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Tool {
        tool: ToolId,
    },
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        mods: Modifiers,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        mods: Modifiers,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        mods: Modifiers,
    },
    /// Down and up at the same spot
    Click {
        x: f64,
        y: f64,
        #[serde(default)]
        mods: Modifiers,
    },
    /// Down, one move, up
    Drag {
        from: [f64; 2],
        to: [f64; 2],
        #[serde(default)]
        mods: Modifiers,
    },
    Key {
        key: Key,
        #[serde(default)]
        mods: Modifiers,
    },
    /// Commit the pending text entry
    Text {
        text: String,
    },
    Undo,
    Redo,
    Save,
    Close,
    Fill {
        color: String,
    },
    Stroke {
        color: String,
    },
    StrokeWidth {
        width: f64,
    },
    FontFamily {
        family: String,
    },
    FontSize {
        size: f64,
    },
    TextAlign {
        align: TextAlign,
    },
    Group,
    Ungroup,
    Align {
        alignment: Alignment,
    },
    Recolor {
        target: ColorTarget,
        color: String,
    },
    BringToFront,
    SendToBack,
    Delete,
    AddLayer,
    DeleteLayer {
        layer: LayerId,
    },
    SetActiveLayer {
        layer: LayerId,
    },
    ToggleLayerVisibility {
        layer: LayerId,
    },
    ToggleLayerLock {
        layer: LayerId,
    },
    MoveLayer {
        layer: LayerId,
        direction: LayerMove,
    },
    AddGuide {
        orientation: GuideOrientation,
        position: f64,
    },
    ShowGuides {
        enabled: bool,
    },
    SnapToGuides {
        enabled: bool,
    },
    LabelArrow {
        arrow: ArrowId,
        label: Option<String>,
    },
}

/// Host that records what the editor reported
#[derive(Debug, Default)]
pub struct CollectingHost {
    pub saved: Vec<String>,
    pub closed: bool,
}

impl EditorHost for CollectingHost {
    fn on_save(&mut self, path: &str) {
        self.saved.push(path.to_string());
    }

    fn on_close(&mut self) {
        self.closed = true;
    }
}

pub fn parse_script(text: &str) -> Result<Vec<Step>> {
    serde_json::from_str(text).context("Invalid replay script")
}

pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse_script(&text).with_context(|| format!("In script {}", path.display()))
}

/// Run `steps` against a fresh editor and return it for inspection
pub fn replay(steps: &[Step], canvas: CanvasSettings) -> Result<Editor<CollectingHost>> {
    let mut editor = Editor::new(CollectingHost::default(), canvas);
    for (index, step) in steps.iter().enumerate() {
        apply(&mut editor, step).with_context(|| format!("Step {} ({:?}) failed", index + 1, step))?;
    }
    tracing::info!(
        "Replayed {} steps, {} paths saved",
        steps.len(),
        editor.host().saved.len()
    );
    Ok(editor)
}

fn apply<H: EditorHost>(editor: &mut Editor<H>, step: &Step) -> Result<()> {
    match step {
        Step::Tool { tool } => editor.set_tool(*tool),
        Step::Down { x, y, mods } => editor.pointer_down(Point::new(*x, *y), *mods),
        Step::Move { x, y, mods } => editor.pointer_move(Point::new(*x, *y), *mods),
        Step::Up { x, y, mods } => editor.pointer_up(Point::new(*x, *y), *mods),
        Step::Click { x, y, mods } => {
            let pos = Point::new(*x, *y);
            editor.pointer_down(pos, *mods);
            editor.pointer_up(pos, *mods);
        }
        Step::Drag { from, to, mods } => {
            let to = Point::new(to[0], to[1]);
            editor.pointer_down(Point::new(from[0], from[1]), *mods);
            editor.pointer_move(to, *mods);
            editor.pointer_up(to, *mods);
        }
        Step::Key { key, mods } => {
            editor.key_down(key, *mods);
        }
        Step::Text { text } => {
            editor.commit_text(text);
        }
        Step::Undo => {
            editor.undo();
        }
        Step::Redo => {
            editor.redo();
        }
        Step::Save => {
            if editor.save().is_none() {
                tracing::warn!("Save skipped: pen path needs at least 2 anchors");
            }
        }
        Step::Close => editor.close(),
        Step::Fill { color } => editor.set_fill(color.as_str()),
        Step::Stroke { color } => editor.set_stroke(color.as_str()),
        Step::StrokeWidth { width } => editor.set_stroke_width(*width),
        Step::FontFamily { family } => editor.set_font_family(family.as_str()),
        Step::FontSize { size } => editor.set_font_size(*size),
        Step::TextAlign { align } => editor.set_text_align(*align),
        Step::Group => {
            editor.group_selection()?;
        }
        Step::Ungroup => {
            editor.ungroup_selection();
        }
        Step::Align { alignment } => {
            editor.align_selection(*alignment)?;
        }
        Step::Recolor { target, color } => {
            editor.recolor_selection(*target, color);
        }
        Step::BringToFront => editor.bring_selection_to_front(),
        Step::SendToBack => editor.send_selection_to_back(),
        Step::Delete => {
            editor.delete_selection();
        }
        Step::AddLayer => {
            editor.add_layer();
        }
        Step::DeleteLayer { layer } => editor.delete_layer(*layer)?,
        Step::SetActiveLayer { layer } => editor.set_active_layer(*layer)?,
        Step::ToggleLayerVisibility { layer } => {
            editor.toggle_layer_visibility(*layer)?;
        }
        Step::ToggleLayerLock { layer } => {
            editor.toggle_layer_lock(*layer)?;
        }
        Step::MoveLayer { layer, direction } => {
            editor.move_layer(*layer, *direction)?;
        }
        Step::AddGuide {
            orientation,
            position,
        } => editor.add_guide(*orientation, *position),
        Step::ShowGuides { enabled } => editor.set_show_guides(*enabled),
        Step::SnapToGuides { enabled } => editor.set_snap_to_guides(*enabled),
        Step::LabelArrow { arrow, label } => editor.label_arrow(*arrow, label.clone())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShapeKind;

    #[test]
    fn test_replay_square() {
        let script = r#"[
            { "op": "tool", "tool": "pen" },
            { "op": "click", "x": 0, "y": 0 },
            { "op": "click", "x": 50, "y": 0 },
            { "op": "click", "x": 50, "y": 50 },
            { "op": "click", "x": 0, "y": 50 },
            { "op": "key", "key": "Escape" },
            { "op": "save" },
            { "op": "close" }
        ]"#;
        let steps = parse_script(script).unwrap();
        let editor = replay(&steps, CanvasSettings::default()).unwrap();
        assert_eq!(editor.host().saved, vec!["M 0 0 L 50 0 L 50 50 L 0 50 Z"]);
        assert!(editor.host().closed);
    }

    #[test]
    fn test_replay_shapes_and_group() {
        let script = r#"[
            { "op": "tool", "tool": "rectangle" },
            { "op": "drag", "from": [10, 10], "to": [50, 50] },
            { "op": "tool", "tool": "circle" },
            { "op": "drag", "from": [100, 100], "to": [120, 100] },
            { "op": "tool", "tool": "select" },
            { "op": "click", "x": 20, "y": 20 },
            { "op": "click", "x": 100, "y": 100, "mods": { "shift": true } },
            { "op": "group" },
            { "op": "align", "alignment": "left" }
        ]"#;
        let editor = replay(&parse_script(script).unwrap(), CanvasSettings::default()).unwrap();
        let document = &editor.session().document;
        assert_eq!(document.groups().len(), 1);
        let circle = document
            .visible_shapes()
            .find(|shape| shape.kind == ShapeKind::Circle)
            .unwrap();
        assert_eq!(circle.visual_bounds().unwrap().x0, 10.0);
    }

    #[test]
    fn test_failing_step_reports_position() {
        let script = r#"[
            { "op": "tool", "tool": "rectangle" },
            { "op": "group" }
        ]"#;
        let Err(err) = replay(&parse_script(script).unwrap(), CanvasSettings::default()) else {
            panic!("grouping a single shape should fail");
        };
        assert!(err.to_string().starts_with("Step 2"));
    }

    #[test]
    fn test_unknown_op_rejected() {
        assert!(parse_script(r#"[{ "op": "teleport" }]"#).is_err());
    }
}
