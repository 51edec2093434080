// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Penline: a vector pen-path editing engine
//!
//! The engine is surface-agnostic. A host forwards pointer and keyboard
//! input to an [`Editor`], replays the display list from
//! [`Editor::render`] on its own 2D surface, and receives saved paths as
//! SVG path data through [`EditorHost`].

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

pub mod editing;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod model;
pub mod render;
pub mod replay;
pub mod serialize;
pub mod settings;
pub mod theme;
pub mod tools;

pub use editor::{Editor, EditorHost};
pub use error::EditError;
pub use settings::CanvasSettings;

const USAGE: &str = "Usage: penline <script.json> [--settings <settings.toml>]";

/// Entry point for the headless replay binary
pub fn run() -> Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("penline=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_command_line_args(std::env::args().skip(1))?;
    let canvas = match &args.settings {
        Some(path) => {
            tracing::info!("Loading settings from: {}", path.display());
            CanvasSettings::load(path)?
        }
        None => CanvasSettings::default(),
    };

    tracing::info!("Replaying: {}", args.script.display());
    let steps = replay::load_script(&args.script)?;
    let editor = replay::replay(&steps, canvas)
        .with_context(|| format!("Replay of {} failed", args.script.display()))?;

    for path in &editor.host().saved {
        println!("{path}");
    }
    Ok(())
}

/// Command-line arguments of the replay binary
#[derive(Debug, PartialEq)]
struct Args {
    script: PathBuf,
    settings: Option<PathBuf>,
}

fn parse_command_line_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut script = None;
    let mut settings = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" => {
                let path = args.next().context("--settings needs a path")?;
                settings = Some(PathBuf::from(path));
            }
            "-h" | "--help" => bail!(USAGE),
            _ if script.is_none() => script = Some(PathBuf::from(&arg)),
            _ => bail!("Unexpected argument '{arg}'\n{USAGE}"),
        }
    }
    let script = script.context(USAGE)?;
    Ok(Args { script, settings })
}
