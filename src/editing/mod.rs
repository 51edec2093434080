// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing state and interaction

pub mod mouse;
pub mod selection;
pub mod session;
pub mod undo;

pub use mouse::{Key, Modifiers, MouseDelegate, MouseEvent};
pub use selection::Selection;
pub use session::{AnchorTarget, EditSession};
pub use undo::{EditAction, HistoryEntry, UndoState};
