// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Drawing data model

pub mod anchor;
pub mod document;
pub mod entity_id;
pub mod shape;

pub use anchor::{Anchor, AnchorKind, AnchorList, HandleSide};
pub use document::{Alignment, ColorTarget, Document, LayerMove, ResizeSnapshot};
pub use entity_id::{ArrowId, GroupId, IdSource, LayerId, ShapeId};
pub use shape::{
    Arrow, ArrowStyle, DrawingStyle, Group, Guide, GuideOrientation, Layer, Shape, ShapeKind,
    ShapeStyle, TextAlign, arrow_controls,
};
