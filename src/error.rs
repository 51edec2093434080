// Copyright 2025 the Penline Authors
// SPDX-License-Identifier: Apache-2.0

//! Errors returned by host-facing document commands.
//!
//! Gestures that simply miss their target are not errors; they are no-ops
//! reported through `Option`/`bool`. `EditError` covers commands that
//! address something that does not exist or would break a document
//! invariant.

use crate::model::{ArrowId, GroupId, LayerId, ShapeId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("selection spans {count} groups; resize needs exactly one")]
    AmbiguousResizeTarget { count: usize },

    #[error("no layer with id {0}")]
    UnknownLayer(LayerId),

    #[error("cannot delete the last remaining layer")]
    LastLayer,

    #[error("no shape with id {0}")]
    UnknownShape(ShapeId),

    #[error("no group with id {0}")]
    UnknownGroup(GroupId),

    #[error("no arrow with id {0}")]
    UnknownArrow(ArrowId),

    #[error("operation needs at least {needed} selected shapes, got {got}")]
    NotEnoughShapes { needed: usize, got: usize },
}
