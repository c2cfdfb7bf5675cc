// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for prezi.

use thiserror::Error;

use crate::types::{EntityKind, ExtentKind};

/// Top-level error type for all manifest construction and serialization.
///
/// Every domain variant names the entity kind and identifier involved so a
/// violation can be located without a backtrace.
#[derive(Debug, Error)]
pub enum PreziError {
    // -- Construction errors --
    #[error("invalid extent on {kind} {id}: {reason}")]
    InvalidExtent {
        kind: EntityKind,
        id: String,
        reason: String,
    },

    #[error("invalid {kind} identifier {value:?}: not an absolute URI")]
    InvalidIdentifier { kind: EntityKind, value: String },

    #[error("invalid media fragment selector {value:?}: {reason}")]
    InvalidSelector { value: String, reason: String },

    #[error("invalid service on {id}: {reason}")]
    InvalidService { id: String, reason: String },

    #[error("{kind} {id} has an empty {property}")]
    EmptyProperty {
        kind: EntityKind,
        id: String,
        property: &'static str,
    },

    #[error("{kind} {id} is frozen, cannot {operation}")]
    ImmutableState {
        kind: EntityKind,
        id: String,
        operation: &'static str,
    },

    // -- Graph errors --
    #[error("duplicate {kind} identifier: {id}")]
    DuplicateIdentifier { kind: EntityKind, id: String },

    #[error("{kind} {id} targets unknown canvas {target}")]
    UnresolvedTarget {
        kind: EntityKind,
        id: String,
        target: String,
    },

    #[error("canvas {canvas} has no {missing} extent but {resource_kind} {resource} requires one")]
    IncompatibleExtent {
        canvas: String,
        resource_kind: EntityKind,
        resource: String,
        missing: ExtentKind,
    },

    #[error("{resource_kind} {resource} does not fit on canvas {canvas}: {reason}")]
    ContentOutOfBounds {
        canvas: String,
        resource_kind: EntityKind,
        resource: String,
        reason: String,
    },

    // -- Input --
    #[error("cannot read {kind} {id}: {reason}")]
    InvalidDocument {
        kind: EntityKind,
        id: String,
        reason: String,
    },

    // -- Output --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PreziError {
    /// The identifier of the entity the error is about, when there is one.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::InvalidExtent { id, .. }
            | Self::InvalidService { id, .. }
            | Self::EmptyProperty { id, .. }
            | Self::ImmutableState { id, .. }
            | Self::DuplicateIdentifier { id, .. }
            | Self::UnresolvedTarget { id, .. }
            | Self::InvalidDocument { id, .. } => Some(id),
            Self::InvalidIdentifier { value, .. } | Self::InvalidSelector { value, .. } => {
                Some(value)
            }
            Self::IncompatibleExtent { canvas, .. } | Self::ContentOutOfBounds { canvas, .. } => {
                Some(canvas)
            }
            Self::Io(_) | Self::Serialization(_) => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PreziError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_entity_and_identifier() {
        let err = PreziError::IncompatibleExtent {
            canvas: "https://example.org/m/canvas-1".into(),
            resource_kind: EntityKind::ContentResource,
            resource: "https://example.org/page.jpg".into(),
            missing: ExtentKind::Spatial,
        };
        let msg = err.to_string();
        assert!(msg.contains("canvas-1"));
        assert!(msg.contains("spatial"));
        assert!(msg.contains("page.jpg"));
        assert_eq!(err.identifier(), Some("https://example.org/m/canvas-1"));
    }

    #[test]
    fn frozen_message_names_operation() {
        let err = PreziError::ImmutableState {
            kind: EntityKind::Annotation,
            id: "https://example.org/m/annotations/anno-1".into(),
            operation: "set bodies",
        };
        assert_eq!(
            err.to_string(),
            "annotation https://example.org/m/annotations/anno-1 is frozen, cannot set bodies"
        );
    }

    #[test]
    fn empty_property_names_the_property() {
        let err = PreziError::EmptyProperty {
            kind: EntityKind::Annotation,
            id: "https://example.org/m/annotations/anno-1".into(),
            property: "body",
        };
        assert_eq!(
            err.to_string(),
            "annotation https://example.org/m/annotations/anno-1 has an empty body"
        );
        assert_eq!(err.identifier(), Some("https://example.org/m/annotations/anno-1"));
    }

    #[test]
    fn io_errors_have_no_identifier() {
        let err = PreziError::from(std::io::Error::other("disk full"));
        assert!(err.identifier().is_none());
    }
}
