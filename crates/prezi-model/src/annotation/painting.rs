// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Painting annotations — pair content resources with a region of a canvas.

use prezi_core::{EntityKind, PreziError, Result};
use tracing::debug;

use super::selector::Target;
use crate::canvas::Canvas;
use crate::content::ContentResource;
use crate::id::{IdSource, Scope};

/// States that `bodies` should be rendered at `target`.
///
/// Bodies and target may each be set once before the annotation is added to a
/// page; adding it to a page freezes it.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintingAnnotation {
    id: String,
    target: Target,
    bodies: Vec<ContentResource>,
    bodies_set: bool,
    target_set: bool,
    frozen: bool,
}

impl PaintingAnnotation {
    /// Create an annotation targeting the whole of `canvas`.
    pub fn new<'a>(id: impl Into<IdSource<'a>>, canvas: &Canvas) -> Result<Self> {
        let id = id.into().resolve(Scope::Annotation, None)?;
        Ok(Self {
            id,
            target: Target::canvas(canvas.id()),
            bodies: Vec::new(),
            bodies_set: false,
            target_set: false,
            frozen: false,
        })
    }

    /// Set the content painted by this annotation, in presentation order.
    /// More than one body is a choice of equivalent renderings; at least one
    /// is required.
    pub fn set_bodies(&mut self, mut bodies: Vec<ContentResource>) -> Result<&mut Self> {
        self.ensure_mutable("set bodies")?;
        if self.bodies_set {
            return Err(self.frozen_error("set bodies twice"));
        }
        if bodies.is_empty() {
            return Err(PreziError::EmptyProperty {
                kind: EntityKind::Annotation,
                id: self.id.clone(),
                property: "body",
            });
        }
        for body in &bodies {
            body.ensure_mutable("attach to annotation")?;
        }
        for body in &mut bodies {
            body.freeze();
        }
        self.bodies = bodies;
        self.bodies_set = true;
        Ok(self)
    }

    /// Point the annotation at a different canvas or a fragment of one.
    pub fn set_target(&mut self, target: Target) -> Result<&mut Self> {
        self.ensure_mutable("set target")?;
        if self.target_set {
            return Err(self.frozen_error("set target twice"));
        }
        self.target = target;
        self.target_set = true;
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn bodies(&self) -> &[ContentResource] {
        &self.bodies
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn freeze(&mut self) {
        if !self.frozen {
            debug!(id = %self.id, target = %self.target, bodies = self.bodies.len(), "Annotation attached");
            self.frozen = true;
        }
    }

    pub(crate) fn ensure_mutable(&self, operation: &'static str) -> Result<()> {
        if self.frozen {
            Err(self.frozen_error(operation))
        } else {
            Ok(())
        }
    }

    fn frozen_error(&self, operation: &'static str) -> PreziError {
        PreziError::ImmutableState {
            kind: EntityKind::Annotation,
            id: self.id.clone(),
            operation,
        }
    }
}
