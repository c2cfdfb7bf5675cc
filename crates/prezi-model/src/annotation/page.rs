// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Annotation pages — ordered groups of painting annotations owned by a canvas.

use prezi_core::{EntityKind, PreziError, Result};
use tracing::debug;

use super::painting::PaintingAnnotation;
use crate::canvas::Canvas;
use crate::id::{IdSource, Scope};

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationPage {
    id: String,
    annotations: Vec<PaintingAnnotation>,
    frozen: bool,
}

impl AnnotationPage {
    /// Create a page. A minted identifier hangs off the manifest.
    pub fn new<'a>(id: impl Into<IdSource<'a>>) -> Result<Self> {
        Self::with_id(id.into().resolve(Scope::Page, None)?)
    }

    /// Create a page for `canvas`. A minted identifier hangs off the canvas.
    pub fn for_canvas<'a>(id: impl Into<IdSource<'a>>, canvas: &Canvas) -> Result<Self> {
        Self::with_id(id.into().resolve(Scope::Page, Some(canvas.id()))?)
    }

    fn with_id(id: String) -> Result<Self> {
        Ok(Self {
            id,
            annotations: Vec::new(),
            frozen: false,
        })
    }

    /// Append annotations in order, freezing each one.
    ///
    /// Nothing is appended if the page or any annotation is already frozen.
    pub fn add_annotations(&mut self, annotations: Vec<PaintingAnnotation>) -> Result<&mut Self> {
        self.ensure_mutable("add annotations")?;
        for annotation in &annotations {
            annotation.ensure_mutable("attach to page")?;
        }

        for mut annotation in annotations {
            annotation.freeze();
            self.annotations.push(annotation);
        }
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn annotations(&self) -> &[PaintingAnnotation] {
        &self.annotations
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn freeze(&mut self) {
        if !self.frozen {
            debug!(id = %self.id, annotations = self.annotations.len(), "Annotation page attached");
            self.frozen = true;
        }
    }

    pub(crate) fn ensure_mutable(&self, operation: &'static str) -> Result<()> {
        if self.frozen {
            Err(PreziError::ImmutableState {
                kind: EntityKind::AnnotationPage,
                id: self.id.clone(),
                operation,
            })
        } else {
            Ok(())
        }
    }
}
