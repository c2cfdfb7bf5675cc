// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ranges — labelled, ordered groupings of canvases emitted as a manifest's
// `structures` (chapters, movements, tracks).

use prezi_core::{EntityKind, Label, PreziError, Result};

use crate::canvas::Canvas;
use crate::id::{IdSource, Scope, uri};

#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    id: String,
    label: Option<Label>,
    canvases: Vec<String>,
    frozen: bool,
}

impl Range {
    pub fn new<'a>(id: impl Into<IdSource<'a>>) -> Result<Self> {
        let id = id.into().resolve(Scope::Range, None)?;
        Ok(Self {
            id,
            label: None,
            canvases: Vec::new(),
            frozen: false,
        })
    }

    pub fn set_label(&mut self, label: Label) -> Result<&mut Self> {
        self.ensure_mutable("set label")?;
        self.label = Some(label);
        Ok(self)
    }

    /// Append a reference to `canvas`.
    pub fn add_canvas(&mut self, canvas: &Canvas) -> Result<&mut Self> {
        self.add_canvas_id(canvas.id())
    }

    /// Append a reference to the canvas identified by `canvas_id`. The canvas
    /// must exist in the manifest by the time it is serialized.
    pub fn add_canvas_id(&mut self, canvas_id: &str) -> Result<&mut Self> {
        self.ensure_mutable("add canvas")?;
        uri::require_absolute(EntityKind::Canvas, canvas_id)?;
        self.canvases.push(canvas_id.to_owned());
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn canvas_ids(&self) -> &[String] {
        &self.canvases
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }

    pub(crate) fn ensure_mutable(&self, operation: &'static str) -> Result<()> {
        if self.frozen {
            Err(PreziError::ImmutableState {
                kind: EntityKind::Range,
                id: self.id.clone(),
                operation,
            })
        } else {
            Ok(())
        }
    }
}
