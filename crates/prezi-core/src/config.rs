// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Presentation configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// IIIF Presentation 3 JSON-LD context.
pub const PRESENTATION_CONTEXT: &str = "http://iiif.io/api/presentation/3/context.json";

/// Settings that shape the emitted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// `@context` emitted at the top of every manifest.
    pub context_uri: String,
    /// Emit indented JSON when the caller asks for the configured style.
    pub pretty: bool,
    /// Language tag used for labels built by the demo harness.
    pub default_language: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            context_uri: PRESENTATION_CONTEXT.to_string(),
            pretty: true,
            default_language: crate::NO_LANGUAGE.to_string(),
        }
    }
}

impl PresentationConfig {
    /// Load settings from a JSON file. Missing keys fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }
}
