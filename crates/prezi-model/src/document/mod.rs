// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Manifest serialization — validate the object graph, then emit the
// Presentation 3 JSON-LD document. Emitted documents can be read back.

mod emit;
mod parse;
mod validate;

pub(crate) use parse::{read_str, read_value};

use std::path::Path;

use prezi_core::{PresentationConfig, Result};
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

use crate::manifest::Manifest;

/// An emitted manifest document.
///
/// Property order is fixed and sequences keep insertion order, so the same
/// graph always produces byte-identical JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: emit::ManifestNode,
    pretty: bool,
}

impl Document {
    /// Compact JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.root)?)
    }

    /// Indented JSON text.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// The document as a JSON tree, for inspection.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(&self.root)?)
    }

    /// SHA-256 of the compact JSON as a lowercase hex string.
    ///
    /// Two manifests built the same way produce the same fingerprint.
    pub fn fingerprint(&self) -> Result<String> {
        let json = self.to_json()?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    /// Write the document to `path` in the style chosen by the configuration
    /// it was serialized with.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = if self.pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        std::fs::write(path.as_ref(), text)?;
        info!(path = %path.as_ref().display(), "Wrote manifest document");
        Ok(())
    }
}

/// Validate `manifest` and emit it with default settings.
pub fn serialize(manifest: &Manifest) -> Result<Document> {
    serialize_with(manifest, &PresentationConfig::default())
}

/// Validate `manifest` and emit it.
///
/// Nothing is emitted when validation fails; the first violation is returned.
#[instrument(skip_all, fields(manifest = %manifest.id()))]
pub fn serialize_with(manifest: &Manifest, config: &PresentationConfig) -> Result<Document> {
    if let Err(err) = validate::validate(manifest) {
        warn!(error = %err, "Manifest failed validation");
        return Err(err);
    }

    let root = emit::manifest(manifest, config);
    info!(
        canvases = manifest.canvases().len(),
        ranges = manifest.ranges().len(),
        "Serialized manifest"
    );
    Ok(Document {
        root,
        pretty: config.pretty,
    })
}
