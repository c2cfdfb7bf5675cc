// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Manifest — the top-level aggregate that owns canvases, ranges, and the
// minter that names their unnamed parts.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use prezi_core::{EntityKind, Label, MetadataEntry, PresentationConfig, PreziError, Result};
use tracing::info;

use crate::canvas::Canvas;
use crate::document::{self, Document};
use crate::id::Minter;
use crate::range::Range;

/// An ordered set of canvases plus descriptive properties.
///
/// The manifest owns its [`Minter`]; use [`Manifest::minter`] when building
/// canvases, pages, and annotations so minted identifiers never collide with
/// each other or with identifiers already in the manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    id: String,
    label: Label,
    summary: Option<Label>,
    metadata: Vec<MetadataEntry>,
    nav_date: Option<DateTime<Utc>>,
    canvases: Vec<Canvas>,
    ranges: Vec<Range>,
    minter: Minter,
}

impl Manifest {
    /// Create an empty manifest. The label must carry some text.
    pub fn new(id: impl Into<String>, label: Label) -> Result<Self> {
        let id = id.into();
        let minter = Minter::new(id.clone())?;
        if label.is_empty() {
            return Err(PreziError::EmptyProperty {
                kind: EntityKind::Manifest,
                id,
                property: "label",
            });
        }
        info!(%id, "Created manifest");
        Ok(Self {
            id,
            label,
            summary: None,
            metadata: Vec::new(),
            nav_date: None,
            canvases: Vec::new(),
            ranges: Vec::new(),
            minter,
        })
    }

    /// Read a manifest document.
    ///
    /// The graph is rebuilt through the same constructors a caller would use,
    /// so every part is frozen and every identifier is known to the minter.
    /// Graph-wide checks run on the next [`Manifest::to_document`].
    pub fn from_json(json: &str) -> Result<Self> {
        document::read_str(json)
    }

    /// Read a manifest document that is already parsed into a JSON tree.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        document::read_value(value)
    }

    /// The minter bound to this manifest.
    pub fn minter(&mut self) -> &mut Minter {
        &mut self.minter
    }

    // -- Canvases -------------------------------------------------------------

    /// Replace the canvas sequence.
    ///
    /// Fails with `DuplicateIdentifier` if two incoming canvases share an
    /// identifier, leaving the manifest unchanged.
    pub fn set_canvases(&mut self, canvases: Vec<Canvas>) -> Result<&mut Self> {
        let canvases = self.accept_canvases(&[], canvases)?;
        self.canvases = canvases;
        Ok(self)
    }

    /// Append canvases after the existing ones.
    ///
    /// Fails with `DuplicateIdentifier` if an incoming canvas repeats an
    /// identifier already in the sequence or in the batch.
    pub fn add_canvases(&mut self, canvases: Vec<Canvas>) -> Result<&mut Self> {
        let existing = std::mem::take(&mut self.canvases);
        let accepted = self.accept_canvases(&existing, canvases);
        self.canvases = existing;
        self.canvases.extend(accepted?);
        Ok(self)
    }

    fn accept_canvases(&mut self, existing: &[Canvas], mut incoming: Vec<Canvas>) -> Result<Vec<Canvas>> {
        let mut seen: HashSet<&str> = existing.iter().map(Canvas::id).collect();
        for canvas in &incoming {
            canvas.ensure_mutable("attach to manifest")?;
            if !seen.insert(canvas.id()) {
                return Err(PreziError::DuplicateIdentifier {
                    kind: EntityKind::Canvas,
                    id: canvas.id().to_owned(),
                });
            }
        }

        for canvas in &mut incoming {
            self.observe_canvas(canvas);
            canvas.freeze();
        }
        Ok(incoming)
    }

    /// Tell the minter about every identifier inside `canvas`.
    fn observe_canvas(&mut self, canvas: &Canvas) {
        self.minter.observe(canvas.id());
        for page in canvas.painting_pages() {
            self.minter.observe(page.id());
            for annotation in page.annotations() {
                self.minter.observe(annotation.id());
            }
        }
    }

    // -- Ranges ---------------------------------------------------------------

    /// Append ranges to the manifest's structures.
    pub fn add_ranges(&mut self, mut ranges: Vec<Range>) -> Result<&mut Self> {
        let mut seen: HashSet<&str> = self.ranges.iter().map(Range::id).collect();
        for range in &ranges {
            range.ensure_mutable("attach to manifest")?;
            if !seen.insert(range.id()) {
                return Err(PreziError::DuplicateIdentifier {
                    kind: EntityKind::Range,
                    id: range.id().to_owned(),
                });
            }
        }

        for range in &mut ranges {
            self.minter.observe(range.id());
            range.freeze();
        }
        self.ranges.extend(ranges);
        Ok(self)
    }

    // -- Descriptive properties -----------------------------------------------

    pub fn set_summary(&mut self, summary: Label) -> &mut Self {
        self.summary = Some(summary);
        self
    }

    pub fn add_metadata(&mut self, entry: MetadataEntry) -> &mut Self {
        self.metadata.push(entry);
        self
    }

    pub fn set_nav_date(&mut self, nav_date: DateTime<Utc>) -> &mut Self {
        self.nav_date = Some(nav_date);
        self
    }

    // -- Accessors ------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn summary(&self) -> Option<&Label> {
        self.summary.as_ref()
    }

    pub fn metadata(&self) -> &[MetadataEntry] {
        &self.metadata
    }

    pub fn nav_date(&self) -> Option<DateTime<Utc>> {
        self.nav_date
    }

    pub fn canvases(&self) -> &[Canvas] {
        &self.canvases
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    // -- Serialization --------------------------------------------------------

    /// Validate the graph and emit the document with default settings.
    pub fn to_document(&self) -> Result<Document> {
        document::serialize(self)
    }

    /// Validate the graph and emit the document with the given settings.
    pub fn to_document_with(&self, config: &PresentationConfig) -> Result<Document> {
        document::serialize_with(self, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "https://example.org/iiif/book1/manifest";

    fn manifest() -> Manifest {
        Manifest::new(MANIFEST, Label::tagged("en", "Book 1")).unwrap()
    }

    #[test]
    fn rejects_relative_identifier() {
        assert!(matches!(
            Manifest::new("book1", Label::new("Book 1")),
            Err(PreziError::InvalidIdentifier { kind: EntityKind::Manifest, .. })
        ));
    }

    #[test]
    fn rejects_blank_label() {
        let err = Manifest::new(MANIFEST, Label::tagged("en", " ")).unwrap_err();
        assert!(matches!(
            err,
            PreziError::EmptyProperty { kind: EntityKind::Manifest, property: "label", .. }
        ));
        assert!(Manifest::new(MANIFEST, Label::default()).is_err());
    }

    #[test]
    fn add_appends_and_set_replaces() {
        let mut manifest = manifest();
        let first = Canvas::new(manifest.minter()).unwrap();
        let second = Canvas::new(manifest.minter()).unwrap();
        let third = Canvas::new(manifest.minter()).unwrap();

        manifest.add_canvases(vec![first]).unwrap();
        manifest.add_canvases(vec![second]).unwrap();
        let ids: Vec<&str> = manifest.canvases().iter().map(Canvas::id).collect();
        assert_eq!(ids, [format!("{MANIFEST}/canvas-1"), format!("{MANIFEST}/canvas-2")]);

        manifest.set_canvases(vec![third]).unwrap();
        assert_eq!(manifest.canvases().len(), 1);
        assert_eq!(manifest.canvases()[0].id(), format!("{MANIFEST}/canvas-3"));
    }

    #[test]
    fn duplicate_canvas_is_rejected_atomically() {
        let mut manifest = manifest();
        let canvas = Canvas::new("https://example.org/c/1").unwrap();
        manifest.add_canvases(vec![canvas]).unwrap();

        let fresh = Canvas::new("https://example.org/c/2").unwrap();
        let again = Canvas::new("https://example.org/c/1").unwrap();
        let err = manifest.add_canvases(vec![fresh, again]).unwrap_err();
        assert!(matches!(
            err,
            PreziError::DuplicateIdentifier { kind: EntityKind::Canvas, ref id } if id == "https://example.org/c/1"
        ));
        assert_eq!(manifest.canvases().len(), 1);
    }

    #[test]
    fn duplicate_within_replacement_batch() {
        let mut manifest = manifest();
        let a = Canvas::new("https://example.org/c/1").unwrap();
        let b = Canvas::new("https://example.org/c/1").unwrap();
        assert!(manifest.set_canvases(vec![a, b]).is_err());
        assert!(manifest.canvases().is_empty());
    }

    #[test]
    fn attached_canvas_is_frozen() {
        let mut manifest = manifest();
        let canvas = Canvas::new(manifest.minter()).unwrap();
        manifest.add_canvases(vec![canvas]).unwrap();
        assert!(manifest.canvases()[0].is_frozen());

        let mut other = Manifest::new("https://example.org/iiif/book2/manifest", Label::new("2"))
            .unwrap();
        let copy = manifest.canvases()[0].clone();
        assert!(matches!(
            other.add_canvases(vec![copy]),
            Err(PreziError::ImmutableState { kind: EntityKind::Canvas, .. })
        ));
    }

    #[test]
    fn explicit_ids_are_never_minted() {
        let mut manifest = manifest();
        let explicit: Vec<Canvas> = [2, 3]
            .iter()
            .map(|n| Canvas::new(format!("{MANIFEST}/canvas-{n}")).unwrap())
            .collect();
        manifest.add_canvases(explicit).unwrap();

        let minted: Vec<String> = (0..3)
            .map(|_| Canvas::new(manifest.minter()).unwrap().id().to_owned())
            .collect();
        assert_eq!(
            minted,
            [
                format!("{MANIFEST}/canvas-1"),
                format!("{MANIFEST}/canvas-4"),
                format!("{MANIFEST}/canvas-5"),
            ]
        );
    }

    #[test]
    fn from_json_continues_minting_after_read_ids() {
        let mut original = manifest();
        let mut canvas = Canvas::new(original.minter()).unwrap();
        canvas.set_width_height(10, 10).unwrap();
        original.add_canvases(vec![canvas]).unwrap();
        let json = original.to_document().unwrap().to_json().unwrap();

        let mut read = Manifest::from_json(&json).unwrap();
        assert_eq!(read.id(), MANIFEST);
        assert_eq!(read.label(), original.label());
        assert_eq!(
            Canvas::new(read.minter()).unwrap().id(),
            format!("{MANIFEST}/canvas-2")
        );
    }

    #[test]
    fn duplicate_range_is_rejected() {
        let mut manifest = manifest();
        let a = Range::new("https://example.org/r/1").unwrap();
        let b = Range::new("https://example.org/r/1").unwrap();
        assert!(matches!(
            manifest.add_ranges(vec![a, b]),
            Err(PreziError::DuplicateIdentifier { kind: EntityKind::Range, .. })
        ));
        assert!(manifest.ranges().is_empty());
    }
}
