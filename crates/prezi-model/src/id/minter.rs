// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Identifier minter — derives canonical identifiers for canvases, annotation
// pages, annotations, and ranges the caller did not name.
//
// Each minter is bound to one manifest. Counters are per scope and per minter;
// nothing is shared between minters.

use std::collections::HashSet;

use prezi_core::{EntityKind, Result};
use tracing::{debug, trace};

use super::uri;

/// The kind of sub-resource an identifier is minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Canvas,
    Page,
    Annotation,
    Range,
}

const SCOPE_COUNT: usize = 4;

impl Scope {
    fn index(self) -> usize {
        match self {
            Self::Canvas => 0,
            Self::Page => 1,
            Self::Annotation => 2,
            Self::Range => 3,
        }
    }

    /// Path appended to the parent identifier, before the counter.
    fn segment(self) -> &'static str {
        match self {
            Self::Canvas => "canvas-",
            Self::Page => "anno-page-",
            Self::Annotation => "annotations/anno-",
            Self::Range => "range-",
        }
    }

    pub fn entity_kind(self) -> EntityKind {
        match self {
            Self::Canvas => EntityKind::Canvas,
            Self::Page => EntityKind::AnnotationPage,
            Self::Annotation => EntityKind::Annotation,
            Self::Range => EntityKind::Range,
        }
    }
}

/// Mints collision-free identifiers under a manifest's base identifier.
///
/// Every identifier the minter hands out or is told about through
/// [`Minter::observe`] is remembered, and later minting skips counter values
/// whose URI is already taken.
#[derive(Debug, Clone)]
pub struct Minter {
    manifest_id: String,
    counters: [u64; SCOPE_COUNT],
    observed: HashSet<String>,
}

impl Minter {
    /// Create a minter for the manifest identified by `manifest_id`.
    pub fn new(manifest_id: impl Into<String>) -> Result<Self> {
        let manifest_id = manifest_id.into();
        uri::require_absolute(EntityKind::Manifest, &manifest_id)?;

        let mut observed = HashSet::new();
        observed.insert(manifest_id.clone());

        Ok(Self {
            manifest_id,
            counters: [0; SCOPE_COUNT],
            observed,
        })
    }

    pub fn manifest_id(&self) -> &str {
        &self.manifest_id
    }

    /// Mint the next free identifier in `scope` under `parent`.
    ///
    /// Never returns a value it has returned or observed before; callers must
    /// mint once per sub-resource and reuse the result.
    pub fn mint(&mut self, scope: Scope, parent: &str) -> String {
        let base = parent.trim_end_matches('/');

        loop {
            let counter = &mut self.counters[scope.index()];
            *counter += 1;
            let id = format!("{}/{}{}", base, scope.segment(), counter);

            if self.observed.insert(id.clone()) {
                debug!(?scope, %id, "Minted identifier");
                return id;
            }
            trace!(?scope, %id, "Skipping identifier already in use");
        }
    }

    /// Mint in `scope` with the manifest identifier as parent.
    pub fn mint_in(&mut self, scope: Scope) -> String {
        let parent = self.manifest_id.clone();
        self.mint(scope, &parent)
    }

    pub fn mint_canvas(&mut self) -> String {
        self.mint_in(Scope::Canvas)
    }

    /// Annotation pages are minted beneath the canvas that owns them.
    pub fn mint_page(&mut self, canvas_id: &str) -> String {
        self.mint(Scope::Page, canvas_id)
    }

    pub fn mint_annotation(&mut self) -> String {
        self.mint_in(Scope::Annotation)
    }

    pub fn mint_range(&mut self) -> String {
        self.mint_in(Scope::Range)
    }

    /// Record an identifier chosen by the caller so it is never minted.
    ///
    /// Returns `false` if the identifier was already known.
    pub fn observe(&mut self, id: impl Into<String>) -> bool {
        self.observed.insert(id.into())
    }
}

/// Where a new entity's identifier comes from: the caller, or a minter.
pub enum IdSource<'a> {
    Explicit(String),
    Minted(&'a mut Minter),
}

impl From<&str> for IdSource<'_> {
    fn from(id: &str) -> Self {
        Self::Explicit(id.to_owned())
    }
}

impl From<String> for IdSource<'_> {
    fn from(id: String) -> Self {
        Self::Explicit(id)
    }
}

impl<'a> From<&'a mut Minter> for IdSource<'a> {
    fn from(minter: &'a mut Minter) -> Self {
        Self::Minted(minter)
    }
}

impl IdSource<'_> {
    /// Produce the identifier for a new entity in `scope`. Minted identifiers
    /// hang off `parent` when given, otherwise off the manifest.
    pub(crate) fn resolve(self, scope: Scope, parent: Option<&str>) -> Result<String> {
        match self {
            Self::Explicit(id) => {
                uri::require_absolute(scope.entity_kind(), &id)?;
                Ok(id)
            }
            Self::Minted(minter) => Ok(match parent {
                Some(parent) => minter.mint(scope, parent),
                None => minter.mint_in(scope),
            }),
        }
    }
}
