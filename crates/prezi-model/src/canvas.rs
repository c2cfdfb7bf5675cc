// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canvas — a presentation surface with a spatial and/or temporal extent onto
// which content is painted.

use prezi_core::{EntityKind, ExtentKinds, Label, PreziError, Result};
use tracing::debug;

use crate::annotation::{AnnotationPage, MediaFragment, PaintingAnnotation, Target};
use crate::content::ContentResource;
use crate::id::{IdSource, Minter, Scope};

/// A canvas and its painting pages.
///
/// Repeated [`Canvas::paint_with`] calls append one page each, so stacked
/// content keeps its order; [`Canvas::set_painting_pages`] replaces the whole
/// sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    id: String,
    label: Option<Label>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<f64>,
    pages: Vec<AnnotationPage>,
    frozen: bool,
}

impl Canvas {
    /// Create a canvas with the given identifier, or mint one.
    pub fn new<'a>(id: impl Into<IdSource<'a>>) -> Result<Self> {
        let id = id.into().resolve(Scope::Canvas, None)?;
        Ok(Self {
            id,
            label: None,
            width: None,
            height: None,
            duration: None,
            pages: Vec::new(),
            frozen: false,
        })
    }

    // -- Descriptive and extent setters ---------------------------------------

    pub fn set_label(&mut self, label: Label) -> Result<&mut Self> {
        self.ensure_mutable("set label")?;
        self.label = Some(label);
        Ok(self)
    }

    /// Declare the canvas's pixel dimensions. Both must be positive.
    pub fn set_width_height(&mut self, width: u32, height: u32) -> Result<&mut Self> {
        self.ensure_mutable("set width and height")?;
        if width == 0 || height == 0 {
            return Err(PreziError::InvalidExtent {
                kind: EntityKind::Canvas,
                id: self.id.clone(),
                reason: format!("width and height must be positive, got {width}x{height}"),
            });
        }
        self.width = Some(width);
        self.height = Some(height);
        Ok(self)
    }

    /// Declare the canvas's running time in seconds.
    pub fn set_duration(&mut self, seconds: f64) -> Result<&mut Self> {
        self.ensure_mutable("set duration")?;
        if !(seconds.is_finite() && seconds > 0.0) {
            return Err(PreziError::InvalidExtent {
                kind: EntityKind::Canvas,
                id: self.id.clone(),
                reason: format!("duration must be positive, got {seconds}"),
            });
        }
        self.duration = Some(seconds);
        Ok(self)
    }

    // -- Painting -------------------------------------------------------------

    /// Paint `contents` onto the whole canvas.
    ///
    /// Creates one page holding one annotation whose body is `contents`, and
    /// appends that page after any existing ones. `contents` must not be empty.
    pub fn paint_with(
        &mut self,
        minter: &mut Minter,
        contents: Vec<ContentResource>,
    ) -> Result<&mut Self> {
        let target = Target::canvas(&self.id);
        self.paint(minter, target, contents)
    }

    /// Paint `contents` onto part of the canvas, given as a media fragment
    /// such as `xywh=0,0,600,900` or `t=0,30`.
    pub fn paint_region(
        &mut self,
        minter: &mut Minter,
        region: &str,
        contents: Vec<ContentResource>,
    ) -> Result<&mut Self> {
        let selector: MediaFragment = region.parse()?;
        let target = Target::fragment(&self.id, selector);
        self.paint(minter, target, contents)
    }

    fn paint(
        &mut self,
        minter: &mut Minter,
        target: Target,
        contents: Vec<ContentResource>,
    ) -> Result<&mut Self> {
        self.ensure_mutable("paint")?;
        if contents.is_empty() {
            return Err(PreziError::EmptyProperty {
                kind: EntityKind::Canvas,
                id: self.id.clone(),
                property: "painting content",
            });
        }

        let mut annotation = PaintingAnnotation::new(&mut *minter, self)?;
        annotation.set_bodies(contents)?;
        if target.selector().is_some() {
            annotation.set_target(target)?;
        }

        let mut page = AnnotationPage::for_canvas(minter, self)?;
        page.add_annotations(vec![annotation])?;
        page.freeze();

        debug!(canvas = %self.id, page = %page.id(), "Painted content onto canvas");
        self.pages.push(page);
        Ok(self)
    }

    /// Replace the painting pages with pre-built ones.
    ///
    /// Fails without changing the canvas if any page already belongs to
    /// another canvas.
    pub fn set_painting_pages(&mut self, pages: Vec<AnnotationPage>) -> Result<&mut Self> {
        self.ensure_mutable("set painting pages")?;
        self.pages = Self::attach(pages)?;
        Ok(self)
    }

    /// Append pre-built painting pages.
    pub fn add_painting_pages(&mut self, pages: Vec<AnnotationPage>) -> Result<&mut Self> {
        self.ensure_mutable("add painting pages")?;
        let pages = Self::attach(pages)?;
        self.pages.extend(pages);
        Ok(self)
    }

    fn attach(mut pages: Vec<AnnotationPage>) -> Result<Vec<AnnotationPage>> {
        for page in &pages {
            page.ensure_mutable("attach to canvas")?;
        }
        for page in &mut pages {
            page.freeze();
        }
        Ok(pages)
    }

    // -- Accessors ------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn painting_pages(&self) -> &[AnnotationPage] {
        &self.pages
    }

    /// Which extents the canvas declares.
    pub fn extent_kinds(&self) -> ExtentKinds {
        ExtentKinds {
            spatial: self.width.is_some() && self.height.is_some(),
            temporal: self.duration.is_some(),
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    // -- Lifecycle ------------------------------------------------------------

    pub(crate) fn freeze(&mut self) {
        if !self.frozen {
            debug!(id = %self.id, pages = self.pages.len(), "Canvas attached");
            self.frozen = true;
        }
    }

    pub(crate) fn ensure_mutable(&self, operation: &'static str) -> Result<()> {
        if self.frozen {
            Err(PreziError::ImmutableState {
                kind: EntityKind::Canvas,
                id: self.id.clone(),
                operation,
            })
        } else {
            Ok(())
        }
    }
}
