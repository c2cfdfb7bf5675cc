// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sample manifests built through the public API.

use clap::ValueEnum;
use prezi_core::{ComplianceLevel, Label, MetadataEntry, Result};
use prezi_model::{Canvas, ContentResource, Manifest, Range, Service};
use tracing::debug;

const BASE: &str = "https://example.org/iiif";

/// Which sample manifest to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// One 1200x1800 page image.
    Image,
    /// One side of an LP, 1985.024 seconds.
    Sound,
    /// A short 1920x1080 film clip.
    Video,
    /// A three-page book with an image service and a range.
    Multi,
    /// Two half-height images stacked on one canvas.
    Stacked,
}

impl Demo {
    pub fn build(self, language: &str) -> Result<Manifest> {
        debug!(demo = ?self, "Building demo manifest");
        match self {
            Self::Image => image(language),
            Self::Sound => sound(language),
            Self::Video => video(language),
            Self::Multi => multi(language),
            Self::Stacked => stacked(language),
        }
    }
}

fn image(language: &str) -> Result<Manifest> {
    let mut manifest = Manifest::new(
        format!("{BASE}/book1/manifest"),
        Label::tagged(language, "Single page"),
    )?;

    let mut page = ContentResource::image(format!("{BASE}/book1/page1/full/max/0/default.jpg"))?;
    page.set_width_height(1200, 1800)?;

    let mut canvas = Canvas::new(manifest.minter())?;
    canvas.set_width_height(1200, 1800)?;
    canvas.paint_with(manifest.minter(), vec![page])?;

    manifest.add_canvases(vec![canvas])?;
    Ok(manifest)
}

fn sound(language: &str) -> Result<Manifest> {
    let mut manifest = Manifest::new(
        format!("{BASE}/lp1/manifest"),
        Label::tagged(language, "Side A"),
    )?;

    let mut side = ContentResource::sound("https://example.org/audio/lp1/side-a.mp4")?;
    side.set_format("audio/mp4")?.set_duration(1985.024)?;

    let mut canvas = Canvas::new(manifest.minter())?;
    canvas.set_duration(1985.024)?;
    canvas.paint_with(manifest.minter(), vec![side])?;

    manifest.add_canvases(vec![canvas])?;
    Ok(manifest)
}

fn video(language: &str) -> Result<Manifest> {
    let mut manifest = Manifest::new(
        format!("{BASE}/film1/manifest"),
        Label::tagged(language, "Film clip"),
    )?;

    let mut clip = ContentResource::video("https://example.org/video/film1/clip.mp4")?;
    clip.set_width_height(1920, 1080)?.set_duration(64.5)?;

    let mut canvas = Canvas::new(manifest.minter())?;
    canvas.set_width_height(1920, 1080)?.set_duration(64.5)?;
    canvas.paint_with(manifest.minter(), vec![clip])?;

    manifest.add_canvases(vec![canvas])?;
    Ok(manifest)
}

fn multi(language: &str) -> Result<Manifest> {
    let mut manifest = Manifest::new(
        format!("{BASE}/book2/manifest"),
        Label::tagged(language, "Three pages"),
    )?;
    manifest
        .set_summary(Label::tagged(language, "A short book with an image service."))
        .add_metadata(MetadataEntry::new(
            Label::tagged(language, "Pages"),
            Label::new("3"),
        ));

    let mut canvases = Vec::new();
    for n in 1..=3 {
        let mut page =
            ContentResource::image(format!("{BASE}/book2/page{n}/full/max/0/default.jpg"))?;
        page.set_width_height(1000, 1500)?.set_services(vec![Service::image3(
            format!("{BASE}/book2/page{n}"),
            ComplianceLevel::Level1,
        )?])?;

        let mut canvas = Canvas::new(manifest.minter())?;
        canvas
            .set_label(Label::tagged(language, format!("p. {n}")))?
            .set_width_height(1000, 1500)?;
        canvas.paint_with(manifest.minter(), vec![page])?;
        canvases.push(canvas);
    }

    let mut opening = Range::new(manifest.minter())?;
    opening.set_label(Label::tagged(language, "Opening"))?;
    for canvas in &canvases[..2] {
        opening.add_canvas(canvas)?;
    }

    manifest.add_canvases(canvases)?;
    manifest.add_ranges(vec![opening])?;
    Ok(manifest)
}

fn stacked(language: &str) -> Result<Manifest> {
    let mut manifest = Manifest::new(
        format!("{BASE}/sheet1/manifest"),
        Label::tagged(language, "Stacked sheet"),
    )?;

    let mut top = ContentResource::image("https://example.org/images/sheet1-top.jpg")?;
    top.set_width_height(600, 900)?;
    let mut bottom = ContentResource::image("https://example.org/images/sheet1-bottom.jpg")?;
    bottom.set_width_height(600, 900)?;

    let mut canvas = Canvas::new(manifest.minter())?;
    canvas.set_width_height(600, 1800)?;
    canvas
        .paint_region(manifest.minter(), "xywh=0,0,600,900", vec![top])?
        .paint_region(manifest.minter(), "xywh=0,900,600,900", vec![bottom])?;

    manifest.add_canvases(vec![canvas])?;
    Ok(manifest)
}
