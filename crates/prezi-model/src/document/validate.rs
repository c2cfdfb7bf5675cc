// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Graph-wide validation run before a manifest is emitted.
//
// Checks run in a fixed order and stop at the first violation:
//   1. identifier uniqueness across canvases, pages, annotations, and ranges
//   2. every annotation target and range member resolves to a canvas
//   3. every annotation paints at least one body
//   4. per canvas: extent compatibility, then bounds, then a declared extent

use std::collections::{HashMap, HashSet};

use prezi_core::{EntityKind, PreziError, Result};

use crate::annotation::PaintingAnnotation;
use crate::canvas::Canvas;
use crate::content::ContentResource;
use crate::manifest::Manifest;

pub(crate) fn validate(manifest: &Manifest) -> Result<()> {
    check_unique_identifiers(manifest)?;
    check_targets(manifest)?;
    check_bodies(manifest)?;
    check_extents(manifest)
}

// -- Uniqueness ---------------------------------------------------------------

fn check_unique_identifiers<'a>(manifest: &'a Manifest) -> Result<()> {
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut claim = |kind: EntityKind, id: &'a str| -> Result<()> {
        if seen.insert(id) {
            Ok(())
        } else {
            Err(PreziError::DuplicateIdentifier {
                kind,
                id: id.to_owned(),
            })
        }
    };

    claim(EntityKind::Manifest, manifest.id())?;
    for canvas in manifest.canvases() {
        claim(EntityKind::Canvas, canvas.id())?;
        for page in canvas.painting_pages() {
            claim(EntityKind::AnnotationPage, page.id())?;
            for annotation in page.annotations() {
                claim(EntityKind::Annotation, annotation.id())?;
            }
        }
    }
    for range in manifest.ranges() {
        claim(EntityKind::Range, range.id())?;
    }
    Ok(())
}

// -- Target resolution --------------------------------------------------------

fn check_targets(manifest: &Manifest) -> Result<()> {
    let canvas_ids: HashSet<&str> = manifest.canvases().iter().map(Canvas::id).collect();

    for annotation in annotations(manifest) {
        let target = annotation.target();
        if !canvas_ids.contains(target.canvas_id()) {
            return Err(PreziError::UnresolvedTarget {
                kind: EntityKind::Annotation,
                id: annotation.id().to_owned(),
                target: target.to_string(),
            });
        }
    }

    for range in manifest.ranges() {
        if let Some(missing) = range
            .canvas_ids()
            .iter()
            .find(|id| !canvas_ids.contains(id.as_str()))
        {
            return Err(PreziError::UnresolvedTarget {
                kind: EntityKind::Range,
                id: range.id().to_owned(),
                target: missing.clone(),
            });
        }
    }
    Ok(())
}

// -- Bodies -------------------------------------------------------------------

/// Annotations built by hand can reach a page without `set_bodies` ever
/// being called.
fn check_bodies(manifest: &Manifest) -> Result<()> {
    match annotations(manifest).find(|annotation| annotation.bodies().is_empty()) {
        Some(annotation) => Err(PreziError::EmptyProperty {
            kind: EntityKind::Annotation,
            id: annotation.id().to_owned(),
            property: "body",
        }),
        None => Ok(()),
    }
}

// -- Extents ------------------------------------------------------------------

fn check_extents(manifest: &Manifest) -> Result<()> {
    // Content is painted onto the canvas its annotation targets, which need not
    // be the canvas that owns the annotation.
    let mut painted: HashMap<&str, Vec<&PaintingAnnotation>> = HashMap::new();
    for annotation in annotations(manifest) {
        painted
            .entry(annotation.target().canvas_id())
            .or_default()
            .push(annotation);
    }

    for canvas in manifest.canvases() {
        let annotations = painted.get(canvas.id()).map(Vec::as_slice).unwrap_or_default();
        for annotation in annotations {
            check_compatible(canvas, annotation)?;
        }
        for annotation in annotations {
            check_bounds(canvas, annotation)?;
        }
        if canvas.extent_kinds().is_empty() {
            return Err(PreziError::InvalidExtent {
                kind: EntityKind::Canvas,
                id: canvas.id().to_owned(),
                reason: "canvas declares neither width and height nor duration".into(),
            });
        }
    }
    Ok(())
}

fn check_compatible(canvas: &Canvas, annotation: &PaintingAnnotation) -> Result<()> {
    let declared = canvas.extent_kinds();

    for body in annotation.bodies() {
        if let Some(missing) = declared.missing_from(body.required_extents()) {
            return Err(PreziError::IncompatibleExtent {
                canvas: canvas.id().to_owned(),
                resource_kind: EntityKind::ContentResource,
                resource: body.id().to_owned(),
                missing,
            });
        }
    }

    if let Some(selector) = annotation.target().selector() {
        if let Some(missing) = declared.missing_from(selector.required_extents()) {
            return Err(PreziError::IncompatibleExtent {
                canvas: canvas.id().to_owned(),
                resource_kind: EntityKind::Annotation,
                resource: annotation.id().to_owned(),
                missing,
            });
        }
    }
    Ok(())
}

fn check_bounds(canvas: &Canvas, annotation: &PaintingAnnotation) -> Result<()> {
    for body in annotation.bodies() {
        if let Some(reason) = body_overflow(canvas, body) {
            return Err(PreziError::ContentOutOfBounds {
                canvas: canvas.id().to_owned(),
                resource_kind: EntityKind::ContentResource,
                resource: body.id().to_owned(),
                reason,
            });
        }
    }

    let Some(selector) = annotation.target().selector() else {
        return Ok(());
    };
    let out_of_bounds = |reason: String| PreziError::ContentOutOfBounds {
        canvas: canvas.id().to_owned(),
        resource_kind: EntityKind::Annotation,
        resource: annotation.id().to_owned(),
        reason,
    };

    if let (Some(region), Some(width), Some(height)) =
        (selector.region(), canvas.width(), canvas.height())
    {
        let right = u64::from(region.x) + u64::from(region.width);
        let bottom = u64::from(region.y) + u64::from(region.height);
        if right > u64::from(width) || bottom > u64::from(height) {
            return Err(out_of_bounds(format!(
                "region xywh={},{},{},{} extends past {width}x{height}",
                region.x, region.y, region.width, region.height
            )));
        }
    }

    if let (Some(time), Some(duration)) = (selector.time(), canvas.duration()) {
        let last = time.end.unwrap_or(time.start);
        if last > duration {
            return Err(out_of_bounds(format!(
                "time range reaches {last}s, past the canvas duration of {duration}s"
            )));
        }
    }
    Ok(())
}

/// Why `body` does not fit on `canvas`, if it does not.
fn body_overflow(canvas: &Canvas, body: &ContentResource) -> Option<String> {
    if let (Some(w), Some(h), Some(cw), Some(ch)) =
        (body.width(), body.height(), canvas.width(), canvas.height())
    {
        if w > cw || h > ch {
            return Some(format!("{w}x{h} is larger than {cw}x{ch}"));
        }
    }
    if let (Some(d), Some(cd)) = (body.duration(), canvas.duration()) {
        if d > cd {
            return Some(format!("{d}s is longer than {cd}s"));
        }
    }
    None
}

fn annotations(manifest: &Manifest) -> impl Iterator<Item = &PaintingAnnotation> {
    manifest
        .canvases()
        .iter()
        .flat_map(Canvas::painting_pages)
        .flat_map(|page| page.annotations())
}
