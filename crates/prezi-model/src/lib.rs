// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// prezi-model — The IIIF Presentation 3 object model.
//
// Builds manifests out of canvases, painting annotations, annotation pages and
// content resources, mints identifiers for the parts a caller leaves unnamed,
// and validates the finished graph before emitting the JSON-LD document.

pub mod annotation;
pub mod canvas;
pub mod content;
pub mod document;
pub mod id;
pub mod manifest;
pub mod range;

// Re-export the primary types so callers can use `prezi_model::Canvas` etc.
pub use annotation::{AnnotationPage, MediaFragment, PaintingAnnotation, Target};
pub use canvas::Canvas;
pub use content::{ContentResource, Service};
pub use document::{Document, serialize, serialize_with};
pub use id::{IdSource, Minter, Scope};
pub use manifest::Manifest;
pub use range::Range;
