// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Annotation module — painting annotations, the pages that group them, and the
// targets they point at.

pub mod page;
pub mod painting;
pub mod selector;

pub use page::AnnotationPage;
pub use painting::PaintingAnnotation;
pub use selector::{MediaFragment, Region, Target, TimeRange};
