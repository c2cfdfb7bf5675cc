// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for manifest building and serialization in the
// prezi-model crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use prezi_core::Label;
use prezi_model::{Canvas, ContentResource, Manifest};

const MANIFEST: &str = "https://example.org/iiif/bench/manifest";

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A book-like manifest: `pages` canvases, one 1200x1800 image each.
fn book(pages: usize) -> Manifest {
    let mut manifest = Manifest::new(MANIFEST, Label::tagged("en", "Bench")).unwrap();
    let mut canvases = Vec::with_capacity(pages);
    for n in 1..=pages {
        let mut image =
            ContentResource::image(format!("https://example.org/images/p{n}.jpg")).unwrap();
        image.set_width_height(1200, 1800).unwrap();

        let mut canvas = Canvas::new(manifest.minter()).unwrap();
        canvas.set_width_height(1200, 1800).unwrap();
        canvas.paint_with(manifest.minter(), vec![image]).unwrap();
        canvases.push(canvas);
    }
    manifest.add_canvases(canvases).unwrap();
    manifest
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Build a 500-page manifest from scratch, minting every identifier.
fn bench_build(c: &mut Criterion) {
    c.bench_function("build (500 canvases)", |b| {
        b.iter(|| black_box(book(black_box(500))));
    });
}

/// Validate and emit a prebuilt 500-page manifest as compact JSON.
fn bench_serialize(c: &mut Criterion) {
    let manifest = book(500);
    c.bench_function("serialize (500 canvases)", |b| {
        b.iter(|| {
            let doc = black_box(&manifest).to_document().unwrap();
            black_box(doc.to_json().unwrap());
        });
    });
}

criterion_group!(benches, bench_build, bench_serialize);
criterion_main!(benches);
