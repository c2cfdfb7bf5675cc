// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reading documents back into a manifest graph.
//
// Every node is rebuilt through the public constructors and setters, so
// identifier and extent checks, freeze-on-attach and minter observation apply
// exactly as they do to a hand-built manifest. Graph-wide checks run when the
// manifest is next serialized. The `@context` is not kept; the configuration
// used for output decides it.

use chrono::{DateTime, Utc};
use prezi_core::{ComplianceLevel, ContentKind, EntityKind, PreziError, Result, ServiceKind};
use tracing::{debug, info, instrument};

use super::emit::{
    AnnotationNode, BodyNode, CanvasNode, ContentNode, ManifestNode, PageNode, RangeNode,
    ServiceNode,
};
use crate::annotation::{AnnotationPage, PaintingAnnotation, Target};
use crate::canvas::Canvas;
use crate::content::{ContentResource, Service};
use crate::manifest::Manifest;
use crate::range::Range;

#[instrument(skip_all)]
pub(crate) fn read_str(json: &str) -> Result<Manifest> {
    let node: ManifestNode = serde_json::from_str(json)?;
    manifest(node)
}

pub(crate) fn read_value(value: serde_json::Value) -> Result<Manifest> {
    let node: ManifestNode = serde_json::from_value(value)?;
    manifest(node)
}

fn manifest(node: ManifestNode) -> Result<Manifest> {
    expect_type(EntityKind::Manifest, &node.id, &node.kind, "Manifest")?;

    let mut manifest = Manifest::new(node.id, node.label)?;
    if let Some(summary) = node.summary {
        manifest.set_summary(summary);
    }
    for entry in node.metadata {
        manifest.add_metadata(entry);
    }
    if let Some(nav_date) = node.nav_date {
        let parsed = DateTime::parse_from_rfc3339(&nav_date).map_err(|err| {
            invalid(EntityKind::Manifest, manifest.id(), format!("navDate {nav_date:?}: {err}"))
        })?;
        manifest.set_nav_date(parsed.with_timezone(&Utc));
    }

    let canvases = node
        .items
        .into_iter()
        .map(canvas)
        .collect::<Result<Vec<_>>>()?;
    manifest.add_canvases(canvases)?;

    let ranges = node
        .structures
        .into_iter()
        .map(range)
        .collect::<Result<Vec<_>>>()?;
    manifest.add_ranges(ranges)?;

    info!(
        id = %manifest.id(),
        canvases = manifest.canvases().len(),
        ranges = manifest.ranges().len(),
        "Read manifest"
    );
    Ok(manifest)
}

fn canvas(node: CanvasNode) -> Result<Canvas> {
    expect_type(EntityKind::Canvas, &node.id, &node.kind, "Canvas")?;

    let mut canvas = Canvas::new(node.id)?;
    if let Some(label) = node.label {
        canvas.set_label(label)?;
    }
    match (node.width, node.height) {
        (Some(width), Some(height)) => {
            canvas.set_width_height(width, height)?;
        }
        (None, None) => {}
        _ => {
            return Err(invalid(
                EntityKind::Canvas,
                canvas.id(),
                "width and height must appear together".into(),
            ));
        }
    }
    if let Some(duration) = node.duration {
        canvas.set_duration(duration)?;
    }

    let pages = node
        .items
        .into_iter()
        .map(|page_node| page(page_node, &canvas))
        .collect::<Result<Vec<_>>>()?;
    canvas.set_painting_pages(pages)?;

    debug!(id = %canvas.id(), pages = canvas.painting_pages().len(), "Read canvas");
    Ok(canvas)
}

fn page(node: PageNode, canvas: &Canvas) -> Result<AnnotationPage> {
    expect_type(EntityKind::AnnotationPage, &node.id, &node.kind, "AnnotationPage")?;

    let mut page = AnnotationPage::for_canvas(node.id, canvas)?;
    let annotations = node
        .items
        .into_iter()
        .map(|anno_node| annotation(anno_node, canvas))
        .collect::<Result<Vec<_>>>()?;
    page.add_annotations(annotations)?;
    Ok(page)
}

fn annotation(node: AnnotationNode, canvas: &Canvas) -> Result<PaintingAnnotation> {
    expect_type(EntityKind::Annotation, &node.id, &node.kind, "Annotation")?;
    if node.motivation != "painting" {
        return Err(invalid(
            EntityKind::Annotation,
            &node.id,
            format!("unsupported motivation {:?}", node.motivation),
        ));
    }

    let bodies = match node.body {
        BodyNode::Single(body) => vec![content(body)?],
        BodyNode::Choice(bodies) => bodies
            .into_iter()
            .map(content)
            .collect::<Result<Vec<_>>>()?,
    };
    let target: Target = node.target.parse()?;

    let mut annotation = PaintingAnnotation::new(node.id, canvas)?;
    annotation.set_bodies(bodies)?.set_target(target)?;
    Ok(annotation)
}

fn content(node: ContentNode) -> Result<ContentResource> {
    let kind = ContentKind::from_type_name(&node.kind).ok_or_else(|| {
        invalid(
            EntityKind::ContentResource,
            &node.id,
            format!("unsupported content type {:?}", node.kind),
        )
    })?;

    let mut resource = ContentResource::new(kind, node.id)?;
    if let Some(label) = node.label {
        resource.set_label(label)?;
    }
    if let Some(format) = node.format {
        resource.set_format(format)?;
    }
    match (node.width, node.height) {
        (Some(width), Some(height)) => {
            resource.set_width_height(width, height)?;
        }
        (None, None) => {}
        _ => {
            return Err(invalid(
                EntityKind::ContentResource,
                resource.id(),
                "width and height must appear together".into(),
            ));
        }
    }
    if let Some(duration) = node.duration {
        resource.set_duration(duration)?;
    }
    if !node.service.is_empty() {
        let services = node
            .service
            .into_iter()
            .map(service)
            .collect::<Result<Vec<_>>>()?;
        resource.set_services(services)?;
    }
    Ok(resource)
}

fn service(node: ServiceNode) -> Result<Service> {
    let kind = ServiceKind::from_type_name(&node.kind).ok_or_else(|| PreziError::InvalidService {
        id: node.id.clone(),
        reason: format!("unsupported service type {:?}", node.kind),
    })?;
    let profile =
        ComplianceLevel::from_profile(&node.profile).ok_or_else(|| PreziError::InvalidService {
            id: node.id.clone(),
            reason: format!("unknown profile {:?}", node.profile),
        })?;
    Service::new(kind, node.id, profile)
}

fn range(node: RangeNode) -> Result<Range> {
    expect_type(EntityKind::Range, &node.id, &node.kind, "Range")?;

    let mut range = Range::new(node.id)?;
    if let Some(label) = node.label {
        range.set_label(label)?;
    }
    for item in &node.items {
        if item.kind != "Canvas" {
            return Err(invalid(
                EntityKind::Range,
                range.id(),
                format!("member {} has unsupported type {:?}", item.id, item.kind),
            ));
        }
        range.add_canvas_id(&item.id)?;
    }
    Ok(range)
}

fn expect_type(kind: EntityKind, id: &str, found: &str, expected: &str) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(invalid(kind, id, format!("expected type {expected:?}, found {found:?}")))
    }
}

fn invalid(kind: EntityKind, id: &str, reason: String) -> PreziError {
    PreziError::InvalidDocument {
        kind,
        id: id.to_owned(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use prezi_core::{Label, MetadataEntry};
    use serde_json::json;

    const MANIFEST: &str = "https://example.org/iiif/book1/manifest";

    fn image(uri: &str, w: u32, h: u32) -> ContentResource {
        let mut image = ContentResource::image(uri).unwrap();
        image.set_width_height(w, h).unwrap();
        image
    }

    /// A manifest touching every emitted property.
    fn rich_manifest() -> Manifest {
        let mut manifest = Manifest::new(MANIFEST, Label::tagged("en", "Book 1")).unwrap();
        manifest
            .set_summary(Label::tagged("en", "Everything at once"))
            .add_metadata(MetadataEntry::new(
                Label::tagged("en", "Date"),
                Label::new("1856"),
            ))
            .set_nav_date(Utc.with_ymd_and_hms(1856, 3, 1, 12, 0, 0).unwrap());

        let mut page = image("https://example.org/img/p1.jpg", 1200, 1800);
        page.set_label(Label::tagged("en", "Page 1"))
            .unwrap()
            .set_services(vec![
                Service::image3("https://example.org/iiif/p1", ComplianceLevel::Level2).unwrap(),
            ])
            .unwrap();
        let mut book = Canvas::new(manifest.minter()).unwrap();
        book.set_label(Label::new("1r"))
            .unwrap()
            .set_width_height(1200, 1800)
            .unwrap();
        book.paint_with(
            manifest.minter(),
            vec![page, image("https://example.org/img/p1-uv.jpg", 1200, 1800)],
        )
        .unwrap()
        .paint_region(
            manifest.minter(),
            "xywh=100,100,300,300",
            vec![image("https://example.org/img/detail.png", 300, 300)],
        )
        .unwrap();

        let mut side = ContentResource::sound("https://example.org/audio/side-a.mp3").unwrap();
        side.set_duration(1985.024).unwrap();
        let mut record = Canvas::new(manifest.minter()).unwrap();
        record.set_duration(1985.024).unwrap();
        record
            .paint_region(manifest.minter(), "t=0,30", vec![side])
            .unwrap();

        let mut range = Range::new(manifest.minter()).unwrap();
        range
            .set_label(Label::tagged("en", "All"))
            .unwrap()
            .add_canvas(&book)
            .unwrap()
            .add_canvas(&record)
            .unwrap();

        manifest.add_canvases(vec![book, record]).unwrap();
        manifest.add_ranges(vec![range]).unwrap();
        manifest
    }

    #[test]
    fn document_reads_back_byte_identical() {
        let json = rich_manifest().to_document().unwrap().to_json().unwrap();
        let read = read_str(&json).unwrap();
        assert_eq!(read.to_document().unwrap().to_json().unwrap(), json);
    }

    #[test]
    fn read_graph_is_frozen_and_observed() {
        let json = rich_manifest().to_document().unwrap().to_json().unwrap();
        let mut read = read_str(&json).unwrap();

        assert!(read.canvases().iter().all(Canvas::is_frozen));
        assert!(read.ranges().iter().all(Range::is_frozen));

        // canvas-1 and canvas-2 came from the document, so minting skips them.
        let next = Canvas::new(read.minter()).unwrap();
        assert_eq!(next.id(), format!("{MANIFEST}/canvas-3"));
    }

    #[test]
    fn reads_value_and_image2_profile_uri() {
        let value = json!({
            "@context": "http://iiif.io/api/presentation/3/context.json",
            "id": MANIFEST,
            "type": "Manifest",
            "label": { "en": ["Book 1"] },
            "items": [{
                "id": format!("{MANIFEST}/canvas-1"),
                "type": "Canvas",
                "width": 100,
                "height": 100,
                "items": [{
                    "id": format!("{MANIFEST}/canvas-1/page"),
                    "type": "AnnotationPage",
                    "items": [{
                        "id": format!("{MANIFEST}/anno"),
                        "type": "Annotation",
                        "motivation": "painting",
                        "target": format!("{MANIFEST}/canvas-1"),
                        "body": {
                            "id": "https://example.org/img/p.jpg",
                            "type": "Image",
                            "width": 100,
                            "height": 100,
                            "service": [{
                                "id": "https://example.org/iiif2/p",
                                "type": "ImageService2",
                                "profile": "http://iiif.io/api/image/2/level1.json"
                            }]
                        }
                    }]
                }]
            }]
        });

        let read = read_value(value).unwrap();
        let body = &read.canvases()[0].painting_pages()[0].annotations()[0].bodies()[0];
        assert_eq!(body.services()[0].profile(), ComplianceLevel::Level1);
        assert_eq!(body.format(), Some("image/jpeg"));
        read.to_document().unwrap();
    }

    #[test]
    fn empty_body_choice_is_rejected() {
        let json = rich_manifest().to_document().unwrap().to_json().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["items"][0]["items"][0]["items"][0]["body"] = json!([]);

        assert!(matches!(
            read_value(value),
            Err(PreziError::EmptyProperty { kind: EntityKind::Annotation, property: "body", .. })
        ));
    }

    #[test]
    fn unsupported_nodes_are_named() {
        let json = rich_manifest().to_document().unwrap().to_json().unwrap();
        let original: serde_json::Value = serde_json::from_str(&json).unwrap();

        let mut commenting = original.clone();
        commenting["items"][0]["items"][0]["items"][0]["motivation"] = json!("commenting");
        let err = read_value(commenting).unwrap_err();
        assert!(matches!(
            err,
            PreziError::InvalidDocument { kind: EntityKind::Annotation, .. }
        ));

        let mut text = original.clone();
        text["items"][0]["items"][0]["items"][0]["body"][0]["type"] = json!("Text");
        assert!(matches!(
            read_value(text),
            Err(PreziError::InvalidDocument { kind: EntityKind::ContentResource, .. })
        ));

        let mut collection = original;
        collection["type"] = json!("Collection");
        assert!(matches!(
            read_value(collection),
            Err(PreziError::InvalidDocument { kind: EntityKind::Manifest, .. })
        ));
    }

    #[test]
    fn width_without_height_is_rejected() {
        let json = rich_manifest().to_document().unwrap().to_json().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["items"][0]
            .as_object_mut()
            .unwrap()
            .remove("height");

        assert!(matches!(
            read_value(value),
            Err(PreziError::InvalidDocument { kind: EntityKind::Canvas, .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(
            read_str("{\"id\": "),
            Err(PreziError::Serialization(_))
        ));
    }
}
