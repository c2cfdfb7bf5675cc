// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document tree nodes and their emission.
//
// Each node is a serde struct whose field order is the emitted property order:
// identifier, type, label, extent fields, then nested sequences. Sequences are
// copied in insertion order. The same nodes are read back by `parse`.

use chrono::SecondsFormat;
use prezi_core::{Label, MetadataEntry, PresentationConfig};
use serde::{Deserialize, Serialize};

use crate::annotation::{AnnotationPage, PaintingAnnotation};
use crate::canvas::Canvas;
use crate::content::{ContentResource, Service};
use crate::manifest::Manifest;
use crate::range::Range;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ManifestNode {
    #[serde(rename = "@context")]
    pub(super) context: String,
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
    pub(super) label: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) summary: Option<Label>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(super) metadata: Vec<MetadataEntry>,
    #[serde(rename = "navDate", skip_serializing_if = "Option::is_none")]
    pub(super) nav_date: Option<String>,
    pub(super) items: Vec<CanvasNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(super) structures: Vec<RangeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CanvasNode {
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) duration: Option<f64>,
    pub(super) items: Vec<PageNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PageNode {
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
    pub(super) items: Vec<AnnotationNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct AnnotationNode {
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
    pub(super) motivation: String,
    pub(super) target: String,
    pub(super) body: BodyNode,
}

/// A lone body is emitted as an object, a choice as an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum BodyNode {
    Single(ContentNode),
    Choice(Vec<ContentNode>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ContentNode {
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(super) service: Vec<ServiceNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ServiceNode {
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
    pub(super) profile: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RangeNode {
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) label: Option<Label>,
    pub(super) items: Vec<CanvasRefNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CanvasRefNode {
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) kind: String,
}

pub(crate) fn manifest(manifest: &Manifest, config: &PresentationConfig) -> ManifestNode {
    ManifestNode {
        context: config.context_uri.clone(),
        id: manifest.id().to_owned(),
        kind: "Manifest".into(),
        label: manifest.label().clone(),
        summary: manifest.summary().cloned(),
        metadata: manifest.metadata().to_vec(),
        nav_date: manifest
            .nav_date()
            .map(|date| date.to_rfc3339_opts(SecondsFormat::Secs, true)),
        items: manifest.canvases().iter().map(canvas).collect(),
        structures: manifest.ranges().iter().map(range).collect(),
    }
}

fn canvas(canvas: &Canvas) -> CanvasNode {
    CanvasNode {
        id: canvas.id().to_owned(),
        kind: "Canvas".into(),
        label: canvas.label().cloned(),
        width: canvas.width(),
        height: canvas.height(),
        duration: canvas.duration(),
        items: canvas.painting_pages().iter().map(page).collect(),
    }
}

fn page(page: &AnnotationPage) -> PageNode {
    PageNode {
        id: page.id().to_owned(),
        kind: "AnnotationPage".into(),
        items: page.annotations().iter().map(annotation).collect(),
    }
}

fn annotation(annotation: &PaintingAnnotation) -> AnnotationNode {
    let mut bodies: Vec<ContentNode> = annotation.bodies().iter().map(content).collect();
    let body = if bodies.len() == 1 {
        BodyNode::Single(bodies.remove(0))
    } else {
        BodyNode::Choice(bodies)
    };

    AnnotationNode {
        id: annotation.id().to_owned(),
        kind: "Annotation".into(),
        motivation: "painting".into(),
        target: annotation.target().to_string(),
        body,
    }
}

fn content(resource: &ContentResource) -> ContentNode {
    ContentNode {
        id: resource.id().to_owned(),
        kind: resource.kind().type_name().into(),
        label: resource.label().cloned(),
        format: resource.format().map(str::to_owned),
        width: resource.width(),
        height: resource.height(),
        duration: resource.duration(),
        service: resource.services().iter().map(service).collect(),
    }
}

fn service(service: &Service) -> ServiceNode {
    ServiceNode {
        id: service.id().to_owned(),
        kind: service.kind().type_name().into(),
        profile: service.profile().profile().into(),
    }
}

fn range(range: &Range) -> RangeNode {
    RangeNode {
        id: range.id().to_owned(),
        kind: "Range".into(),
        label: range.label().cloned(),
        items: range
            .canvas_ids()
            .iter()
            .map(|id| CanvasRefNode {
                id: id.clone(),
                kind: "Canvas".into(),
            })
            .collect(),
    }
}
