// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content resources — the image, sound, and video media painted onto canvases.

use prezi_core::{
    ContentKind, EntityKind, ExtentKind, ExtentKinds, Label, MediaFormat, PreziError, Result,
};
use tracing::debug;

use super::service::Service;
use crate::id::uri;

/// A paintable media asset.
///
/// The kind decides which extent setters are legal: images take width and
/// height, sounds take a duration, videos take both. Once the resource is
/// attached to an annotation body it is frozen.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentResource {
    id: String,
    kind: ContentKind,
    label: Option<Label>,
    format: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<f64>,
    services: Vec<Service>,
    frozen: bool,
}

impl ContentResource {
    /// Create a resource of `kind` for the media at `uri`.
    ///
    /// `format` is inferred from the URI's extension when it matches the kind.
    pub fn new(kind: ContentKind, uri: impl Into<String>) -> Result<Self> {
        let id = uri.into();
        uri::require_absolute(EntityKind::ContentResource, &id)?;

        let format = MediaFormat::from_uri(&id)
            .filter(|format| format.content_kind() == kind)
            .map(|format| format.mime_type().to_string());

        Ok(Self {
            id,
            kind,
            label: None,
            format,
            width: None,
            height: None,
            duration: None,
            services: Vec::new(),
            frozen: false,
        })
    }

    pub fn image(uri: impl Into<String>) -> Result<Self> {
        Self::new(ContentKind::Image, uri)
    }

    pub fn sound(uri: impl Into<String>) -> Result<Self> {
        Self::new(ContentKind::Sound, uri)
    }

    pub fn video(uri: impl Into<String>) -> Result<Self> {
        Self::new(ContentKind::Video, uri)
    }

    // -- Setters --------------------------------------------------------------

    pub fn set_label(&mut self, label: Label) -> Result<&mut Self> {
        self.ensure_mutable("set label")?;
        self.label = Some(label);
        Ok(self)
    }

    /// Replace the resource's services.
    pub fn set_services(&mut self, services: Vec<Service>) -> Result<&mut Self> {
        self.ensure_mutable("set services")?;
        self.services = services;
        Ok(self)
    }

    /// Override the inferred MIME type.
    pub fn set_format(&mut self, mime_type: impl Into<String>) -> Result<&mut Self> {
        self.ensure_mutable("set format")?;
        self.format = Some(mime_type.into());
        Ok(self)
    }

    /// Set the pixel dimensions. Fails on sounds and on zero values.
    pub fn set_width_height(&mut self, width: u32, height: u32) -> Result<&mut Self> {
        self.ensure_mutable("set width and height")?;
        if !self.kind.accepts(ExtentKind::Spatial) {
            return Err(self.invalid_extent(format!(
                "{} resources have no spatial extent",
                self.kind.type_name()
            )));
        }
        if width == 0 || height == 0 {
            return Err(self.invalid_extent(format!(
                "width and height must be positive, got {width}x{height}"
            )));
        }
        self.width = Some(width);
        self.height = Some(height);
        Ok(self)
    }

    /// Set the running time in seconds. Fails on images and on values that
    /// are not finite and positive.
    pub fn set_duration(&mut self, seconds: f64) -> Result<&mut Self> {
        self.ensure_mutable("set duration")?;
        if !self.kind.accepts(ExtentKind::Temporal) {
            return Err(self.invalid_extent(format!(
                "{} resources have no temporal extent",
                self.kind.type_name()
            )));
        }
        if !(seconds.is_finite() && seconds > 0.0) {
            return Err(self.invalid_extent(format!("duration must be positive, got {seconds}")));
        }
        self.duration = Some(seconds);
        Ok(self)
    }

    // -- Accessors ------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
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

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Extent kinds a canvas needs before this resource can be painted on it.
    pub fn required_extents(&self) -> ExtentKinds {
        self.kind.required_extents()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    // -- Lifecycle ------------------------------------------------------------

    pub(crate) fn freeze(&mut self) {
        if !self.frozen {
            debug!(id = %self.id, kind = self.kind.type_name(), "Content resource attached");
            self.frozen = true;
        }
    }

    pub(crate) fn ensure_mutable(&self, operation: &'static str) -> Result<()> {
        if self.frozen {
            Err(PreziError::ImmutableState {
                kind: EntityKind::ContentResource,
                id: self.id.clone(),
                operation,
            })
        } else {
            Ok(())
        }
    }

    fn invalid_extent(&self, reason: String) -> PreziError {
        PreziError::InvalidExtent {
            kind: EntityKind::ContentResource,
            id: self.id.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prezi_core::ComplianceLevel;

    const IMAGE: &str = "https://iiif.example.org/2/page1/full/600,/0/default.jpg";

    #[test]
    fn image_keeps_dimensions() {
        for (w, h) in [(1, 1), (1200, 1800), (u32::MAX, 7)] {
            let mut image = ContentResource::image(IMAGE).unwrap();
            image.set_width_height(w, h).unwrap();
            assert_eq!((image.width(), image.height()), (Some(w), Some(h)));
        }
    }

    #[test]
    fn zero_dimension_is_invalid() {
        let mut image = ContentResource::image(IMAGE).unwrap();
        for (w, h) in [(0, 10), (10, 0), (0, 0)] {
            let err = image.set_width_height(w, h).unwrap_err();
            assert!(matches!(err, PreziError::InvalidExtent { .. }));
        }
        assert_eq!(image.width(), None);
    }

    #[test]
    fn sound_rejects_spatial_extent() {
        let mut sound = ContentResource::sound("https://example.org/audio/track1.mp3").unwrap();
        let err = sound.set_width_height(10, 10).unwrap_err();
        assert!(matches!(
            err,
            PreziError::InvalidExtent { kind: EntityKind::ContentResource, .. }
        ));
    }

    #[test]
    fn image_rejects_duration() {
        let mut image = ContentResource::image(IMAGE).unwrap();
        assert!(image.set_duration(12.0).is_err());
    }

    #[test]
    fn duration_must_be_positive_and_finite() {
        let mut sound = ContentResource::sound("https://example.org/audio/track1.mp3").unwrap();
        for bad in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            assert!(sound.set_duration(bad).is_err(), "{bad} accepted");
        }
        sound.set_duration(1985.024).unwrap();
        assert_eq!(sound.duration(), Some(1985.024));
    }

    #[test]
    fn video_takes_both_extents() {
        let mut video = ContentResource::video("https://example.org/video/clip.mp4").unwrap();
        video.set_width_height(640, 360).unwrap().set_duration(30.5).unwrap();
        assert_eq!(video.width(), Some(640));
        assert_eq!(video.duration(), Some(30.5));
        assert_eq!(video.format(), Some("video/mp4"));
    }

    #[test]
    fn format_is_inferred_only_for_matching_kind() {
        let image = ContentResource::image(IMAGE).unwrap();
        assert_eq!(image.format(), Some("image/jpeg"));

        let odd = ContentResource::sound("https://example.org/cover.png").unwrap();
        assert_eq!(odd.format(), None);
    }

    #[test]
    fn relative_uri_is_rejected() {
        assert!(matches!(
            ContentResource::image("page1.jpg"),
            Err(PreziError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn frozen_resource_refuses_mutation() {
        let mut image = ContentResource::image(IMAGE).unwrap();
        image.freeze();
        let service = Service::image3("https://iiif.example.org/3/page1", ComplianceLevel::Level2)
            .unwrap();
        let err = image.set_services(vec![service]).unwrap_err();
        assert!(matches!(err, PreziError::ImmutableState { operation: "set services", .. }));
        assert!(image.set_width_height(1, 1).is_err());
    }
}
