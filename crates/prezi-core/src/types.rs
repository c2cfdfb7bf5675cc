// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain value types for presentation manifests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Language tag used for text that has no language.
pub const NO_LANGUAGE: &str = "none";

/// The kinds of entity that appear in a manifest graph. Used to label errors
/// and log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Manifest,
    Canvas,
    AnnotationPage,
    Annotation,
    ContentResource,
    Range,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Manifest => "manifest",
            Self::Canvas => "canvas",
            Self::AnnotationPage => "annotation page",
            Self::Annotation => "annotation",
            Self::ContentResource => "content resource",
            Self::Range => "range",
        };
        f.write_str(name)
    }
}

/// A language map: `{"en": ["Title"], "none": ["Untitled"]}`.
///
/// Keys are kept sorted so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(BTreeMap<String, Vec<String>>);

impl Label {
    /// A label with no language.
    pub fn new(text: impl Into<String>) -> Self {
        Self::tagged(NO_LANGUAGE, text)
    }

    /// A label in the given language.
    pub fn tagged(language: impl Into<String>, text: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(language.into(), vec![text.into()]);
        Self(map)
    }

    /// Add another value, in the same or another language.
    pub fn with(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.entry(language.into()).or_default().push(text.into());
        self
    }

    /// Values recorded for `language`, if any.
    pub fn values(&self, language: &str) -> Option<&[String]> {
        self.0.get(language).map(Vec::as_slice)
    }

    /// True when no language carries any non-blank text.
    pub fn is_empty(&self) -> bool {
        self.0.values().flatten().all(|text| text.trim().is_empty())
    }
}

/// A descriptive label/value pair shown by viewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub label: Label,
    pub value: Label,
}

impl MetadataEntry {
    pub fn new(label: Label, value: Label) -> Self {
        Self { label, value }
    }
}

/// The two dimensions an extent can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtentKind {
    /// Width and height, in pixels.
    Spatial,
    /// Duration, in seconds.
    Temporal,
}

impl std::fmt::Display for ExtentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spatial => f.write_str("spatial"),
            Self::Temporal => f.write_str("temporal"),
        }
    }
}

/// A set of extent kinds: which dimensions something declares or requires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ExtentKinds {
    pub spatial: bool,
    pub temporal: bool,
}

impl ExtentKinds {
    pub const NONE: Self = Self {
        spatial: false,
        temporal: false,
    };
    pub const SPATIAL: Self = Self {
        spatial: true,
        temporal: false,
    };
    pub const TEMPORAL: Self = Self {
        spatial: false,
        temporal: true,
    };
    pub const BOTH: Self = Self {
        spatial: true,
        temporal: true,
    };

    pub fn contains(&self, kind: ExtentKind) -> bool {
        match kind {
            ExtentKind::Spatial => self.spatial,
            ExtentKind::Temporal => self.temporal,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.spatial && !self.temporal
    }

    /// The first kind in `required` that `self` lacks, spatial before temporal.
    pub fn missing_from(&self, required: ExtentKinds) -> Option<ExtentKind> {
        if required.spatial && !self.spatial {
            Some(ExtentKind::Spatial)
        } else if required.temporal && !self.temporal {
            Some(ExtentKind::Temporal)
        } else {
            None
        }
    }
}

/// The closed set of paintable media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Image,
    Sound,
    Video,
}

impl ContentKind {
    /// The `type` value emitted for this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Sound => "Sound",
            Self::Video => "Video",
        }
    }

    /// Extent kinds a resource of this kind must declare, and that any canvas
    /// it is painted onto must declare too.
    pub fn required_extents(&self) -> ExtentKinds {
        match self {
            Self::Image => ExtentKinds::SPATIAL,
            Self::Sound => ExtentKinds::TEMPORAL,
            Self::Video => ExtentKinds::BOTH,
        }
    }

    /// Whether a resource of this kind can declare an extent of `kind`.
    pub fn accepts(&self, kind: ExtentKind) -> bool {
        self.required_extents().contains(kind)
    }

    /// The kind named by an emitted `type` value.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "Image" => Some(Self::Image),
            "Sound" => Some(Self::Sound),
            "Video" => Some(Self::Video),
            _ => None,
        }
    }
}

/// Media formats recognised when inferring a content resource's `format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaFormat {
    Jpeg,
    Png,
    Tiff,
    Jp2,
    Gif,
    Webp,
    Mp3,
    M4a,
    Wav,
    Ogg,
    Flac,
    Mp4,
    Webm,
    QuickTime,
}

impl MediaFormat {
    /// MIME type string emitted as `format`.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Tiff => "image/tiff",
            Self::Jp2 => "image/jp2",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Mp3 => "audio/mpeg",
            Self::M4a => "audio/mp4",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::Flac => "audio/flac",
            Self::Mp4 => "video/mp4",
            Self::Webm => "video/webm",
            Self::QuickTime => "video/quicktime",
        }
    }

    /// Which content kind this format carries.
    pub fn content_kind(&self) -> ContentKind {
        match self {
            Self::Jpeg | Self::Png | Self::Tiff | Self::Jp2 | Self::Gif | Self::Webp => {
                ContentKind::Image
            }
            Self::Mp3 | Self::M4a | Self::Wav | Self::Ogg | Self::Flac => ContentKind::Sound,
            Self::Mp4 | Self::Webm | Self::QuickTime => ContentKind::Video,
        }
    }

    /// Infer format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "tif" | "tiff" => Some(Self::Tiff),
            "jp2" => Some(Self::Jp2),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "mp3" => Some(Self::Mp3),
            "m4a" => Some(Self::M4a),
            "wav" => Some(Self::Wav),
            "ogg" | "oga" => Some(Self::Ogg),
            "flac" => Some(Self::Flac),
            "mp4" | "m4v" => Some(Self::Mp4),
            "webm" => Some(Self::Webm),
            "mov" => Some(Self::QuickTime),
            _ => None,
        }
    }

    /// Infer format from the last path segment of a URI, ignoring any query
    /// string or fragment.
    pub fn from_uri(uri: &str) -> Option<Self> {
        let path = uri.split(['?', '#']).next().unwrap_or(uri);
        let segment = path.rsplit('/').next()?;
        let (_, ext) = segment.rsplit_once('.')?;
        Self::from_extension(ext)
    }
}

/// Image API compliance level advertised by an image service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceLevel {
    Level0,
    Level1,
    Level2,
}

impl ComplianceLevel {
    /// The `profile` value emitted for this level.
    pub fn profile(&self) -> &'static str {
        match self {
            Self::Level0 => "level0",
            Self::Level1 => "level1",
            Self::Level2 => "level2",
        }
    }

    /// Read a `profile` value. Image API 2 profile URIs such as
    /// `http://iiif.io/api/image/2/level1.json` name the same levels.
    pub fn from_profile(profile: &str) -> Option<Self> {
        let name = profile.trim_end_matches(".json");
        let name = name.rsplit('/').next().unwrap_or(name);
        match name {
            "level0" => Some(Self::Level0),
            "level1" => Some(Self::Level1),
            "level2" => Some(Self::Level2),
            _ => None,
        }
    }
}

/// Image API versions a service can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceKind {
    ImageService3,
    ImageService2,
}

impl ServiceKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ImageService3 => "ImageService3",
            Self::ImageService2 => "ImageService2",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "ImageService3" => Some(Self::ImageService3),
            "ImageService2" => Some(Self::ImageService2),
            _ => None,
        }
    }
}
