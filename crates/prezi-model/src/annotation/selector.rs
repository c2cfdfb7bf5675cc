// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Annotation targets and media-fragment selectors.
//
// A target is a value reference to a canvas: its identifier plus an optional
// `xywh=` pixel region and/or `t=` time range, rendered as
// `<canvas>#xywh=x,y,w,h&t=start,end`.

use std::fmt;
use std::str::FromStr;

use prezi_core::{EntityKind, ExtentKinds, PreziError, Result};

use crate::id::uri;

/// A rectangular pixel region of a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A time range of a canvas, in seconds. An open end runs to the end of the
/// canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: Option<f64>,
}

/// A media fragment: a region, a time range, or both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaFragment {
    region: Option<Region>,
    time: Option<TimeRange>,
}

impl MediaFragment {
    pub fn spatial(x: u32, y: u32, width: u32, height: u32) -> Result<Self> {
        let region = Region { x, y, width, height };
        check_region(&region, &format!("xywh={x},{y},{width},{height}"))?;
        Ok(Self {
            region: Some(region),
            time: None,
        })
    }

    pub fn temporal(start: f64, end: Option<f64>) -> Result<Self> {
        let range = TimeRange { start, end };
        let text = match end {
            Some(end) => format!("t={start},{end}"),
            None => format!("t={start}"),
        };
        check_time(&range, &text)?;
        Ok(Self {
            region: None,
            time: Some(range),
        })
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn time(&self) -> Option<&TimeRange> {
        self.time.as_ref()
    }

    /// Extent kinds a canvas must declare for this fragment to make sense.
    pub fn required_extents(&self) -> ExtentKinds {
        ExtentKinds {
            spatial: self.region.is_some(),
            temporal: self.time.is_some(),
        }
    }
}

impl fmt::Display for MediaFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(r) = &self.region {
            write!(f, "xywh={},{},{},{}", r.x, r.y, r.width, r.height)?;
        }
        if let Some(t) = &self.time {
            if self.region.is_some() {
                f.write_str("&")?;
            }
            write!(f, "t={}", t.start)?;
            if let Some(end) = t.end {
                write!(f, ",{end}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for MediaFragment {
    type Err = PreziError;

    /// Parse `xywh=[pixel:]x,y,w,h`, `t=[npt:]start[,end]`, or both joined by
    /// `&`. A leading `#` is ignored.
    fn from_str(value: &str) -> Result<Self> {
        let fragment = value.strip_prefix('#').unwrap_or(value);
        let invalid = |reason: &str| PreziError::InvalidSelector {
            value: value.to_owned(),
            reason: reason.to_owned(),
        };

        let mut region = None;
        let mut time = None;

        for part in fragment.split('&') {
            let (key, dims) = part
                .split_once('=')
                .ok_or_else(|| invalid("expected key=value"))?;

            match key {
                "xywh" if region.is_none() => {
                    if dims.starts_with("percent:") {
                        return Err(invalid("percent regions are not supported"));
                    }
                    let dims = dims.strip_prefix("pixel:").unwrap_or(dims);
                    let numbers = dims
                        .split(',')
                        .map(|n| n.trim().parse::<u32>())
                        .collect::<std::result::Result<Vec<_>, _>>()
                        .map_err(|_| invalid("region values must be non-negative integers"))?;
                    let [x, y, width, height] = numbers[..] else {
                        return Err(invalid("region needs four values"));
                    };
                    let parsed = Region { x, y, width, height };
                    check_region(&parsed, value)?;
                    region = Some(parsed);
                }
                "t" if time.is_none() => {
                    let dims = dims.strip_prefix("npt:").unwrap_or(dims);
                    let (start, end) = match dims.split_once(',') {
                        Some((start, end)) => (start, Some(end)),
                        None => (dims, None),
                    };
                    let start = if start.is_empty() {
                        0.0
                    } else {
                        start
                            .parse::<f64>()
                            .map_err(|_| invalid("time start is not a number"))?
                    };
                    let end = end
                        .map(|end| end.parse::<f64>())
                        .transpose()
                        .map_err(|_| invalid("time end is not a number"))?;
                    let parsed = TimeRange { start, end };
                    check_time(&parsed, value)?;
                    time = Some(parsed);
                }
                "xywh" | "t" => return Err(invalid("dimension given twice")),
                _ => return Err(invalid("unknown media fragment dimension")),
            }
        }

        Ok(Self { region, time })
    }
}

fn check_region(region: &Region, value: &str) -> Result<()> {
    if region.width == 0 || region.height == 0 {
        return Err(PreziError::InvalidSelector {
            value: value.to_owned(),
            reason: "region width and height must be positive".into(),
        });
    }
    Ok(())
}

fn check_time(range: &TimeRange, value: &str) -> Result<()> {
    let invalid = |reason: &str| PreziError::InvalidSelector {
        value: value.to_owned(),
        reason: reason.to_owned(),
    };
    if !range.start.is_finite() || range.start < 0.0 {
        return Err(invalid("time start must be a non-negative number"));
    }
    if let Some(end) = range.end {
        if !end.is_finite() || end <= range.start {
            return Err(invalid("time end must follow its start"));
        }
    }
    Ok(())
}

/// What a painting annotation points at.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    canvas_id: String,
    selector: Option<MediaFragment>,
}

impl Target {
    /// The whole canvas.
    pub fn canvas(canvas_id: impl Into<String>) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            selector: None,
        }
    }

    /// Part of a canvas.
    pub fn fragment(canvas_id: impl Into<String>, selector: MediaFragment) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            selector: Some(selector),
        }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn selector(&self) -> Option<&MediaFragment> {
        self.selector.as_ref()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.selector {
            Some(selector) => write!(f, "{}#{}", self.canvas_id, selector),
            None => f.write_str(&self.canvas_id),
        }
    }
}

impl FromStr for Target {
    type Err = PreziError;

    fn from_str(value: &str) -> Result<Self> {
        let (canvas_id, selector) = match value.split_once('#') {
            Some((canvas_id, fragment)) => (canvas_id, Some(fragment.parse::<MediaFragment>()?)),
            None => (value, None),
        };
        uri::require_absolute(EntityKind::Canvas, canvas_id)?;
        Ok(Self {
            canvas_id: canvas_id.to_owned(),
            selector,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: &str = "https://example.org/iiif/book1/canvas-1";

    #[test]
    fn parses_pixel_region() {
        let fragment: MediaFragment = "xywh=pixel:0,900,600,900".parse().unwrap();
        assert_eq!(
            fragment.region(),
            Some(&Region { x: 0, y: 900, width: 600, height: 900 })
        );
        assert_eq!(fragment.to_string(), "xywh=0,900,600,900");
        assert_eq!(fragment.required_extents(), ExtentKinds::SPATIAL);
    }

    #[test]
    fn parses_time_ranges() {
        let open: MediaFragment = "t=10".parse().unwrap();
        assert_eq!(open.time(), Some(&TimeRange { start: 10.0, end: None }));

        let closed: MediaFragment = "t=npt:1.5,20".parse().unwrap();
        assert_eq!(closed.to_string(), "t=1.5,20");

        let to_end: MediaFragment = "t=,20".parse().unwrap();
        assert_eq!(to_end.time(), Some(&TimeRange { start: 0.0, end: Some(20.0) }));
    }

    #[test]
    fn parses_region_and_time() {
        let both: MediaFragment = "#xywh=0,0,10,10&t=0,5".parse().unwrap();
        assert_eq!(both.required_extents(), ExtentKinds::BOTH);
        assert_eq!(both.to_string(), "xywh=0,0,10,10&t=0,5");
    }

    #[test]
    fn rejects_malformed_fragments() {
        for bad in [
            "xywh=0,0,10",
            "xywh=0,0,0,10",
            "xywh=-1,0,10,10",
            "xywh=percent:0,0,50,50",
            "t=5,2",
            "t=abc",
            "t=0,5&t=6,7",
            "page=2",
            "xywh",
        ] {
            let err = bad.parse::<MediaFragment>().unwrap_err();
            assert!(matches!(err, PreziError::InvalidSelector { .. }), "{bad} accepted");
        }
    }

    #[test]
    fn target_round_trips_canvas_and_selector() {
        let text = format!("{CANVAS}#xywh=0,0,600,900");
        let target: Target = text.parse().unwrap();
        assert_eq!(target.canvas_id(), CANVAS);
        assert!(target.selector().is_some());
        assert_eq!(target.to_string(), text);
    }

    #[test]
    fn plain_target_is_canvas_id() {
        let target: Target = CANVAS.parse().unwrap();
        assert_eq!(target, Target::canvas(CANVAS));
        assert_eq!(target.to_string(), CANVAS);
    }

    #[test]
    fn target_needs_absolute_canvas_id() {
        assert!(matches!(
            "canvas-1#t=0,5".parse::<Target>(),
            Err(PreziError::InvalidIdentifier { kind: EntityKind::Canvas, .. })
        ));
    }

    #[test]
    fn constructors_validate() {
        assert!(MediaFragment::spatial(0, 0, 0, 5).is_err());
        assert!(MediaFragment::temporal(3.0, Some(1.0)).is_err());
        assert_eq!(MediaFragment::temporal(0.0, Some(30.0)).unwrap().to_string(), "t=0,30");
    }
}
