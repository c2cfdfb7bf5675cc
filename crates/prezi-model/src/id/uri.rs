// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Absolute URI checks for identifiers.

use prezi_core::{EntityKind, PreziError, Result};

/// Whether `value` looks like an absolute URI: an RFC 3986 scheme, a colon,
/// and a non-empty remainder without whitespace.
pub fn is_absolute_uri(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    scheme_ok && !rest.is_empty() && !value.chars().any(char::is_whitespace)
}

/// Fail with `InvalidIdentifier`, naming the entity kind, unless `value` is an
/// absolute URI.
pub fn require_absolute(kind: EntityKind, value: &str) -> Result<()> {
    if is_absolute_uri(value) {
        Ok(())
    } else {
        Err(PreziError::InvalidIdentifier {
            kind,
            value: value.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_urn() {
        assert!(is_absolute_uri("https://example.org/iiif/book1/manifest"));
        assert!(is_absolute_uri("urn:uuid:6e8bc430-9c3a-11d9-9669-0800200c9a66"));
        assert!(is_absolute_uri("s3+https://bucket/key"));
    }

    #[test]
    fn rejects_relative_and_blank() {
        assert!(!is_absolute_uri("canvas-1"));
        assert!(!is_absolute_uri("/iiif/canvas-1"));
        assert!(!is_absolute_uri("https:"));
        assert!(!is_absolute_uri("1http://example.org"));
        assert!(!is_absolute_uri("https://example.org/a b"));
        assert!(!is_absolute_uri(""));
    }

    #[test]
    fn error_names_kind() {
        let err = require_absolute(EntityKind::Canvas, "canvas-1").unwrap_err();
        assert!(matches!(
            err,
            PreziError::InvalidIdentifier { kind: EntityKind::Canvas, ref value } if value == "canvas-1"
        ));
    }
}
