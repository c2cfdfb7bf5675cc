// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image service descriptors attached to content resources.

use prezi_core::{ComplianceLevel, PreziError, Result, ServiceKind};

/// An image service a viewer can use instead of the static media URI.
///
/// Services are opaque: only a non-empty base URI is required, and the
/// descriptor is emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    id: String,
    kind: ServiceKind,
    profile: ComplianceLevel,
}

impl Service {
    pub fn new(kind: ServiceKind, id: impl Into<String>, profile: ComplianceLevel) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PreziError::InvalidService {
                id,
                reason: "service base URI is empty".into(),
            });
        }
        Ok(Self { id, kind, profile })
    }

    /// An Image API 3 service.
    pub fn image3(id: impl Into<String>, profile: ComplianceLevel) -> Result<Self> {
        Self::new(ServiceKind::ImageService3, id, profile)
    }

    /// An Image API 2 service.
    pub fn image2(id: impl Into<String>, profile: ComplianceLevel) -> Result<Self> {
        Self::new(ServiceKind::ImageService2, id, profile)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    pub fn profile(&self) -> ComplianceLevel {
        self.profile
    }
}
