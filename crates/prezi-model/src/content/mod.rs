// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content module — paintable media and the services that describe them.

pub mod resource;
pub mod service;

pub use resource::ContentResource;
pub use service::Service;
