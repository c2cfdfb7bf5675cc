// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Identifier module — minting and validating resource identifiers.

pub mod minter;
pub mod uri;

pub use minter::{IdSource, Minter, Scope};
pub use uri::is_absolute_uri;
