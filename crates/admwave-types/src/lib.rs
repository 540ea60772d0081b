// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Types
// (C) 2026 The ADMWave Kernel Authors. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Configuration, patch geometry, and error hierarchy shared by the
//! ADMWave scalar-field kernel crates.

pub mod config;
pub mod error;
pub mod patch;

pub use config::{
    BoundaryMode, DeterminantPolicy, FdOrder, KernelConfig, ShiftIndex, DEFAULT_EVOLVED_GROUP,
};
pub use error::{AdmWaveError, AdmWaveResult};
pub use patch::{Axis, Face, PatchGeometry};
