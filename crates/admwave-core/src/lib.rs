// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Core Engine
// (C) 2026 The ADMWave Kernel Authors. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Per-patch entry points of the Klein–Gordon scalar-field kernel.
//!
//! # Invariants
//!
//! 1. **Accumulate, never overwrite**: `calc_tmunu` adds into the host's
//!    `eT_ab` at interior points only. Ghost points are never written.
//!
//! 2. **Boundary failures are fatal**: a refused radiative registration or
//!    a missing boundary selector is returned as an error for which
//!    `is_fatal()` holds. Nothing is retried.
//!
//! 3. **No heap allocation in the sweep**: `k`-planes are borrowed from
//!    the host's storage in place.
//!
//! 4. **Bound to one patch**: field bundles remember the shape they were
//!    built for. Calling with any other patch returns `AdmWaveError::Patch`.

pub mod kernel;

pub use kernel::{KernelStats, ScalarWaveKernel};

pub use admwave_physics as physics;
pub use admwave_types as types;
