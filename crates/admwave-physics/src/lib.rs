// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Numerical Core
// (C) 2026 The ADMWave Kernel Authors. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Numerical core of the Klein–Gordon scalar field on an ADM background:
//! centered finite-difference stencils, 3+1 metric algebra, the
//! stress-energy accumulator, and outer boundary enforcement.
//!
//! # Storage
//!
//! Every grid function is a host-owned `f64` slice of `nx·ny·nz` points
//! with linear index `i + nx·(j + ny·k)`. Ghost zones are part of the
//! slice; the kernel reads them but only the boundary enforcer writes
//! into them.

pub mod boundary;
pub mod fields;
pub mod grid;
pub mod metric;
pub mod stencil;
pub mod tmunu;

pub use boundary::{
    reflect, BcSelection, BoundaryEnforcer, BoundarySelector, EvolvedField, ExternalRadiative,
    ExternalSelector, RadiativeBoundary, RadiativeRequest, ASYMPTOTIC_VALUE, NONE_BC, WAVE_SPEED,
};
pub use fields::{AdmFields, RhsFields, ScalarFields, StressEnergyFields, TMUNU_NAMES};
pub use grid::GridFn;
pub use metric::{AdmPoint, FourMetric, InverseFourMetric, PointMetric, Sym3};
pub use stencil::{first_derivative_weights, DerivativeOperator};
pub use tmunu::{FourGradient, StressEnergy, StressEnergyAccumulator, SweepStats};
