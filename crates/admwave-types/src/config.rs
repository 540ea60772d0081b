// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Run Configuration
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AdmWaveError, AdmWaveResult};
use crate::patch::PatchGeometry;

/// Group registered for the `"none"` boundary condition after each step.
pub const DEFAULT_EVOLVED_GROUP: &str = "ADMWave::evolved_group";

/// Accuracy order of the centered first-derivative stencils.
///
/// Serialised as the plain integer 4, 6 or 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FdOrder {
    #[default]
    Fourth,
    Sixth,
    Eighth,
}

impl FdOrder {
    #[inline]
    pub const fn as_u8(self) -> u8 {
        match self {
            FdOrder::Fourth => 4,
            FdOrder::Sixth => 6,
            FdOrder::Eighth => 8,
        }
    }

    /// Stencil half-width, which is also the minimum ghost width.
    #[inline]
    pub const fn half_width(self) -> usize {
        self.as_u8() as usize / 2
    }
}

impl TryFrom<u8> for FdOrder {
    type Error = AdmWaveError;

    fn try_from(order: u8) -> AdmWaveResult<Self> {
        match order {
            4 => Ok(FdOrder::Fourth),
            6 => Ok(FdOrder::Sixth),
            8 => Ok(FdOrder::Eighth),
            other => Err(AdmWaveError::Config(format!(
                "fd_order must be 4, 6 or 8, got {other}"
            ))),
        }
    }
}

impl From<FdOrder> for u8 {
    fn from(order: FdOrder) -> u8 {
        order.as_u8()
    }
}

impl fmt::Display for FdOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Outer boundary treatment applied to the right-hand sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BoundaryMode {
    /// Characteristic extrapolation through the host's radiative routine.
    Radiative,
    /// `Φ_rhs ← K_Φ`, `K_Φ_rhs ← 0` in the outer ghost layers.
    Reflecting,
    /// Leave the right-hand sides alone.
    #[default]
    None,
}

impl BoundaryMode {
    /// Parse a parameter-file name. Unknown names fall back to `None`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "newrad" | "new_rad" | "radiative" => BoundaryMode::Radiative,
            "reflecting" => BoundaryMode::Reflecting,
            "none" => BoundaryMode::None,
            other => {
                log::debug!("boundary mode {other:?} not recognised, using none");
                BoundaryMode::None
            }
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BoundaryMode::Radiative => "radiative",
            BoundaryMode::Reflecting => "reflecting",
            BoundaryMode::None => "none",
        }
    }
}

impl From<String> for BoundaryMode {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<BoundaryMode> for String {
    fn from(mode: BoundaryMode) -> String {
        mode.name().to_string()
    }
}

/// Which shift stands in for `g_ti` in the time-space stress components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftIndex {
    /// Upper-index shift `β^i`.
    #[default]
    Contravariant,
    /// Lowered shift `β_i = γ_ij β^j`, the true `g_ti`.
    Covariant,
}

/// What to do with a non-positive spatial-metric determinant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeterminantPolicy {
    /// No check: NaN/Inf flow into the tensor output.
    #[default]
    Propagate,
    /// Fail the sweep before any write if some interior point has
    /// `det γ <= min_det` or a non-finite determinant.
    Reject { min_det: f64 },
}

/// Per-run configuration of the scalar-wave kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Finite-difference order for every derivative.
    /// Default: 4.
    pub fd_order: FdOrder,

    /// Right-hand-side boundary treatment.
    /// Default: none.
    pub boundary_mode: BoundaryMode,

    /// Scalar field mass `m` in the potential `(mΦ)²`.
    /// Default: 0.0.
    pub field_mass: f64,

    /// Power-law falloff of `Φ` handed to the radiative routine.
    /// Default: 1.0.
    pub phi_falloff: f64,

    /// Power-law falloff of `K_Φ` handed to the radiative routine.
    /// Default: 1.0.
    pub k_phi_falloff: f64,

    /// Shift used for `T_ti`.
    /// Default: contravariant.
    pub shift_index: ShiftIndex,

    /// Determinant handling in the stress-energy sweep.
    /// Default: propagate.
    pub determinant_policy: DeterminantPolicy,

    /// Interior points below which the sweep runs on the calling thread.
    /// Default: 4096.
    pub min_parallel_points: usize,

    /// Host group holding `Φ` and `K_Φ`, selected for the `"none"` BC
    /// after each step.
    /// Default: `ADMWave::evolved_group`.
    pub evolved_group: String,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            fd_order: FdOrder::Fourth,
            boundary_mode: BoundaryMode::None,
            field_mass: 0.0,
            phi_falloff: 1.0,
            k_phi_falloff: 1.0,
            shift_index: ShiftIndex::Contravariant,
            determinant_policy: DeterminantPolicy::Propagate,
            min_parallel_points: 4096,
            evolved_group: DEFAULT_EVOLVED_GROUP.to_string(),
        }
    }
}

impl KernelConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> AdmWaveResult<()> {
        if !self.field_mass.is_finite() || self.field_mass < 0.0 {
            return Err(AdmWaveError::Config(format!(
                "field_mass must be finite and >= 0, got {}",
                self.field_mass
            )));
        }
        if !self.phi_falloff.is_finite() || self.phi_falloff <= 0.0 {
            return Err(AdmWaveError::Config(format!(
                "phi_falloff must be finite and > 0, got {}",
                self.phi_falloff
            )));
        }
        if !self.k_phi_falloff.is_finite() || self.k_phi_falloff <= 0.0 {
            return Err(AdmWaveError::Config(format!(
                "k_phi_falloff must be finite and > 0, got {}",
                self.k_phi_falloff
            )));
        }
        if self.evolved_group.trim().is_empty() {
            return Err(AdmWaveError::Config(
                "evolved_group must name a host group".to_string(),
            ));
        }
        if let DeterminantPolicy::Reject { min_det } = self.determinant_policy {
            if !min_det.is_finite() || min_det < 0.0 {
                return Err(AdmWaveError::Config(format!(
                    "determinant_policy.min_det must be finite and >= 0, got {min_det}"
                )));
            }
        }
        Ok(())
    }

    /// Fail if `patch` has too few ghost zones for `fd_order`.
    pub fn check_patch(&self, patch: &PatchGeometry) -> AdmWaveResult<()> {
        if patch.supports_order(self.fd_order) {
            return Ok(());
        }
        Err(AdmWaveError::Config(format!(
            "{}th order finite differencing needs at least {} ghost zones, patch has {:?}",
            self.fd_order,
            self.fd_order.half_width(),
            patch.ghosts
        )))
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> AdmWaveResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AdmWaveError::Config(format!("JSON parse error: {e}")))
    }
}
