// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all ADMWave kernel failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdmWaveError {
    /// Invalid parameter value or a delegate the run needs is missing.
    #[error("config error: {0}")]
    Config(String),

    /// The radiative boundary delegate refused a field.
    #[error("failed to register radiative boundary for {field}: {reason}")]
    BoundaryRegistration { field: &'static str, reason: String },

    /// Boundary group selection is unavailable or was rejected by the host.
    #[error("boundary selection error: {0}")]
    BoundarySelection(String),

    /// Grid-function storage does not match the patch geometry.
    #[error("patch error: {0}")]
    Patch(String),

    /// Spatial metric determinant at or below the rejection threshold.
    #[error("degenerate spatial metric at ({i}, {j}, {k}): det = {det:e}")]
    DegenerateMetric {
        i: usize,
        j: usize,
        k: usize,
        det: f64,
    },
}

impl AdmWaveError {
    /// Configuration-class errors abort the run; the host must not retry.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::BoundaryRegistration { .. } | Self::BoundarySelection(_)
        )
    }
}

pub type AdmWaveResult<T> = Result<T, AdmWaveError>;
