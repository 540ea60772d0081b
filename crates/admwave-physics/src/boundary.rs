// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Outer Boundary Enforcer
// ─────────────────────────────────────────────────────────────────────
//! Outer boundary treatment of the scalar-wave right-hand sides.
//!
//! - `Radiative`: hand `(Φ, Φ_rhs)` and `(K_Φ, K_Φ_rhs)` to the host's
//!   characteristic extrapolation routine. Any refusal is fatal.
//! - `Reflecting`: in the ghost layer of every physical outer face,
//!   `Φ_rhs ← K_Φ` and `K_Φ_rhs ← 0`. Edge and corner overlaps receive
//!   identical values from every face.
//! - `None`: nothing.
//!
//! The post-step pass never touches data. It registers the evolved group
//! for the `"none"` boundary condition so the host still applies its
//! symmetry conditions.

use std::sync::Arc;

use admwave_types::{AdmWaveError, AdmWaveResult, BoundaryMode, Face, KernelConfig, PatchGeometry};

use crate::fields::{RhsFields, ScalarFields};
use crate::grid::{check_shape, GridFn};

/// Value both evolved fields approach at large radius.
pub const ASYMPTOTIC_VALUE: f64 = 0.0;

/// Characteristic speed of outgoing scalar waves.
pub const WAVE_SPEED: f64 = 1.0;

/// Boundary condition name used by the post-step registration.
pub const NONE_BC: &str = "none";

/// Evolved variable handed to the radiative routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvolvedField {
    Phi,
    KPhi,
}

impl EvolvedField {
    pub const fn name(self) -> &'static str {
        match self {
            EvolvedField::Phi => "Phi",
            EvolvedField::KPhi => "K_Phi",
        }
    }
}

/// One call into the radiative routine.
#[derive(Debug)]
pub struct RadiativeRequest<'a> {
    pub field: EvolvedField,
    pub var: &'a [f64],
    pub rhs: &'a mut [f64],
    pub asymptotic: f64,
    pub speed: f64,
    pub falloff: f64,
}

/// Host-side radiative (characteristic extrapolation) boundary routine.
pub trait RadiativeBoundary: Send + Sync {
    fn apply(&self, patch: &PatchGeometry, request: RadiativeRequest<'_>) -> Result<(), String>;
}

type RadiativeFn =
    Box<dyn Fn(&PatchGeometry, RadiativeRequest<'_>) -> Result<(), String> + Send + Sync>;

/// Radiative routine backed by a host closure.
pub struct ExternalRadiative {
    apply_fn: RadiativeFn,
}

impl ExternalRadiative {
    pub fn new(
        apply_fn: impl Fn(&PatchGeometry, RadiativeRequest<'_>) -> Result<(), String>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            apply_fn: Box::new(apply_fn),
        }
    }
}

impl RadiativeBoundary for ExternalRadiative {
    fn apply(&self, patch: &PatchGeometry, request: RadiativeRequest<'_>) -> Result<(), String> {
        (self.apply_fn)(patch, request)
    }
}

/// Group-for-BC selection handed to the host's boundary machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcSelection<'a> {
    pub group: &'a str,
    pub bc_name: &'a str,
    pub faces: &'a [Face],
    pub width: usize,
}

/// Host-side boundary group selection.
pub trait BoundarySelector: Send + Sync {
    fn select_group_for_bc(&self, selection: &BcSelection<'_>) -> Result<(), String>;
}

type SelectFn = Box<dyn Fn(&BcSelection<'_>) -> Result<(), String> + Send + Sync>;

/// Boundary selector backed by a host closure.
pub struct ExternalSelector {
    select_fn: SelectFn,
}

impl ExternalSelector {
    pub fn new(
        select_fn: impl Fn(&BcSelection<'_>) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            select_fn: Box::new(select_fn),
        }
    }
}

impl BoundarySelector for ExternalSelector {
    fn select_group_for_bc(&self, selection: &BcSelection<'_>) -> Result<(), String> {
        (self.select_fn)(selection)
    }
}

/// Applies the configured outer boundary condition to the RHS.
#[derive(Clone)]
pub struct BoundaryEnforcer {
    mode: BoundaryMode,
    phi_falloff: f64,
    k_phi_falloff: f64,
    evolved_group: String,
    radiative: Option<Arc<dyn RadiativeBoundary>>,
}

impl std::fmt::Debug for BoundaryEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundaryEnforcer")
            .field("mode", &self.mode)
            .field("phi_falloff", &self.phi_falloff)
            .field("k_phi_falloff", &self.k_phi_falloff)
            .field("evolved_group", &self.evolved_group)
            .field("radiative", &self.radiative.is_some())
            .finish()
    }
}

impl BoundaryEnforcer {
    pub fn new(config: &KernelConfig) -> Self {
        Self {
            mode: config.boundary_mode,
            phi_falloff: config.phi_falloff,
            k_phi_falloff: config.k_phi_falloff,
            evolved_group: config.evolved_group.clone(),
            radiative: None,
        }
    }

    pub fn with_radiative(mut self, radiative: Arc<dyn RadiativeBoundary>) -> Self {
        self.radiative = Some(radiative);
        self
    }

    pub fn mode(&self) -> BoundaryMode {
        self.mode
    }

    /// Enforce the outer boundary on freshly computed right-hand sides.
    ///
    /// `wave` and `rhs` must have been built for `patch`.
    pub fn apply(
        &self,
        patch: &PatchGeometry,
        wave: &ScalarFields<'_>,
        rhs: &mut RhsFields<'_>,
    ) -> AdmWaveResult<()> {
        check_shape("scalar fields", wave.shape(), patch)?;
        check_shape("RHS fields", rhs.shape(), patch)?;
        match self.mode {
            BoundaryMode::Radiative => self.apply_radiative(patch, wave, rhs),
            BoundaryMode::Reflecting => reflect(patch, &wave.k_phi, rhs).map(|_| ()),
            BoundaryMode::None => Ok(()),
        }
    }

    fn apply_radiative(
        &self,
        patch: &PatchGeometry,
        wave: &ScalarFields<'_>,
        rhs: &mut RhsFields<'_>,
    ) -> AdmWaveResult<()> {
        let Some(radiative) = self.radiative.as_deref() else {
            log::error!("radiative boundary requested but no routine is registered");
            return Err(AdmWaveError::Config(
                "radiative boundary mode needs a RadiativeBoundary routine".to_string(),
            ));
        };

        // Both fields are attempted before any failure is reported.
        let phi = radiative.apply(
            patch,
            RadiativeRequest {
                field: EvolvedField::Phi,
                var: wave.phi.as_slice(),
                rhs: &mut *rhs.phi_rhs,
                asymptotic: ASYMPTOTIC_VALUE,
                speed: WAVE_SPEED,
                falloff: self.phi_falloff,
            },
        );
        let k_phi = radiative.apply(
            patch,
            RadiativeRequest {
                field: EvolvedField::KPhi,
                var: wave.k_phi.as_slice(),
                rhs: &mut *rhs.k_phi_rhs,
                asymptotic: ASYMPTOTIC_VALUE,
                speed: WAVE_SPEED,
                falloff: self.k_phi_falloff,
            },
        );

        for (field, result) in [(EvolvedField::Phi, phi), (EvolvedField::KPhi, k_phi)] {
            if let Err(reason) = result {
                log::error!("Failed to register radiative boundary for {}: {reason}", field.name());
                return Err(AdmWaveError::BoundaryRegistration {
                    field: field.name(),
                    reason,
                });
            }
        }
        Ok(())
    }

    /// Post-step pass: register the evolved group for the `"none"` BC.
    pub fn post_step(&self, selector: Option<&dyn BoundarySelector>) -> AdmWaveResult<()> {
        let Some(selector) = selector else {
            log::error!("boundary group selection is not available");
            return Err(AdmWaveError::BoundarySelection(
                "no boundary selector registered with the host".to_string(),
            ));
        };
        let group = self.evolved_group.as_str();
        let selection = BcSelection {
            group,
            bc_name: NONE_BC,
            faces: &Face::ALL,
            width: 1,
        };
        selector.select_group_for_bc(&selection).map_err(|reason| {
            log::error!("Failed to register BC for {group}: {reason}");
            AdmWaveError::BoundarySelection(format!("failed to register BC for {group}: {reason}"))
        })
    }
}

/// Reflecting condition on every physical outer face of `patch`.
///
/// Returns the number of point writes, overlaps counted once per face.
pub fn reflect(
    patch: &PatchGeometry,
    k_phi: &GridFn<'_>,
    rhs: &mut RhsFields<'_>,
) -> AdmWaveResult<usize> {
    check_shape("K_Phi", k_phi.shape(), patch)?;
    check_shape("RHS fields", rhs.shape(), patch)?;
    let mut written = 0;
    for face in Face::ALL {
        if !patch.is_outer(face) {
            continue;
        }
        let [ri, rj, rk] = patch.face_layer(face);
        if ri.is_empty() || rj.is_empty() || rk.is_empty() {
            log::warn!("reflecting boundary on {face:?} has no ghost layer");
            continue;
        }
        for k in rk {
            for j in rj.clone() {
                for i in ri.clone() {
                    let idx = patch.index(i, j, k);
                    rhs.phi_rhs[idx] = k_phi.at(i, j, k);
                    rhs.k_phi_rhs[idx] = 0.0;
                    written += 1;
                }
            }
        }
    }
    Ok(written)
}
