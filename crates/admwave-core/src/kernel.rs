// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Per-Patch Scalar-Wave Kernel
// ─────────────────────────────────────────────────────────────────────
//! Entry points the host scheduler calls on every patch:
//!
//! - `calc_tmunu` adds the scalar-field stress-energy into `eT_ab`.
//! - `rhs_boundaries` applies the configured outer boundary to the RHS.
//! - `post_step_boundaries` registers the evolved group for the `"none"` BC.
//! - `zero_rhs` clears both right-hand sides.
//!
//! Every fatal error is logged where it is detected and returned to the
//! host, which is expected to abort the run.

use std::sync::Arc;

use parking_lot::Mutex;

use admwave_physics::{
    AdmFields, BoundaryEnforcer, BoundarySelector, RadiativeBoundary, RhsFields, ScalarFields,
    StressEnergyAccumulator, StressEnergyFields, SweepStats,
};
use admwave_types::{AdmWaveResult, BoundaryMode, KernelConfig, PatchGeometry};

/// Running counters across all patches served by one kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KernelStats {
    pub tmunu_sweeps: u64,
    pub parallel_sweeps: u64,
    pub points_accumulated: u64,
    pub rhs_boundary_calls: u64,
    pub post_step_calls: u64,
    pub rhs_zeroed: u64,
    pub failures: u64,
}

/// Scalar-wave kernel bound to one run configuration.
///
/// Thread-safe: patches may be processed concurrently; the counters are
/// guarded by a `parking_lot::Mutex`.
pub struct ScalarWaveKernel {
    config: KernelConfig,
    accumulator: StressEnergyAccumulator,
    boundaries: BoundaryEnforcer,
    selector: Option<Arc<dyn BoundarySelector>>,
    stats: Mutex<KernelStats>,
}

impl ScalarWaveKernel {
    pub fn new(config: KernelConfig) -> AdmWaveResult<Self> {
        config.validate()?;
        log::info!(
            "Using {}th order finite differencing. Make sure that you have at least {} ghost zones",
            config.fd_order,
            config.fd_order.half_width()
        );
        log::info!(
            "Scalar field mass {}, outer boundary {}",
            config.field_mass,
            config.boundary_mode.name()
        );
        Ok(Self {
            accumulator: StressEnergyAccumulator::new(&config),
            boundaries: BoundaryEnforcer::new(&config),
            selector: None,
            stats: Mutex::new(KernelStats::default()),
            config,
        })
    }

    /// Register the host's radiative boundary routine.
    pub fn with_radiative(mut self, radiative: Arc<dyn RadiativeBoundary>) -> Self {
        self.boundaries = self.boundaries.with_radiative(radiative);
        self
    }

    /// Register the host's boundary group selection.
    pub fn with_selector(mut self, selector: Arc<dyn BoundarySelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn boundary_mode(&self) -> BoundaryMode {
        self.boundaries.mode()
    }

    /// Add the scalar-field `T_ab` into `tmunu` over the interior of `patch`.
    pub fn calc_tmunu(
        &self,
        patch: &PatchGeometry,
        adm: &AdmFields<'_>,
        wave: &ScalarFields<'_>,
        tmunu: &mut StressEnergyFields<'_>,
    ) -> AdmWaveResult<SweepStats> {
        if !patch.supports_order(self.config.fd_order) {
            log::warn!(
                "patch {:?} has ghost widths {:?}, {}th order stencils need {}",
                patch.shape,
                patch.ghosts,
                self.config.fd_order,
                self.config.fd_order.half_width()
            );
        }
        let result = patch
            .validate()
            .and_then(|()| self.accumulator.accumulate(patch, adm, wave, tmunu));

        let mut stats = self.stats.lock();
        match result {
            Ok(sweep) => {
                stats.tmunu_sweeps += 1;
                stats.points_accumulated += sweep.points as u64;
                if sweep.parallel {
                    stats.parallel_sweeps += 1;
                }
            }
            Err(ref e) => {
                stats.failures += 1;
                log::error!("stress-energy sweep on patch {:?} failed: {e}", patch.shape);
            }
        }
        result
    }

    /// Apply the configured outer boundary to freshly computed RHS.
    pub fn rhs_boundaries(
        &self,
        patch: &PatchGeometry,
        wave: &ScalarFields<'_>,
        rhs: &mut RhsFields<'_>,
    ) -> AdmWaveResult<()> {
        let result = self.boundaries.apply(patch, wave, rhs);
        self.record(&result, |s| s.rhs_boundary_calls += 1);
        result
    }

    /// Post-step pass: select the evolved group for the `"none"` BC.
    pub fn post_step_boundaries(&self) -> AdmWaveResult<()> {
        let result = self.boundaries.post_step(self.selector.as_deref());
        self.record(&result, |s| s.post_step_calls += 1);
        result
    }

    /// Set both right-hand sides to zero everywhere on the patch.
    pub fn zero_rhs(&self, rhs: &mut RhsFields<'_>) {
        rhs.zero();
        self.stats.lock().rhs_zeroed += 1;
    }

    pub fn stats(&self) -> KernelStats {
        *self.stats.lock()
    }

    pub fn reset_stats(&self) {
        *self.stats.lock() = KernelStats::default();
    }

    fn record<T>(&self, result: &AdmWaveResult<T>, on_ok: impl FnOnce(&mut KernelStats)) {
        let mut stats = self.stats.lock();
        match result {
            Ok(_) => on_ok(&mut stats),
            Err(_) => stats.failures += 1,
        }
    }
}
