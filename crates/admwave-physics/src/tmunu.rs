// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Scalar-Field Stress-Energy Accumulator
// ─────────────────────────────────────────────────────────────────────
//! Minimally coupled Klein–Gordon stress-energy tensor:
//!
//!   T_ab = ∇_aΦ ∇_bΦ − ½ g_ab (g^{cd} ∇_cΦ ∇_dΦ + m²Φ²)
//!
//! with `∂_tΦ = β^i ∂_iΦ − 2α K_Φ`. The ten independent components are
//! added into host-owned grid functions at every interior point, so
//! several field species can source one shared tensor.
//!
//! The sweep is data-parallel over `k`-planes; every point writes only
//! its own slots.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use admwave_types::{
    AdmWaveError, AdmWaveResult, Axis, DeterminantPolicy, FdOrder, KernelConfig, PatchGeometry,
    ShiftIndex,
};

use crate::fields::{AdmFields, ScalarFields, StressEnergyFields};
use crate::grid::check_shape;
use crate::metric::{AdmPoint, PointMetric};
use crate::stencil::DerivativeOperator;

/// Covariant 4-gradient `∇_aΦ` as `(t, x, y, z)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FourGradient(pub [f64; 4]);

impl FourGradient {
    /// Complete a spatial gradient with `∂_tΦ = β^i ∂_iΦ − 2α K_Φ`.
    #[inline]
    pub fn from_adm(spatial: [f64; 3], adm: &AdmPoint, k_phi: f64) -> Self {
        let b = adm.beta;
        let dt = b[0] * spatial[0] + b[1] * spatial[1] + b[2] * spatial[2]
            - 2.0 * adm.alpha * k_phi;
        Self([dt, spatial[0], spatial[1], spatial[2]])
    }

    #[inline]
    pub fn t(&self) -> f64 {
        self.0[0]
    }

    #[inline]
    pub fn spatial(&self) -> [f64; 3] {
        [self.0[1], self.0[2], self.0[3]]
    }
}

/// The ten independent components of `T_ab` at one point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StressEnergy {
    pub tt: f64,
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub xx: f64,
    pub xy: f64,
    pub xz: f64,
    pub yy: f64,
    pub yz: f64,
    pub zz: f64,
}

impl StressEnergy {
    /// Components in `tt, tx, ty, tz, xx, xy, xz, yy, yz, zz` order.
    #[inline]
    pub fn to_array(&self) -> [f64; 10] {
        [
            self.tt, self.tx, self.ty, self.tz, self.xx, self.xy, self.xz, self.yy, self.yz,
            self.zz,
        ]
    }

    /// Evaluate `T_ab` from a prepared metric and gradient.
    ///
    /// Time-time uses `g_tt`, space-space uses `γ_ij`, and time-space uses
    /// the shift selected by `shift_index`.
    #[inline]
    pub fn evaluate(
        metric: &PointMetric,
        adm: &AdmPoint,
        grad: &FourGradient,
        phi: f64,
        field_mass: f64,
        shift_index: ShiftIndex,
    ) -> Self {
        let d = &grad.0;
        let m_phi = field_mass * phi;
        let invariant = metric.upper.contract(*d, *d);
        let trace = -0.5 * (invariant + m_phi * m_phi);

        let shift = match shift_index {
            ShiftIndex::Contravariant => adm.beta,
            ShiftIndex::Covariant => metric.beta_lower,
        };
        let g = &adm.gamma;

        Self {
            tt: d[0] * d[0] + metric.lower.tt * trace,
            tx: d[0] * d[1] + shift[0] * trace,
            ty: d[0] * d[2] + shift[1] * trace,
            tz: d[0] * d[3] + shift[2] * trace,
            xx: d[1] * d[1] + g.xx * trace,
            xy: d[1] * d[2] + g.xy * trace,
            xz: d[1] * d[3] + g.xz * trace,
            yy: d[2] * d[2] + g.yy * trace,
            yz: d[2] * d[3] + g.yz * trace,
            zz: d[3] * d[3] + g.zz * trace,
        }
    }
}

/// Summary of one accumulation sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepStats {
    /// Interior points updated.
    pub points: usize,
    /// Whether the sweep ran on the rayon pool.
    pub parallel: bool,
}

/// Stress-energy accumulator bound to one run configuration.
#[derive(Debug, Clone)]
pub struct StressEnergyAccumulator {
    field_mass: f64,
    shift_index: ShiftIndex,
    determinant_policy: DeterminantPolicy,
    min_parallel_points: usize,
    order: FdOrder,
}

impl StressEnergyAccumulator {
    pub fn new(config: &KernelConfig) -> Self {
        Self {
            field_mass: config.field_mass,
            shift_index: config.shift_index,
            determinant_policy: config.determinant_policy,
            min_parallel_points: config.min_parallel_points,
            order: config.fd_order,
        }
    }

    /// `T_ab` at a single interior point.
    #[inline]
    pub fn point(
        &self,
        dop: &DerivativeOperator,
        adm: &AdmFields<'_>,
        wave: &ScalarFields<'_>,
        i: usize,
        j: usize,
        k: usize,
    ) -> StressEnergy {
        let local = adm.point(i, j, k);
        let metric = PointMetric::from_adm(&local);
        let spatial = dop.gradient(&wave.phi, i, j, k);
        let grad = FourGradient::from_adm(spatial, &local, wave.k_phi.at(i, j, k));
        StressEnergy::evaluate(
            &metric,
            &local,
            &grad,
            wave.phi.at(i, j, k),
            self.field_mass,
            self.shift_index,
        )
    }

    /// Add `T_ab` into `tmunu` at every interior point of `patch`.
    ///
    /// Every bundle must have been built for `patch`. Under
    /// `DeterminantPolicy::Reject` the interior is scanned first and nothing
    /// is written if any point fails.
    pub fn accumulate(
        &self,
        patch: &PatchGeometry,
        adm: &AdmFields<'_>,
        wave: &ScalarFields<'_>,
        tmunu: &mut StressEnergyFields<'_>,
    ) -> AdmWaveResult<SweepStats> {
        check_shape("ADM fields", adm.shape(), patch)?;
        check_shape("scalar fields", wave.shape(), patch)?;
        check_shape("stress-energy fields", tmunu.shape(), patch)?;
        if let DeterminantPolicy::Reject { min_det } = self.determinant_policy {
            check_determinants(patch, adm, min_det)?;
        }

        let dop = DerivativeOperator::new(self.order, patch.spacing);
        let (ri, rj, rk) = (
            patch.interior(Axis::X),
            patch.interior(Axis::Y),
            patch.interior(Axis::Z),
        );
        let nx = patch.shape[0];
        let points = patch.interior_len();
        let parallel = points >= self.min_parallel_points;

        let sweep_plane = |k: usize, plane: &mut [&mut [f64]; 10]| {
            for j in rj.clone() {
                for i in ri.clone() {
                    let t = self.point(&dop, adm, wave, i, j, k).to_array();
                    let at = i + nx * j;
                    for (slot, v) in plane.iter_mut().zip(t) {
                        slot[at] += v;
                    }
                }
            }
        };

        if parallel {
            tmunu
                .par_planes()
                .enumerate()
                .filter(|(k, _)| rk.contains(k))
                .for_each(|(k, mut plane)| sweep_plane(k, &mut plane));
        } else {
            for k in rk.clone() {
                sweep_plane(k, &mut tmunu.plane_mut(k));
            }
        }

        log::debug!(
            "stress-energy sweep: {points} points on {:?} (parallel: {parallel})",
            patch.shape
        );
        Ok(SweepStats { points, parallel })
    }
}

/// First interior point whose determinant fails `det > min_det`.
fn check_determinants(
    patch: &PatchGeometry,
    adm: &AdmFields<'_>,
    min_det: f64,
) -> AdmWaveResult<()> {
    for k in patch.interior(Axis::Z) {
        for j in patch.interior(Axis::Y) {
            for i in patch.interior(Axis::X) {
                let det = adm.point(i, j, k).gamma.determinant();
                if !(det.is_finite() && det > min_det) {
                    return Err(AdmWaveError::DegenerateMetric { i, j, k, det });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Sym3;

    #[test]
    fn test_time_derivative_identity() {
        let adm = AdmPoint {
            alpha: 2.0,
            beta: [1.0, 0.5, -1.0],
            gamma: Sym3::IDENTITY,
        };
        let g = FourGradient::from_adm([0.2, 0.4, 0.1], &adm, 0.25);
        // 0.2 + 0.2 − 0.1 − 2·2·0.25
        assert!((g.t() - (-0.7)).abs() < 1e-15);
        assert_eq!(g.spatial(), [0.2, 0.4, 0.1]);
    }

    #[test]
    fn test_flat_energy_density() {
        // Flat, m = 0: T_tt = ½ (∂_tΦ² + |∇Φ|²)
        let metric = PointMetric::from_adm(&AdmPoint::FLAT);
        let grad = FourGradient([0.3, 0.1, -0.2, 0.4]);
        let t = StressEnergy::evaluate(
            &metric,
            &AdmPoint::FLAT,
            &grad,
            1.0,
            0.0,
            ShiftIndex::Contravariant,
        );
        let want = 0.5 * (0.09 + 0.01 + 0.04 + 0.16);
        assert!((t.tt - want).abs() < 1e-15);
        assert_eq!(t.tx, 0.3 * 0.1);
    }

    #[test]
    fn test_mass_term_sign() {
        // Static constant field in flat space: T_tt = ½ m²Φ², T_xx = −½ m²Φ².
        let metric = PointMetric::from_adm(&AdmPoint::FLAT);
        let grad = FourGradient([0.0; 4]);
        let t = StressEnergy::evaluate(
            &metric,
            &AdmPoint::FLAT,
            &grad,
            2.0,
            0.5,
            ShiftIndex::Contravariant,
        );
        assert!((t.tt - 0.5).abs() < 1e-15);
        assert!((t.xx + 0.5).abs() < 1e-15);
        assert_eq!(t.xy, 0.0);
    }

    #[test]
    fn test_shift_index_selects_time_space_shift() {
        let adm = AdmPoint {
            alpha: 1.0,
            beta: [0.2, 0.0, 0.0],
            gamma: Sym3::new(2.0, 0.0, 0.0, 1.0, 0.0, 1.0),
        };
        let metric = PointMetric::from_adm(&adm);
        let grad = FourGradient([0.0; 4]);
        let up = StressEnergy::evaluate(&metric, &adm, &grad, 1.0, 1.0, ShiftIndex::Contravariant);
        let down = StressEnergy::evaluate(&metric, &adm, &grad, 1.0, 1.0, ShiftIndex::Covariant);
        // trace = −½, β^x = 0.2, β_x = 0.4
        assert!((up.tx + 0.1).abs() < 1e-15);
        assert!((down.tx + 0.2).abs() < 1e-15);
        assert_eq!(up.xx, down.xx);
    }

    #[test]
    fn test_accumulate_rejects_other_patch() {
        let bound = PatchGeometry::new([4, 4, 8], [2, 2, 2], [0.1; 3]).unwrap();
        let other = PatchGeometry::new([8, 4, 4], [2, 2, 2], [0.1; 3]).unwrap();
        let n = bound.len();
        let (one, zero) = (vec![1.0; n], vec![0.0; n]);
        let adm = AdmFields::new(
            &bound,
            &one,
            [&zero, &zero, &zero],
            [&one, &zero, &zero, &one, &zero, &one],
        )
        .unwrap();
        let wave = ScalarFields::new(&bound, &one, &zero).unwrap();
        let mut store: Vec<Vec<f64>> = (0..10).map(|_| vec![0.0; n]).collect();
        let mut it = store.iter_mut().map(Vec::as_mut_slice);
        let slices = std::array::from_fn(|_| it.next().unwrap());
        let mut tmunu = StressEnergyFields::new(&bound, slices).unwrap();

        let acc = StressEnergyAccumulator::new(&KernelConfig::default());
        let err = acc.accumulate(&other, &adm, &wave, &mut tmunu).unwrap_err();
        assert!(matches!(err, AdmWaveError::Patch(_)));
        assert!(!err.is_fatal());
        assert!(tmunu.component(0).iter().all(|&v| v == 0.0));
        assert_eq!(acc.accumulate(&bound, &adm, &wave, &mut tmunu).unwrap().points, 0);
    }

    #[test]
    fn test_to_array_order() {
        let t = StressEnergy {
            tt: 0.0,
            tx: 1.0,
            ty: 2.0,
            tz: 3.0,
            xx: 4.0,
            xy: 5.0,
            xz: 6.0,
            yy: 7.0,
            yz: 8.0,
            zz: 9.0,
        };
        assert_eq!(t.to_array(), [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }
}
