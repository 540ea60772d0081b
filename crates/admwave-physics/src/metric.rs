// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — ADM Metric Algebra
// ─────────────────────────────────────────────────────────────────────
//! Per-point reconstruction of the spacetime metric from 3+1 data:
//!
//!   γ^ij  = cof(γ)_ij / det γ
//!   β_i   = γ_ij β^j
//!   g_tt  = −α² + β_i β^i
//!   g^tt  = −1/α²,  g^ti = −g^tt β^i,  g^ij = γ^ij + g^tt β^i β^j
//!
//! Nothing here validates the determinant: a degenerate γ yields
//! non-finite components that propagate to every caller.

use serde::{Deserialize, Serialize};

/// Symmetric 3×3 tensor stored by its six independent components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sym3 {
    pub xx: f64,
    pub xy: f64,
    pub xz: f64,
    pub yy: f64,
    pub yz: f64,
    pub zz: f64,
}

impl Sym3 {
    pub const IDENTITY: Sym3 = Sym3 {
        xx: 1.0,
        xy: 0.0,
        xz: 0.0,
        yy: 1.0,
        yz: 0.0,
        zz: 1.0,
    };

    pub const fn new(xx: f64, xy: f64, xz: f64, yy: f64, yz: f64, zz: f64) -> Self {
        Self {
            xx,
            xy,
            xz,
            yy,
            yz,
            zz,
        }
    }

    /// Component `(a, b)` with `a, b ∈ {0, 1, 2}`.
    #[inline]
    pub fn get(&self, a: usize, b: usize) -> f64 {
        match (a.min(b), a.max(b)) {
            (0, 0) => self.xx,
            (0, 1) => self.xy,
            (0, 2) => self.xz,
            (1, 1) => self.yy,
            (1, 2) => self.yz,
            (2, 2) => self.zz,
            _ => panic!("Sym3 index ({a}, {b}) out of range"),
        }
    }

    /// Components in `xx, xy, xz, yy, yz, zz` order.
    #[inline]
    pub fn to_array(&self) -> [f64; 6] {
        [self.xx, self.xy, self.xz, self.yy, self.yz, self.zz]
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        let Sym3 {
            xx,
            xy,
            xz,
            yy,
            yz,
            zz,
        } = *self;
        -(xz * xz * yy) + 2.0 * xy * xz * yz - xx * yz * yz - xy * xy * zz + xx * yy * zz
    }

    /// Inverse via cofactors, returned with the determinant it used.
    #[inline]
    pub fn inverse_with_det(&self) -> (Sym3, f64) {
        let Sym3 {
            xx,
            xy,
            xz,
            yy,
            yz,
            zz,
        } = *self;
        let det = self.determinant();
        let inv = Sym3 {
            xx: (yy * zz - yz * yz) / det,
            xy: (xz * yz - xy * zz) / det,
            xz: (xy * yz - xz * yy) / det,
            yy: (xx * zz - xz * xz) / det,
            yz: (xy * xz - xx * yz) / det,
            zz: (xx * yy - xy * xy) / det,
        };
        (inv, det)
    }

    #[inline]
    pub fn inverse(&self) -> Sym3 {
        self.inverse_with_det().0
    }

    /// Index lowering `v_i = S_ij v^j`.
    #[inline]
    pub fn lower(&self, v: [f64; 3]) -> [f64; 3] {
        [
            self.xx * v[0] + self.xy * v[1] + self.xz * v[2],
            self.xy * v[0] + self.yy * v[1] + self.yz * v[2],
            self.xz * v[0] + self.yz * v[1] + self.zz * v[2],
        ]
    }

    /// Full contraction `u^i S_ij w^j`.
    #[inline]
    pub fn contract(&self, u: [f64; 3], w: [f64; 3]) -> f64 {
        let sw = self.lower(w);
        u[0] * sw[0] + u[1] * sw[1] + u[2] * sw[2]
    }

    /// Matrix product `S T` (not symmetric in general), row-major.
    pub fn matmul(&self, other: &Sym3) -> [[f64; 3]; 3] {
        let mut out = [[0.0; 3]; 3];
        for (a, row) in out.iter_mut().enumerate() {
            for (b, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|c| self.get(a, c) * other.get(c, b)).sum();
            }
        }
        out
    }
}

/// Lapse, shift, and spatial metric at one grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdmPoint {
    pub alpha: f64,
    pub beta: [f64; 3],
    pub gamma: Sym3,
}

impl AdmPoint {
    /// Minkowski slice: `α = 1`, `β = 0`, `γ = δ`.
    pub const FLAT: AdmPoint = AdmPoint {
        alpha: 1.0,
        beta: [0.0; 3],
        gamma: Sym3::IDENTITY,
    };
}

/// Lower-index 4-metric in 3+1 form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FourMetric {
    pub tt: f64,
    /// `g_ti = β_i`.
    pub ti: [f64; 3],
    pub ij: Sym3,
}

/// Upper-index 4-metric in 3+1 form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InverseFourMetric {
    pub tt: f64,
    pub ti: [f64; 3],
    pub ij: Sym3,
}

impl InverseFourMetric {
    /// `g^{ab} u_a v_b` for covectors given as `(t, x, y, z)`.
    #[inline]
    pub fn contract(&self, u: [f64; 4], v: [f64; 4]) -> f64 {
        let us = [u[1], u[2], u[3]];
        let vs = [v[1], v[2], v[3]];
        let mut s = self.tt * u[0] * v[0];
        for a in 0..3 {
            s += self.ti[a] * (u[0] * vs[a] + us[a] * v[0]);
        }
        s + self.ij.contract(us, vs)
    }
}

/// Every derived metric quantity needed at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMetric {
    pub det_gamma: f64,
    pub inv_gamma: Sym3,
    pub beta_lower: [f64; 3],
    pub lower: FourMetric,
    pub upper: InverseFourMetric,
}

impl PointMetric {
    /// Reconstruct lower and upper 4-metrics from ADM data.
    #[inline]
    pub fn from_adm(adm: &AdmPoint) -> Self {
        let (inv_gamma, det_gamma) = adm.gamma.inverse_with_det();
        let beta = adm.beta;
        let beta_lower = adm.gamma.lower(beta);
        let alpha2 = adm.alpha * adm.alpha;

        let g_tt =
            -alpha2 + beta_lower[0] * beta[0] + beta_lower[1] * beta[1] + beta_lower[2] * beta[2];

        let ig_tt = -1.0 / alpha2;
        let ig_ij = Sym3 {
            xx: inv_gamma.xx + ig_tt * beta[0] * beta[0],
            xy: inv_gamma.xy + ig_tt * beta[0] * beta[1],
            xz: inv_gamma.xz + ig_tt * beta[0] * beta[2],
            yy: inv_gamma.yy + ig_tt * beta[1] * beta[1],
            yz: inv_gamma.yz + ig_tt * beta[1] * beta[2],
            zz: inv_gamma.zz + ig_tt * beta[2] * beta[2],
        };

        Self {
            det_gamma,
            inv_gamma,
            beta_lower,
            lower: FourMetric {
                tt: g_tt,
                ti: beta_lower,
                ij: adm.gamma,
            },
            upper: InverseFourMetric {
                tt: ig_tt,
                ti: beta.map(|b| -ig_tt * b),
                ij: ig_ij,
            },
        }
    }

    /// Row `t` of `g_ab g^bc` at `c = t`; equals 1 for a consistent pair.
    pub fn time_row_identity(&self) -> f64 {
        let l = &self.lower;
        let u = &self.upper;
        l.tt * u.tt + l.ti[0] * u.ti[0] + l.ti[1] * u.ti[1] + l.ti[2] * u.ti[2]
    }
}
