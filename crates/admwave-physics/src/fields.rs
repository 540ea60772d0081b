// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Host Grid-Function Bundles
// ─────────────────────────────────────────────────────────────────────
//! Borrowed bundles of the host framework's grid functions. The kernel
//! never allocates or frees this storage; constructors only check that
//! every slice matches the patch.

use rayon::prelude::*;

use admwave_types::{AdmWaveResult, PatchGeometry};

use crate::grid::{check_len, GridFn};
use crate::metric::{AdmPoint, Sym3};

/// Lapse, shift, and spatial metric (read-only).
#[derive(Debug, Clone, Copy)]
pub struct AdmFields<'a> {
    pub alp: GridFn<'a>,
    pub beta: [GridFn<'a>; 3],
    /// `gxx, gxy, gxz, gyy, gyz, gzz`.
    pub gamma: [GridFn<'a>; 6],
}

impl<'a> AdmFields<'a> {
    pub fn new(
        patch: &PatchGeometry,
        alp: &'a [f64],
        beta: [&'a [f64]; 3],
        gamma: [&'a [f64]; 6],
    ) -> AdmWaveResult<Self> {
        const BETA: [&str; 3] = ["betax", "betay", "betaz"];
        const GAMMA: [&str; 6] = ["gxx", "gxy", "gxz", "gyy", "gyz", "gzz"];
        Ok(Self {
            alp: GridFn::new("alp", alp, patch)?,
            beta: [
                GridFn::new(BETA[0], beta[0], patch)?,
                GridFn::new(BETA[1], beta[1], patch)?,
                GridFn::new(BETA[2], beta[2], patch)?,
            ],
            gamma: [
                GridFn::new(GAMMA[0], gamma[0], patch)?,
                GridFn::new(GAMMA[1], gamma[1], patch)?,
                GridFn::new(GAMMA[2], gamma[2], patch)?,
                GridFn::new(GAMMA[3], gamma[3], patch)?,
                GridFn::new(GAMMA[4], gamma[4], patch)?,
                GridFn::new(GAMMA[5], gamma[5], patch)?,
            ],
        })
    }

    #[inline]
    pub fn shape(&self) -> [usize; 3] {
        self.alp.shape()
    }

    /// Gather the local ADM values at `(i, j, k)`.
    #[inline]
    pub fn point(&self, i: usize, j: usize, k: usize) -> AdmPoint {
        let g = &self.gamma;
        AdmPoint {
            alpha: self.alp.at(i, j, k),
            beta: [
                self.beta[0].at(i, j, k),
                self.beta[1].at(i, j, k),
                self.beta[2].at(i, j, k),
            ],
            gamma: Sym3::new(
                g[0].at(i, j, k),
                g[1].at(i, j, k),
                g[2].at(i, j, k),
                g[3].at(i, j, k),
                g[4].at(i, j, k),
                g[5].at(i, j, k),
            ),
        }
    }
}

/// Evolved scalar-wave variables `Φ` and `K_Φ` (read-only).
#[derive(Debug, Clone, Copy)]
pub struct ScalarFields<'a> {
    pub phi: GridFn<'a>,
    pub k_phi: GridFn<'a>,
}

impl<'a> ScalarFields<'a> {
    pub fn new(patch: &PatchGeometry, phi: &'a [f64], k_phi: &'a [f64]) -> AdmWaveResult<Self> {
        Ok(Self {
            phi: GridFn::new("Phi", phi, patch)?,
            k_phi: GridFn::new("K_Phi", k_phi, patch)?,
        })
    }

    #[inline]
    pub fn shape(&self) -> [usize; 3] {
        self.phi.shape()
    }
}

/// Right-hand sides `Φ_rhs` and `K_Φ_rhs` (written by boundaries).
#[derive(Debug)]
pub struct RhsFields<'a> {
    pub phi_rhs: &'a mut [f64],
    pub k_phi_rhs: &'a mut [f64],
    shape: [usize; 3],
}

impl<'a> RhsFields<'a> {
    pub fn new(
        patch: &PatchGeometry,
        phi_rhs: &'a mut [f64],
        k_phi_rhs: &'a mut [f64],
    ) -> AdmWaveResult<Self> {
        check_len("Phi_rhs", phi_rhs.len(), patch)?;
        check_len("K_Phi_rhs", k_phi_rhs.len(), patch)?;
        Ok(Self {
            phi_rhs,
            k_phi_rhs,
            shape: patch.shape,
        })
    }

    #[inline]
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Set both right-hand sides to zero at every point, ghosts included.
    pub fn zero(&mut self) {
        self.phi_rhs.fill(0.0);
        self.k_phi_rhs.fill(0.0);
    }
}

/// Names of the ten stress-energy grid functions, in storage order.
pub const TMUNU_NAMES: [&str; 10] = [
    "eTtt", "eTtx", "eTty", "eTtz", "eTxx", "eTxy", "eTxz", "eTyy", "eTyz", "eTzz",
];

/// The ten `T_ab` accumulators in `tt, tx, ty, tz, xx, xy, xz, yy, yz, zz`
/// order.
#[derive(Debug)]
pub struct StressEnergyFields<'a> {
    components: [&'a mut [f64]; 10],
    shape: [usize; 3],
}

impl<'a> StressEnergyFields<'a> {
    pub fn new(patch: &PatchGeometry, components: [&'a mut [f64]; 10]) -> AdmWaveResult<Self> {
        for (name, c) in TMUNU_NAMES.iter().zip(components.iter()) {
            check_len(name, c.len(), patch)?;
        }
        Ok(Self {
            components,
            shape: patch.shape,
        })
    }

    /// Read one component back, mostly for inspection in tests.
    pub fn component(&self, n: usize) -> &[f64] {
        self.components[n]
    }

    #[inline]
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    #[inline]
    fn plane_len(&self) -> usize {
        self.shape[0] * self.shape[1]
    }

    /// The ten plane slices of one `k`.
    pub(crate) fn plane_mut(&mut self, k: usize) -> [&mut [f64]; 10] {
        let n = self.plane_len();
        let at = k * n..(k + 1) * n;
        self.components.each_mut().map(|c| &mut c[at.clone()])
    }

    /// Every `k`-plane as a parallel iterator, borrowed in place.
    ///
    /// Item `k` holds the ten plane slices of that `k`, so planes can be
    /// handed to different threads without aliasing.
    pub(crate) fn par_planes(
        &mut self,
    ) -> impl IndexedParallelIterator<Item = [&mut [f64]; 10]> + '_ {
        let n = self.plane_len();
        let [c0, c1, c2, c3, c4, c5, c6, c7, c8, c9] = self.components.each_mut();
        (
            c0.par_chunks_mut(n),
            c1.par_chunks_mut(n),
            c2.par_chunks_mut(n),
            c3.par_chunks_mut(n),
            c4.par_chunks_mut(n),
            c5.par_chunks_mut(n),
            c6.par_chunks_mut(n),
            c7.par_chunks_mut(n),
            c8.par_chunks_mut(n),
            c9.par_chunks_mut(n),
        )
            .into_par_iter()
            .map(|(c0, c1, c2, c3, c4, c5, c6, c7, c8, c9)| {
                [c0, c1, c2, c3, c4, c5, c6, c7, c8, c9]
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adm_point_gather() {
        let patch = PatchGeometry::new([3, 3, 3], [1, 1, 1], [1.0; 3]).unwrap();
        let n = patch.len();
        let alp = vec![0.9; n];
        let bx = vec![0.1; n];
        let by = vec![0.2; n];
        let bz = vec![0.3; n];
        let g: Vec<Vec<f64>> = (0..6).map(|c| vec![c as f64 + 1.0; n]).collect();
        let adm = AdmFields::new(
            &patch,
            &alp,
            [&bx, &by, &bz],
            [&g[0], &g[1], &g[2], &g[3], &g[4], &g[5]],
        )
        .unwrap();
        let p = adm.point(1, 1, 1);
        assert_eq!(p.alpha, 0.9);
        assert_eq!(p.beta, [0.1, 0.2, 0.3]);
        assert_eq!(p.gamma.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_rhs_zero_covers_ghosts() {
        let patch = PatchGeometry::new([4, 4, 4], [1, 1, 1], [1.0; 3]).unwrap();
        let mut a = vec![f64::NAN; patch.len()];
        let mut b = vec![3.0; patch.len()];
        let mut rhs = RhsFields::new(&patch, &mut a, &mut b).unwrap();
        rhs.zero();
        assert!(a.iter().chain(b.iter()).all(|&v| v == 0.0));
    }

    #[test]
    fn test_planes_are_disjoint_and_ordered() {
        let patch = PatchGeometry::new([2, 2, 3], [0, 0, 0], [1.0; 3]).unwrap();
        let mut store: Vec<Vec<f64>> = (0..10).map(|_| vec![0.0; patch.len()]).collect();
        {
            let [a, b, c, d, e, f, g, h, i, j] = store.each_mut_array();
            let mut t = StressEnergyFields::new(&patch, [a, b, c, d, e, f, g, h, i, j]).unwrap();
            assert_eq!(t.par_planes().count(), 3);
            t.par_planes().enumerate().for_each(|(k, mut plane)| {
                for (n, slot) in plane.iter_mut().enumerate() {
                    assert_eq!(slot.len(), 4);
                    slot[0] = (10 * k + n) as f64;
                }
            });
            let mut plane = t.plane_mut(1);
            assert_eq!(plane[4][0], 14.0);
            plane[4][3] = -1.0;
        }
        assert_eq!(store[3][patch.index(0, 0, 2)], 23.0);
        assert_eq!(store[0][patch.index(0, 0, 1)], 10.0);
        assert_eq!(store[4][patch.index(1, 1, 1)], -1.0);
    }

    #[test]
    fn test_bundles_remember_shape() {
        let patch = PatchGeometry::new([3, 4, 5], [1, 1, 1], [1.0; 3]).unwrap();
        let phi = vec![0.0; patch.len()];
        let wave = ScalarFields::new(&patch, &phi, &phi).unwrap();
        let mut a = vec![0.0; patch.len()];
        let mut b = vec![0.0; patch.len()];
        let rhs = RhsFields::new(&patch, &mut a, &mut b).unwrap();
        assert_eq!(wave.shape(), [3, 4, 5]);
        assert_eq!(rhs.shape(), [3, 4, 5]);
    }

    #[test]
    fn test_tmunu_length_mismatch() {
        let patch = PatchGeometry::new([2, 2, 2], [0, 0, 0], [1.0; 3]).unwrap();
        let mut store: Vec<Vec<f64>> = (0..10).map(|_| vec![0.0; patch.len()]).collect();
        store[7].pop();
        let [a, b, c, d, e, f, g, h, i, j] = store.each_mut_array();
        let err = StressEnergyFields::new(&patch, [a, b, c, d, e, f, g, h, i, j]).unwrap_err();
        assert!(err.to_string().contains("eTyy"));
    }

    trait EachMutArray {
        fn each_mut_array(&mut self) -> [&mut [f64]; 10];
    }

    impl EachMutArray for Vec<Vec<f64>> {
        fn each_mut_array(&mut self) -> [&mut [f64]; 10] {
            let mut it = self.iter_mut().map(|v| v.as_mut_slice());
            std::array::from_fn(|_| it.next().unwrap())
        }
    }
}
