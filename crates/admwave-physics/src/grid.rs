// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Grid Function Accessor
// ─────────────────────────────────────────────────────────────────────
//! Read-only 3-D view over a host-owned grid function.
//!
//! Point access is bounds-checked with `debug_assert!` only, so a stencil
//! reaching past the allocated ghost zones fails loudly in debug builds
//! and costs nothing in release builds.

use admwave_types::{AdmWaveError, AdmWaveResult, Axis, PatchGeometry};

/// Borrowed view of one grid function on a patch.
#[derive(Debug, Clone, Copy)]
pub struct GridFn<'a> {
    data: &'a [f64],
    shape: [usize; 3],
}

impl<'a> GridFn<'a> {
    /// Wrap `data`, checking that its length matches the patch.
    pub fn new(name: &str, data: &'a [f64], patch: &PatchGeometry) -> AdmWaveResult<Self> {
        check_len(name, data.len(), patch)?;
        Ok(Self {
            data,
            shape: patch.shape,
        })
    }

    /// Shape of the patch this view was bound to.
    #[inline]
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(
            i < self.shape[0] && j < self.shape[1] && k < self.shape[2],
            "grid point ({i}, {j}, {k}) outside shape {:?}",
            self.shape
        );
        i + self.shape[0] * (j + self.shape[1] * k)
    }

    #[inline]
    pub fn at(&self, i: usize, j: usize, k: usize) -> f64 {
        self.data[self.index(i, j, k)]
    }

    /// Value `offset` points away from `(i, j, k)` along `axis`.
    #[inline]
    pub fn shifted(&self, i: usize, j: usize, k: usize, axis: Axis, offset: isize) -> f64 {
        let mut p = [i, j, k];
        let a = axis.index();
        let moved = p[a] as isize + offset;
        debug_assert!(
            moved >= 0 && (moved as usize) < self.shape[a],
            "stencil offset {offset} from ({i}, {j}, {k}) leaves the patch along {axis:?}; \
             ghost zones too narrow for the finite-difference order"
        );
        p[a] = moved as usize;
        self.at(p[0], p[1], p[2])
    }
}

pub(crate) fn check_len(name: &str, len: usize, patch: &PatchGeometry) -> AdmWaveResult<()> {
    if len != patch.len() {
        return Err(AdmWaveError::Patch(format!(
            "grid function {name} has {len} points, patch {:?} needs {}",
            patch.shape,
            patch.len()
        )));
    }
    Ok(())
}

/// Fail if storage bound to `shape` is used with a different `patch`.
pub(crate) fn check_shape(
    name: &str,
    shape: [usize; 3],
    patch: &PatchGeometry,
) -> AdmWaveResult<()> {
    if shape != patch.shape {
        return Err(AdmWaveError::Patch(format!(
            "{name} is bound to shape {shape:?} but was called with patch {:?}",
            patch.shape
        )));
    }
    Ok(())
}
