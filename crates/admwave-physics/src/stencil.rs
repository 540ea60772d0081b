// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Finite-Difference Stencils
// ─────────────────────────────────────────────────────────────────────
//! Centered first-derivative operators of order 4, 6 and 8:
//!
//!   ∂f/∂x ≈ (1/h) Σ_{m=1}^{p/2} w_m [f(x + m h) − f(x − m h)]
//!
//! The operator never loops over the grid; callers invoke it once per
//! derivative per point.

use admwave_types::{Axis, FdOrder};

use crate::grid::GridFn;

const WEIGHTS_4: [f64; 2] = [2.0 / 3.0, -1.0 / 12.0];
const WEIGHTS_6: [f64; 3] = [3.0 / 4.0, -3.0 / 20.0, 1.0 / 60.0];
const WEIGHTS_8: [f64; 4] = [4.0 / 5.0, -1.0 / 5.0, 4.0 / 105.0, -1.0 / 280.0];

/// Antisymmetric weights `w_1 … w_{p/2}` of the centered stencil.
#[inline]
pub const fn first_derivative_weights(order: FdOrder) -> &'static [f64] {
    match order {
        FdOrder::Fourth => &WEIGHTS_4,
        FdOrder::Sixth => &WEIGHTS_6,
        FdOrder::Eighth => &WEIGHTS_8,
    }
}

/// First-derivative operator for a fixed order and grid spacing.
#[derive(Debug, Clone, Copy)]
pub struct DerivativeOperator {
    order: FdOrder,
    weights: &'static [f64],
    inv_spacing: [f64; 3],
}

impl DerivativeOperator {
    pub fn new(order: FdOrder, spacing: [f64; 3]) -> Self {
        Self {
            order,
            weights: first_derivative_weights(order),
            inv_spacing: spacing.map(|h| 1.0 / h),
        }
    }

    #[inline]
    pub fn order(&self) -> FdOrder {
        self.order
    }

    /// `∂f/∂axis` at `(i, j, k)`.
    ///
    /// The point must sit at least `order / 2` points from the array edge.
    #[inline]
    pub fn partial(&self, f: &GridFn<'_>, axis: Axis, i: usize, j: usize, k: usize) -> f64 {
        let mut acc = 0.0;
        for (m, w) in self.weights.iter().enumerate() {
            let m = m as isize + 1;
            acc += w * (f.shifted(i, j, k, axis, m) - f.shifted(i, j, k, axis, -m));
        }
        acc * self.inv_spacing[axis.index()]
    }

    /// `(∂_x f, ∂_y f, ∂_z f)` at `(i, j, k)`.
    #[inline]
    pub fn gradient(&self, f: &GridFn<'_>, i: usize, j: usize, k: usize) -> [f64; 3] {
        [
            self.partial(f, Axis::X, i, j, k),
            self.partial(f, Axis::Y, i, j, k),
            self.partial(f, Axis::Z, i, j, k),
        ]
    }
}
