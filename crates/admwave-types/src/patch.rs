// ─────────────────────────────────────────────────────────────────────
// ADMWave Kernel — Patch Geometry
// ─────────────────────────────────────────────────────────────────────
//! Shape, ghost widths, spacing, and outer-face flags of one grid patch
//! handed to the kernel by the host framework.
//!
//! Grid functions are stored x-fastest: `idx = i + nx * (j + ny * k)`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::FdOrder;
use crate::error::{AdmWaveError, AdmWaveResult};

/// Coordinate axis of the patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One of the six faces of a patch, ordered like the host's bbox array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    LowerX,
    UpperX,
    LowerY,
    UpperY,
    LowerZ,
    UpperZ,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::LowerX,
        Face::UpperX,
        Face::LowerY,
        Face::UpperY,
        Face::LowerZ,
        Face::UpperZ,
    ];

    /// Position in the `[lower x, upper x, lower y, …]` flag array.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Face::LowerX => 0,
            Face::UpperX => 1,
            Face::LowerY => 2,
            Face::UpperY => 3,
            Face::LowerZ => 4,
            Face::UpperZ => 5,
        }
    }

    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Face::LowerX | Face::UpperX => Axis::X,
            Face::LowerY | Face::UpperY => Axis::Y,
            Face::LowerZ | Face::UpperZ => Axis::Z,
        }
    }

    #[inline]
    pub const fn is_upper(self) -> bool {
        matches!(self, Face::UpperX | Face::UpperY | Face::UpperZ)
    }
}

/// Geometry of one logically rectangular patch, ghost zones included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchGeometry {
    /// Local points per axis `(nx, ny, nz)`, ghosts included.
    pub shape: [usize; 3],
    /// Ghost-zone width per axis `(gx, gy, gz)`.
    pub ghosts: [usize; 3],
    /// Grid spacing per axis.
    pub spacing: [f64; 3],
    /// True where the face is a physical outer boundary rather than an
    /// inter-patch or refinement boundary.
    pub outer_faces: [bool; 6],
}

impl PatchGeometry {
    /// Build a patch with every face flagged as a physical boundary.
    pub fn new(shape: [usize; 3], ghosts: [usize; 3], spacing: [f64; 3]) -> AdmWaveResult<Self> {
        let patch = Self {
            shape,
            ghosts,
            spacing,
            outer_faces: [true; 6],
        };
        patch.validate()?;
        Ok(patch)
    }

    /// Replace the outer-face flags.
    pub fn with_outer_faces(mut self, outer_faces: [bool; 6]) -> Self {
        self.outer_faces = outer_faces;
        self
    }

    /// Check shape, ghost widths, and spacing for consistency.
    pub fn validate(&self) -> AdmWaveResult<()> {
        for axis in Axis::ALL {
            let a = axis.index();
            if self.shape[a] == 0 {
                return Err(AdmWaveError::Patch(format!(
                    "shape along {axis:?} must be > 0"
                )));
            }
            if 2 * self.ghosts[a] > self.shape[a] {
                return Err(AdmWaveError::Patch(format!(
                    "ghost width {} along {axis:?} exceeds half the shape {}",
                    self.ghosts[a], self.shape[a]
                )));
            }
            let h = self.spacing[a];
            if !h.is_finite() || h <= 0.0 {
                return Err(AdmWaveError::Patch(format!(
                    "spacing along {axis:?} must be finite and > 0, got {h}"
                )));
            }
        }
        Ok(())
    }

    /// Total number of points, ghosts included.
    #[inline]
    pub fn len(&self) -> usize {
        self.shape[0] * self.shape[1] * self.shape[2]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.shape[0] * (j + self.shape[1] * k)
    }

    /// Owned (non-ghost) index range along `axis`.
    #[inline]
    pub fn interior(&self, axis: Axis) -> Range<usize> {
        let a = axis.index();
        self.ghosts[a]..self.shape[a] - self.ghosts[a]
    }

    /// Number of interior points.
    pub fn interior_len(&self) -> usize {
        Axis::ALL.iter().map(|&a| self.interior(a).len()).product()
    }

    #[inline]
    pub fn is_outer(&self, face: Face) -> bool {
        self.outer_faces[face.index()]
    }

    /// Index ranges `[i, j, k]` covering the ghost layer of `face`.
    ///
    /// The layer spans the full patch along the two tangential axes.
    pub fn face_layer(&self, face: Face) -> [Range<usize>; 3] {
        let mut ranges = [0..self.shape[0], 0..self.shape[1], 0..self.shape[2]];
        let a = face.axis().index();
        let (n, g) = (self.shape[a], self.ghosts[a]);
        ranges[a] = if face.is_upper() { n - g..n } else { 0..g };
        ranges
    }

    /// True if every ghost width covers the stencil half-width of `order`.
    pub fn supports_order(&self, order: FdOrder) -> bool {
        self.ghosts.iter().all(|&g| g >= order.half_width())
    }
}
