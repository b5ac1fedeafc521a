//! Piecewise-Linear Reconstruction of the Wet Size Distribution
//!
//! ## Background
//!
//! An optical particle counter does not report a size distribution, only
//! how many particles fell into each of seven diameter bins. To move those
//! particles to new (dry) diameters we need a density `n(D)` whose integral
//! over each bin reproduces the observed count.
//!
//! The reconstruction assumes `n(D)` is linear inside every bin and
//! continuous at the bin edges. The area of a trapezoid is
//! `½ · (h_left + h_right) · width`, so knowing the height at the right edge
//! of a bin fixes the height at its left edge:
//!
//! ```text
//! h[i] = 2 · count[i] / width[i] − h[i + 1]
//! ```
//!
//! Anchoring the density at zero above 10 µm and walking down from the top
//! bin gives every node height by back-substitution. The first bin is split
//! at a synthetic 80 nm node whose height is interpolated between its
//! neighbours; its count is recomputed from the interpolated height so the
//! remapper can treat the 80–100 nm slice like any other segment.
//!
//! Heights can come out negative when a bin holds far fewer particles than
//! its neighbour above. That is a property of the linear model, not an
//! error, and the heights are passed on unchanged.

use crate::{
    constants::bins::{
        BIN_COUNT, BIN_NODES, NODE_COUNT, SYNTHETIC_NODE, WET_RANGES_NM,
    },
    errors::{CorrectionError, CorrectionResult},
    math::{safe_div, trapezoid},
};

/// Seven raw particle counts, PC0.1 through PC10.0
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticleCountBins([f64; BIN_COUNT]);

impl ParticleCountBins {
    /// Validate and wrap raw counts. Counts must be finite and non-negative.
    pub fn new(counts: [f64; BIN_COUNT]) -> CorrectionResult<Self> {
        for (bin, &count) in counts.iter().enumerate() {
            if !count.is_finite() {
                return Err(CorrectionError::InvalidValue);
            }
            if count < 0.0 {
                return Err(CorrectionError::NegativeCount { bin, count });
            }
        }
        Ok(Self(counts))
    }

    /// Counts in bin order
    pub fn counts(&self) -> &[f64; BIN_COUNT] {
        &self.0
    }

    /// Count of a single bin
    pub fn get(&self, bin: usize) -> Option<f64> {
        self.0.get(bin).copied()
    }
}

/// Density histogram over the nine wet diameter nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityHistogram {
    /// Count attributed to the segment starting at each node.
    ///
    /// Node 1 holds the interpolated 80–100 nm count; node 8 is always zero.
    pub counts: [f64; NODE_COUNT],
    /// Density at each node (particles per nm).
    pub heights: [f64; NODE_COUNT],
}

impl DensityHistogram {
    /// Rebuild the density from raw counts by back-substitution.
    pub fn reconstruct(bins: &ParticleCountBins) -> Self {
        let mut counts = [0.0; NODE_COUNT];
        for (bin, &node) in BIN_NODES.iter().enumerate() {
            counts[node] = bins.0[bin];
        }

        let mut heights = [0.0; NODE_COUNT];
        heights[7] = safe_div(2.0 * counts[7], WET_RANGES_NM[7]);
        for node in (2..7).rev() {
            heights[node] = safe_div(2.0 * counts[node], WET_RANGES_NM[node]) - heights[node + 1];
        }
        // The first bin spans 50-100 nm, straight over the synthetic node.
        heights[0] = safe_div(2.0 * counts[0], WET_RANGES_NM[0]) - heights[2];

        heights[SYNTHETIC_NODE] = safe_div(
            WET_RANGES_NM[SYNTHETIC_NODE] * (heights[0] - heights[2]),
            WET_RANGES_NM[0],
        ) + heights[2];
        counts[SYNTHETIC_NODE] = trapezoid(
            heights[SYNTHETIC_NODE],
            heights[2],
            WET_RANGES_NM[SYNTHETIC_NODE],
        );

        log_debug!("Reconstructed wet density heights: {:?}", heights);

        Self { counts, heights }
    }

    /// Integrate the density back over the seven wet bins.
    ///
    /// Reproduces the input counts up to rounding error.
    pub fn bin_counts(&self) -> [f64; BIN_COUNT] {
        let h = &self.heights;
        let mut out = [0.0; BIN_COUNT];
        out[0] = trapezoid(h[0], h[2], WET_RANGES_NM[0]);
        for (bin, &node) in BIN_NODES.iter().enumerate().skip(1) {
            out[bin] = trapezoid(h[node], h[node + 1], WET_RANGES_NM[node]);
        }
        out
    }
}
