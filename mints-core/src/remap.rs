//! Re-integration of the Density over the Original Cut Diameters
//!
//! ## Overview
//!
//! After the growth model shrinks every histogram node to its dry diameter,
//! the density is defined over the *dry* nodes while the published bins stay
//! at the *wet* cut diameters (50, 100, 300, 500, 1000, 2500, 5000 nm). This
//! module integrates the shifted density between consecutive cuts.
//!
//! ## Refitting on Dry Widths
//!
//! The node counts are redistributed over the dry segment widths with the
//! same back-substitution as the reconstruction (density zero at the dry
//! 10 µm node), and each segment gets a straight line:
//!
//! ```text
//! slope[i]     = (f[i + 1] − f[i]) / Δ_dry[i]
//! intercept[i] = f[i] − slope[i] · D_dry[i]
//! ```
//!
//! ## Cut Levels
//!
//! Work proceeds top-down. The top bin collects everything above 5000 nm.
//! Every lower bin `[lo, hi]` owns one dry node `d` (the dry image of its
//! own upper wet node) and looks at the next node up `d'`. Where those fall
//! relative to the cuts picks one of four closed-form trapezoid sums:
//!
//! ```text
//!  Straddle:     lo ──── d ──── hi ── d'      node inside, next above
//!  Contained:    lo ── d ── d' ── hi          both nodes inside
//!  Overshoot:    d ── lo ── d' ── hi          node below, next inside
//!  Interpolated: anything else                straight line lo..hi
//! ```
//!
//! Each level hands the density it found at its lower cut to the level
//! below as that level's upper-cut density.
//!
//! With a growth factor of 1 every level is a `Straddle` whose node sits
//! exactly on the upper cut, and the remap returns the input counts.

use crate::{
    constants::bins::{BIN_COUNT, CUT_DIAMETERS_NM, NODE_COUNT},
    distribution::DensityHistogram,
    growth::DryBoundaries,
    math::{finite_or_zero, safe_div, trapezoid},
};

/// Where the shifted nodes sit relative to a pair of cuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// `lo < d <= hi` and `d' > hi`
    Straddle,
    /// `lo < d < hi` and `d' < hi`
    Contained,
    /// `d < lo` and `d' < hi`
    Overshoot,
    /// Any other arrangement, including nodes landing exactly on a cut
    Interpolated,
}

impl Crossing {
    /// Classify a level from its cuts and the two dry nodes it sees
    pub fn classify(lower: f64, upper: f64, node: f64, next_node: f64) -> Self {
        if lower < node && node <= upper && next_node > upper {
            Crossing::Straddle
        } else if lower < node && node < upper && next_node < upper {
            Crossing::Contained
        } else if node < lower && next_node < upper {
            Crossing::Overshoot
        } else {
            Crossing::Interpolated
        }
    }

    /// Whether the density at the lower cut comes from the segment below the node
    fn uses_segment_below(self) -> bool {
        matches!(self, Crossing::Straddle | Crossing::Contained)
    }
}

/// One bin of the descending remap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutLevel {
    /// Output bin index
    pub bin: usize,
    /// Lower cut diameter (nm)
    pub lower: f64,
    /// Upper cut diameter (nm)
    pub upper: f64,
    /// Histogram node whose dry image belongs to this bin
    pub node: usize,
}

/// Levels below the top bin, in evaluation order
pub const CUT_LEVELS: [CutLevel; BIN_COUNT - 1] = [
    CutLevel { bin: 5, lower: 2500.0, upper: 5000.0, node: 7 },
    CutLevel { bin: 4, lower: 1000.0, upper: 2500.0, node: 6 },
    CutLevel { bin: 3, lower: 500.0, upper: 1000.0, node: 5 },
    CutLevel { bin: 2, lower: 300.0, upper: 500.0, node: 4 },
    CutLevel { bin: 1, lower: 100.0, upper: 300.0, node: 3 },
    CutLevel { bin: 0, lower: 50.0, upper: 100.0, node: 2 },
];

/// Densities one level needs, all in particles per nm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelDensities {
    /// Density at the upper cut, from the level above
    pub upper_cut: f64,
    /// Fitted density at the level's own node
    pub node: f64,
    /// Fitted density at the next node up
    pub next_node: f64,
    /// Lower cut density on the line through the segment below the node
    pub lower_cut_below: f64,
    /// Lower cut density on the line through the segment above the node
    pub lower_cut_above: f64,
}

/// Result of integrating one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelIntegral {
    /// Arrangement that was integrated
    pub crossing: Crossing,
    /// Density at the lower cut, handed to the next level down
    pub lower_cut: f64,
    /// Corrected particle count for the bin
    pub count: f64,
}

/// Integrate the density between two cuts.
///
/// `node` and `next_node` are the dry diameters of the level's node and the
/// node above it.
pub fn integrate_level(
    lower: f64,
    upper: f64,
    node: f64,
    next_node: f64,
    densities: LevelDensities,
) -> LevelIntegral {
    let crossing = Crossing::classify(lower, upper, node, next_node);
    let lower_cut = if crossing.uses_segment_below() {
        densities.lower_cut_below
    } else {
        densities.lower_cut_above
    };

    let count = match crossing {
        Crossing::Straddle => {
            trapezoid(densities.upper_cut, densities.node, upper - node)
                + trapezoid(lower_cut, densities.node, node - lower)
        }
        Crossing::Contained => {
            trapezoid(lower_cut, densities.node, node - lower)
                + trapezoid(densities.node, densities.next_node, next_node - node)
                + trapezoid(densities.next_node, densities.upper_cut, upper - next_node)
        }
        Crossing::Overshoot => {
            trapezoid(densities.upper_cut, densities.next_node, upper - next_node)
                + trapezoid(lower_cut, densities.next_node, next_node - lower)
        }
        Crossing::Interpolated => trapezoid(densities.upper_cut, lower_cut, upper - lower),
    };

    LevelIntegral { crossing, lower_cut, count }
}

/// Linear density fitted over the dry node widths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryFit {
    /// Dry node diameters (nm)
    pub points: [f64; NODE_COUNT],
    /// Density at each dry node
    pub heights: [f64; NODE_COUNT],
    /// Slope of each segment
    pub slopes: [f64; NODE_COUNT - 1],
    /// Intercept of each segment
    pub intercepts: [f64; NODE_COUNT - 1],
}

impl DryFit {
    /// Redistribute the node counts over the dry segment widths
    pub fn new(histogram: &DensityHistogram, dry: &DryBoundaries) -> Self {
        let counts = &histogram.counts;
        let ranges = &dry.ranges;

        // Node 0 is never a segment start on the dry grid: the first bin
        // reaches the remap only through the synthetic node.
        let mut heights = [0.0; NODE_COUNT];
        heights[7] = safe_div(2.0 * counts[7], ranges[7]);
        for node in (1..7).rev() {
            heights[node] = safe_div(2.0 * counts[node], ranges[node]) - heights[node + 1];
        }

        let mut slopes = [0.0; NODE_COUNT - 1];
        let mut intercepts = [0.0; NODE_COUNT - 1];
        for segment in 0..NODE_COUNT - 1 {
            slopes[segment] = safe_div(heights[segment + 1] - heights[segment], ranges[segment]);
            intercepts[segment] = heights[segment] - slopes[segment] * dry.points[segment];
        }

        Self { points: dry.points, heights, slopes, intercepts }
    }

    /// Density on the line through `segment`, evaluated at diameter `d`
    pub fn line(&self, segment: usize, d: f64) -> f64 {
        finite_or_zero(self.slopes[segment] * d + self.intercepts[segment])
    }
}

/// Maps the shifted density back onto the seven cut diameters
#[derive(Debug, Clone, Copy, Default)]
pub struct BinRemapper;

impl BinRemapper {
    /// Corrected counts for every bin, PC0.1 through PC10.0
    pub fn remap(&self, histogram: &DensityHistogram, dry: &DryBoundaries) -> [f64; BIN_COUNT] {
        let fit = DryFit::new(histogram, dry);
        let mut counts = [0.0; BIN_COUNT];

        // Everything above the last cut lands in the top bin.
        let top_cut = CUT_DIAMETERS_NM[BIN_COUNT - 1];
        let top = fit.points[NODE_COUNT - 1];
        let mut upper_cut = 0.0;
        if top > top_cut {
            upper_cut = fit.line(NODE_COUNT - 2, top_cut);
            counts[BIN_COUNT - 1] = trapezoid(upper_cut, 0.0, top - top_cut);
        }

        for level in CUT_LEVELS.iter() {
            let node = level.node;
            let densities = LevelDensities {
                upper_cut,
                node: fit.heights[node],
                next_node: fit.heights[node + 1],
                lower_cut_below: fit.line(node - 1, level.lower),
                lower_cut_above: fit.line(node, level.lower),
            };
            let integral = integrate_level(
                level.lower,
                level.upper,
                fit.points[node],
                fit.points[node + 1],
                densities,
            );
            log_debug!(
                "Remap bin {} [{}, {}]: {:?} -> {}",
                level.bin, level.lower, level.upper, integral.crossing, integral.count
            );
            counts[level.bin] = integral.count;
            upper_cut = integral.lower_cut;
        }

        counts
    }
}
