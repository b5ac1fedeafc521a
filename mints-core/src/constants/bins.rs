//! Particle Counter Bin Geometry
//!
//! The IPS7100 reports seven accumulated counts. Each bin spans a wet
//! diameter range; the correction treats the density inside each range as
//! linear. Two synthetic nodes (80 nm and 10000 nm) bracket the real bins so
//! the piecewise-linear histogram has somewhere to start and end.
//!
//! ```text
//! node:     0    1    2    3    4     5     6     7      8
//! D (nm):  50   80  100  300  500  1000  2500  5000  10000
//! bin:     [ PC0.1  ][PC0.3][PC0.5][PC1.0][PC2.5][PC5.0][PC10.0]
//! ```

/// Number of particle count bins reported by the counter.
pub const BIN_COUNT: usize = 7;

/// Number of diameter nodes in the piecewise-linear histogram.
pub const NODE_COUNT: usize = 9;

/// Wet diameter of every histogram node (nm).
pub const WET_BOUNDARIES_NM: [f64; NODE_COUNT] =
    [50.0, 80.0, 100.0, 300.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0];

/// Width each node's bin is divided by during back-substitution (nm).
///
/// Index 0 spans the whole 50–100 nm bin (it skips the synthetic 80 nm
/// node); index 1 is the synthetic 80–100 nm slice.
pub const WET_RANGES_NM: [f64; NODE_COUNT - 1] =
    [50.0, 20.0, 200.0, 200.0, 500.0, 1500.0, 2500.0, 5000.0];

/// Node index holding each of the seven real bins.
pub const BIN_NODES: [usize; BIN_COUNT] = [0, 2, 3, 4, 5, 6, 7];

/// Index of the synthetic 80 nm node.
pub const SYNTHETIC_NODE: usize = 1;

/// Lower cut diameter of each corrected bin (nm).
///
/// The top bin has no upper cut; everything above 5000 nm collapses into it.
pub const CUT_DIAMETERS_NM: [f64; BIN_COUNT] =
    [50.0, 100.0, 300.0, 500.0, 1000.0, 2500.0, 5000.0];

/// Field suffix of each bin as published by the counter (`pc0_1`, `pm0_1`, ...).
pub const BIN_LABELS: [&str; BIN_COUNT] =
    ["0_1", "0_3", "0_5", "1_0", "2_5", "5_0", "10_0"];

/// Bin index of PM2.5 within the seven cuts.
pub const PM2_5_INDEX: usize = 4;
