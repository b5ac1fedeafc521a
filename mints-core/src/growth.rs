//! Hygroscopic Growth Model
//!
//! ## Physics Background
//!
//! Soluble aerosol (sulfates, nitrates, sea salt) absorbs water vapour and
//! swells as relative humidity rises. An optical counter sizes the wet
//! particle, so at high humidity every particle is reported in a larger bin
//! than its dry core belongs to, and PM mass is overestimated.
//!
//! The growth factor used here is the single-parameter form
//!
//! ```text
//! GF(RH) = (1 + k · RH / (100 − RH))^(1/3)
//! D_dry  = D_wet / GF(RH)
//! ```
//!
//! with `k = 0.62`. The factor is 1 at RH = 0 and diverges as RH → 100 %.
//!
//! ## Humidity Handling
//!
//! 1. The measured RH is de-rated by 0.7 (`effective_humidity`), because the
//!    climate sensor reads the enclosure, not the optical chamber.
//! 2. The growth law refuses RH ≥ 100 % and negative RH outright.
//! 3. Accepted RH is clamped to at most 98 % before the factor is computed.
//!
//! ## Usage
//!
//! ```rust
//! use mints_core::growth::HygroscopicGrowth;
//!
//! let growth = HygroscopicGrowth::default();
//! let rh = growth.effective_humidity(60.0); // 42 %
//! let dry = growth.dry_boundaries(rh)?;
//! assert!(dry.points[8] < 10_000.0);
//! # Ok::<(), mints_core::CorrectionError>(())
//! ```

use crate::{
    constants::{
        bins::{NODE_COUNT, WET_BOUNDARIES_NM},
        growth::{GROWTH_EXPONENT_K, HUMIDITY_DERATING, MAX_EFFECTIVE_RH_PCT, SATURATION_RH_PCT},
    },
    errors::{CorrectionError, CorrectionResult},
};

/// Dry diameter of every histogram node and the width of every segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryBoundaries {
    /// Dry diameter of each node (nm)
    pub points: [f64; NODE_COUNT],
    /// `points[i + 1] - points[i]` (nm)
    pub ranges: [f64; NODE_COUNT - 1],
}

/// Growth law parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HygroscopicGrowth {
    /// Growth exponent `k`
    k: f64,
    /// Scale applied to the measured RH
    derating: f64,
    /// Upper clamp on the RH fed to the growth law
    max_rh: f64,
}

impl Default for HygroscopicGrowth {
    fn default() -> Self {
        Self {
            k: GROWTH_EXPONENT_K,
            derating: HUMIDITY_DERATING,
            max_rh: MAX_EFFECTIVE_RH_PCT,
        }
    }
}

impl HygroscopicGrowth {
    /// RH seen by the particles for a given climate-sensor RH
    ///
    /// NaN stays NaN so the growth law can reject it.
    pub fn effective_humidity(&self, measured_rh: f64) -> f64 {
        let rh = measured_rh * self.derating;
        if rh > self.max_rh {
            self.max_rh
        } else {
            rh
        }
    }

    /// Diameter growth factor at the given effective RH
    pub fn growth_factor(&self, rh: f64) -> CorrectionResult<f64> {
        if !rh.is_finite() {
            return Err(CorrectionError::InvalidValue);
        }
        if rh >= SATURATION_RH_PCT {
            return Err(CorrectionError::SaturatedHumidity { rh });
        }
        if rh < 0.0 {
            return Err(CorrectionError::OutOfRange {
                value: rh,
                min: 0.0,
                max: SATURATION_RH_PCT,
            });
        }

        let rh = rh.min(self.max_rh);
        let volume_growth = 1.0 + self.k * (rh / (SATURATION_RH_PCT - rh));
        Ok(libm::pow(volume_growth, 1.0 / 3.0))
    }

    /// Shrink the wet node diameters to their dry equivalents
    pub fn dry_boundaries(&self, rh: f64) -> CorrectionResult<DryBoundaries> {
        let factor = self.growth_factor(rh)?;

        let mut points = [0.0; NODE_COUNT];
        for (dry, wet) in points.iter_mut().zip(WET_BOUNDARIES_NM.iter()) {
            *dry = wet / factor;
        }

        let mut ranges = [0.0; NODE_COUNT - 1];
        for (i, range) in ranges.iter_mut().enumerate() {
            *range = points[i + 1] - points[i];
        }

        Ok(DryBoundaries { points, ranges })
    }
}
