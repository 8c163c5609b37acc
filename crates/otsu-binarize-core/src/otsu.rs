//! Otsu's global threshold selection.

use crate::{Histogram, LEVELS};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Intensity cutoff: pixels with `intensity < threshold` become black.
///
/// Level 0 is never a valid threshold, since it would put every pixel in the
/// white class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Threshold(u8);

impl Threshold {
    pub const MIN: Threshold = Threshold(1);
    pub const MAX: Threshold = Threshold(255);

    pub fn new(level: u8) -> Option<Self> {
        (level > 0).then_some(Self(level))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Threshold {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| "threshold must be in 1..=255".to_string())
    }
}

impl From<Threshold> for u8 {
    fn from(t: Threshold) -> u8 {
        t.0
    }
}

/// Threshold chosen by [`otsu_threshold`] and the objective it reached.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OtsuResult {
    pub threshold: Threshold,
    /// `w0 * w1 * (mean1 - mean0)^2` at `threshold`; 0.0 when no split
    /// separated two non-empty classes.
    pub between_class_variance: f64,
}

/// Select the level maximizing the between-class variance of `hist`.
///
/// Candidate `k` in `1..=255` splits the levels into `[0, k)` and `[k, 255]`.
/// Splits leaving one class empty are skipped. Ties keep the lowest `k`, and
/// when no split beats a variance of zero (a uniform image) the threshold is
/// level 1.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip_all, fields(total = hist.total()))
)]
pub fn otsu_threshold(hist: &Histogram) -> OtsuResult {
    let bins = hist.bins();
    let total = hist.total();
    let total_sum = hist.intensity_sum();

    let mut w0 = 0u64;
    let mut sum0 = 0u64;
    let mut best_var = 0f64;
    let mut best_t = 1usize;

    for k in 1..LEVELS {
        let n = bins[k - 1];
        w0 += n;
        sum0 += (k as u64 - 1) * n;

        let w1 = total - w0;
        if w0 == 0 || w1 == 0 {
            continue;
        }

        let mean0 = sum0 as f64 / w0 as f64;
        let mean1 = (total_sum - sum0) as f64 / w1 as f64;
        let diff = mean1 - mean0;
        let var_between = w0 as f64 * w1 as f64 * diff * diff;

        if var_between > best_var {
            best_var = var_between;
            best_t = k;
        }
    }

    if best_var == 0.0 {
        warn!(
            "no class split found over {} distinct levels, using threshold {}",
            hist.distinct_levels(),
            best_t
        );
    } else {
        debug!("otsu threshold {best_t} (between-class variance {best_var:.3})");
    }

    OtsuResult {
        threshold: Threshold(best_t as u8),
        between_class_variance: best_var,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hist_of(levels: &[(u8, u64)]) -> Histogram {
        let mut bins = [0u64; LEVELS];
        for &(level, n) in levels {
            bins[level as usize] += n;
        }
        Histogram::from_bins(bins)
    }

    #[test]
    fn two_levels_pick_lowest_maximizing_split() {
        let res = otsu_threshold(&hist_of(&[(10, 1), (200, 1)]));
        assert_eq!(res.threshold.get(), 11);
        assert_relative_eq!(res.between_class_variance, 190.0 * 190.0);
    }

    #[test]
    fn uniform_histogram_defaults_to_one() {
        for level in [0u8, 1, 128, 255] {
            let res = otsu_threshold(&hist_of(&[(level, 42)]));
            assert_eq!(res.threshold, Threshold::MIN);
            assert_eq!(res.between_class_variance, 0.0);
        }
    }

    #[test]
    fn empty_histogram_defaults_to_one() {
        let res = otsu_threshold(&Histogram::default());
        assert_eq!(res.threshold.get(), 1);
    }

    #[test]
    fn adjacent_extremes_split_at_top_level() {
        let res = otsu_threshold(&hist_of(&[(254, 3), (255, 1)]));
        assert_eq!(res.threshold.get(), 255);
    }

    #[test]
    fn bimodal_threshold_separates_modes() {
        let mut levels = Vec::new();
        for v in 20..=40u8 {
            levels.push((v, 10));
        }
        for v in 180..=220u8 {
            levels.push((v, 5));
        }
        let res = otsu_threshold(&hist_of(&levels));
        let t = res.threshold.get();
        assert!(t > 40 && t <= 180, "threshold {t} should separate the modes");
    }

    #[test]
    fn matches_reference_variance() {
        // w0 = 3 at level 0, w1 = 1 at level 100: 3 * 1 * 100^2
        let res = otsu_threshold(&hist_of(&[(0, 3), (100, 1)]));
        assert_eq!(res.threshold.get(), 1);
        assert_relative_eq!(res.between_class_variance, 30_000.0);
    }

    #[test]
    fn threshold_rejects_zero() {
        assert!(Threshold::new(0).is_none());
        assert_eq!(Threshold::new(200).map(Threshold::get), Some(200));
        assert_eq!(Threshold::default(), Threshold::MIN);
    }

    #[test]
    fn threshold_serde_validates_level() {
        let t: Threshold = serde_json::from_str("17").unwrap();
        assert_eq!(t.get(), 17);
        assert!(serde_json::from_str::<Threshold>("0").is_err());
        assert_eq!(serde_json::to_string(&Threshold::MAX).unwrap(), "255");
    }
}
