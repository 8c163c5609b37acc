//! 256-bin intensity histograms.

use crate::{intensity, BinarizeError, BinarizeParams, Channels, PixelBufferView};
use log::debug;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Number of 8-bit intensity levels.
pub const LEVELS: usize = 256;

/// Pixel counts per intensity level.
///
/// Counts are `u64` so `Σ i * hist[i]` fits for any buffer addressable on
/// the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; LEVELS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self { bins: [0; LEVELS] }
    }
}

impl Histogram {
    pub fn from_bins(bins: [u64; LEVELS]) -> Self {
        Self { bins }
    }

    #[inline]
    pub fn bins(&self) -> &[u64; LEVELS] {
        &self.bins
    }

    #[inline]
    pub fn count(&self, level: u8) -> u64 {
        self.bins[level as usize]
    }

    /// Total number of counted pixels.
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// `Σ level * count(level)`.
    pub fn intensity_sum(&self) -> u64 {
        self.bins
            .iter()
            .enumerate()
            .map(|(level, &n)| level as u64 * n)
            .sum()
    }

    /// Number of levels with a non-zero count.
    pub fn distinct_levels(&self) -> usize {
        self.bins.iter().filter(|&&n| n > 0).count()
    }

    /// Elementwise sum; used to reduce per-chunk histograms.
    pub fn merge(&mut self, other: &Histogram) {
        for (dst, &src) in self.bins.iter_mut().zip(other.bins.iter()) {
            *dst += src;
        }
    }

    fn accumulate(&mut self, samples: &[u8], channels: Channels) {
        for pixel in samples.chunks_exact(channels.count()) {
            self.bins[intensity(pixel, channels) as usize] += 1;
        }
    }
}

/// Count the intensity of every pixel of `view`.
///
/// Fails before touching any sample if the view's channel count or shape is
/// invalid.
pub fn build_histogram(view: &PixelBufferView<'_>) -> Result<Histogram, BinarizeError> {
    build_histogram_with(view, &BinarizeParams::default())
}

/// [`build_histogram`] honoring the execution parameters.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip_all,
        fields(width = view.width, height = view.height, channels = view.channels)
    )
)]
pub fn build_histogram_with(
    view: &PixelBufferView<'_>,
    params: &BinarizeParams,
) -> Result<Histogram, BinarizeError> {
    let channels = view.validate()?;

    let hist = if params.parallel {
        build_parallel(view, channels, params.min_rows_per_task)
    } else {
        let mut hist = Histogram::default();
        hist.accumulate(view.data, channels);
        hist
    };

    debug!(
        "histogram: {} pixels over {} distinct levels",
        hist.total(),
        hist.distinct_levels()
    );
    Ok(hist)
}

#[cfg(feature = "rayon")]
fn build_parallel(view: &PixelBufferView<'_>, channels: Channels, min_rows: usize) -> Histogram {
    let row_len = view.width * channels.count();
    // height >= 1 after validation, so the product stays within the buffer size
    let chunk_len = row_len * min_rows.clamp(1, view.height);
    view.data
        .par_chunks(chunk_len)
        .map(|chunk| {
            let mut local = Histogram::default();
            local.accumulate(chunk, channels);
            local
        })
        .reduce(Histogram::default, |mut acc, local| {
            acc.merge(&local);
            acc
        })
}

#[cfg(not(feature = "rayon"))]
fn build_parallel(view: &PixelBufferView<'_>, channels: Channels, _min_rows: usize) -> Histogram {
    let mut hist = Histogram::default();
    hist.accumulate(view.data, channels);
    hist
}
