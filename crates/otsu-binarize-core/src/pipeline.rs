//! Histogram → threshold → binarize, as one call.

use crate::{
    binarize_with, build_histogram_with, otsu_threshold, BinarizeError, BinarizeParams, Histogram,
    PixelBuffer, Threshold,
};
use log::info;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// What a pipeline run decided.
#[derive(Clone, Debug, PartialEq)]
pub struct BinarizeOutcome {
    pub threshold: Threshold,
    pub between_class_variance: f64,
    /// Intensity histogram of the buffer before binarization.
    pub histogram: Histogram,
}

/// A binarized buffer together with the run outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct BinarizedImage {
    pub buffer: PixelBuffer,
    pub outcome: BinarizeOutcome,
}

/// Global Otsu binarizer.
#[derive(Clone, Debug, Default)]
pub struct OtsuBinarizer {
    params: BinarizeParams,
}

impl OtsuBinarizer {
    pub fn new(params: BinarizeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BinarizeParams {
        &self.params
    }

    /// Choose a threshold for `buffer` and binarize it in place.
    ///
    /// Invalid buffers are rejected before the histogram pass and are never
    /// modified.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip_all,
            fields(width = buffer.width, height = buffer.height, channels = buffer.channels)
        )
    )]
    pub fn run(&self, buffer: &mut PixelBuffer) -> Result<BinarizeOutcome, BinarizeError> {
        let histogram = build_histogram_with(&buffer.view(), &self.params)?;
        let otsu = otsu_threshold(&histogram);
        binarize_with(buffer, otsu.threshold, &self.params)?;

        info!(
            "binarized {}x{}x{} buffer at threshold {}",
            buffer.width,
            buffer.height,
            buffer.channels,
            otsu.threshold.get()
        );

        Ok(BinarizeOutcome {
            threshold: otsu.threshold,
            between_class_variance: otsu.between_class_variance,
            histogram,
        })
    }
}

/// Convenience wrapper taking ownership of the buffer.
pub fn threshold_and_binarize(
    mut buffer: PixelBuffer,
    params: &BinarizeParams,
) -> Result<BinarizedImage, BinarizeError> {
    let outcome = OtsuBinarizer::new(params.clone()).run(&mut buffer)?;
    Ok(BinarizedImage { buffer, outcome })
}
