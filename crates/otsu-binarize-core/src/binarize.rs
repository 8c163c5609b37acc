//! In-place two-level rewrite of a pixel buffer.

use crate::{intensity, BinarizeError, BinarizeParams, Channels, PixelBuffer, Threshold};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "tracing")]
use tracing::instrument;

const BLACK: u8 = 0;
const WHITE: u8 = 255;

/// Rewrite every pixel of `buffer` to black (`intensity < threshold`) or
/// white, on all channels.
///
/// The buffer is validated first and left untouched on error. Width, height
/// and channel count never change.
pub fn binarize(buffer: &mut PixelBuffer, threshold: Threshold) -> Result<(), BinarizeError> {
    binarize_with(buffer, threshold, &BinarizeParams::default())
}

/// [`binarize`] honoring the execution parameters.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "debug",
        skip_all,
        fields(width = buffer.width, height = buffer.height, threshold = threshold.get())
    )
)]
pub fn binarize_with(
    buffer: &mut PixelBuffer,
    threshold: Threshold,
    params: &BinarizeParams,
) -> Result<(), BinarizeError> {
    let channels = buffer.validate()?;
    let t = threshold.get();

    if params.parallel {
        // height >= 1 after validation, so the product stays within the buffer size
        let min_pixels = params.min_rows_per_task.clamp(1, buffer.height) * buffer.width;
        binarize_parallel(&mut buffer.data, channels, t, min_pixels);
    } else {
        for pixel in buffer.data.chunks_exact_mut(channels.count()) {
            binarize_pixel(pixel, channels, t);
        }
    }
    Ok(())
}

#[inline]
fn binarize_pixel(pixel: &mut [u8], channels: Channels, threshold: u8) {
    let value = if intensity(pixel, channels) < threshold {
        BLACK
    } else {
        WHITE
    };
    pixel.fill(value);
}

#[cfg(feature = "rayon")]
fn binarize_parallel(data: &mut [u8], channels: Channels, threshold: u8, min_pixels: usize) {
    data.par_chunks_mut(channels.count())
        .with_min_len(min_pixels)
        .for_each(|pixel| binarize_pixel(pixel, channels, threshold));
}

#[cfg(not(feature = "rayon"))]
fn binarize_parallel(data: &mut [u8], channels: Channels, threshold: u8, _min_pixels: usize) {
    for pixel in data.chunks_exact_mut(channels.count()) {
        binarize_pixel(pixel, channels, threshold);
    }
}
