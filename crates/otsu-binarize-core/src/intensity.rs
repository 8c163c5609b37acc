//! Pixel to luminance mapping.

use crate::{BinarizeError, Channels};

const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Luminance of one pixel.
///
/// Gray pixels map to their single sample. RGB pixels use the Rec. 601 luma
/// weights evaluated in `f64` and truncated (not rounded) to `u8`, so
/// `(2, 2, 2)` maps to 1.
///
/// `pixel` must hold at least `channels.count()` samples.
#[inline]
pub fn intensity(pixel: &[u8], channels: Channels) -> u8 {
    match channels {
        Channels::Gray => pixel[0],
        Channels::Rgb => {
            let r = pixel[0] as f64;
            let g = pixel[1] as f64;
            let b = pixel[2] as f64;
            (LUMA_R * r + LUMA_G * g + LUMA_B * b) as u8
        }
    }
}

/// Checked variant of [`intensity`] taking a raw channel count.
pub fn try_intensity(pixel: &[u8], channels: usize) -> Result<u8, BinarizeError> {
    let layout = Channels::from_count(channels)?;
    if pixel.len() < channels {
        return Err(BinarizeError::InvalidBufferLength {
            expected: channels,
            got: pixel.len(),
        });
    }
    Ok(intensity(pixel, layout))
}
