//! Global Otsu thresholding for 8-bit grayscale and RGB pixel buffers.
//!
//! The crate is a small numeric kernel with four stages:
//! - [`intensity()`]: pixel → 8-bit luminance (Rec. 601 weights, truncated),
//! - [`build_histogram`]: 256-bin luminance histogram of a buffer,
//! - [`otsu_threshold`]: level maximizing the between-class variance,
//! - [`binarize()`]: in-place rewrite of every pixel to pure black or white.
//!
//! [`OtsuBinarizer`] and [`threshold_and_binarize`] chain them. Decoding and
//! encoding image files is left to callers (see the `otsu-binarize` crate).
//!
//! ```
//! use otsu_binarize_core::{threshold_and_binarize, BinarizeParams, PixelBuffer};
//!
//! let buf = PixelBuffer::gray(2, 1, vec![10, 200])?;
//! let res = threshold_and_binarize(buf, &BinarizeParams::default())?;
//! assert_eq!(res.outcome.threshold.get(), 11);
//! assert_eq!(res.buffer.data, vec![0, 255]);
//! # Ok::<(), otsu_binarize_core::BinarizeError>(())
//! ```

mod binarize;
mod buffer;
mod error;
mod histogram;
mod intensity;
mod logger;
mod otsu;
mod params;
mod pipeline;

pub use binarize::{binarize, binarize_with};
pub use buffer::{Channels, PixelBuffer, PixelBufferView};
pub use error::BinarizeError;
pub use histogram::{build_histogram, build_histogram_with, Histogram, LEVELS};
pub use intensity::{intensity, try_intensity};
pub use otsu::{otsu_threshold, OtsuResult, Threshold};
pub use params::BinarizeParams;
pub use pipeline::{threshold_and_binarize, BinarizeOutcome, BinarizedImage, OtsuBinarizer};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_from_env, init_with_level, LOG_ENV};
