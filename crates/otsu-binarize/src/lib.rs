//! High-level facade for the `otsu-binarize` workspace.
//!
//! This crate provides:
//! - re-exports of the numeric kernel (`otsu-binarize-core`),
//! - (feature-gated) a codec boundary that decodes images into pixel buffers
//!   and encodes binarized buffers back, built on the `image` crate,
//! - JSON run configuration and run reports,
//! - (feature `cli`) the `otsu-binarize` command line tool.
//!
//! ## Quickstart
//!
//! ```no_run
//! use otsu_binarize::codec;
//! use otsu_binarize::io::BinarizeConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BinarizeConfig::for_image("scan.jpg");
//! let report = codec::binarize_file(&config)?;
//! println!("threshold {} -> {}", report.threshold, report.output_path);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `otsu_binarize::core`: pixel buffers, histogram, solver, binarizer.
//! - `otsu_binarize::io`: [`io::BinarizeConfig`] and [`io::BinarizeReport`].
//! - `otsu_binarize::codec` (feature `image`): file decode/encode helpers.

pub use otsu_binarize_core as core;

pub use otsu_binarize_core::{
    threshold_and_binarize, BinarizeError, BinarizeOutcome, BinarizeParams, PixelBuffer,
    Threshold,
};

pub mod io;

#[cfg(feature = "image")]
pub mod codec;
