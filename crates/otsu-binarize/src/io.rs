//! JSON configuration and report helpers for file-to-file binarization.

use crate::core::{BinarizeOutcome, BinarizeParams, PixelBuffer};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Prefix of the default output file name.
pub const OUTPUT_PREFIX: &str = "Result_";

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

/// Configuration for one binarization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinarizeConfig {
    pub image_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub report_path: Option<String>,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(default)]
    pub params: BinarizeParams,
}

impl BinarizeConfig {
    /// Config for `image_path` with every other field at its default.
    pub fn for_image(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            output_path: None,
            report_path: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            params: BinarizeParams::default(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output image path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| default_output_path(&self.image_path))
    }
}

/// `dir/Result_<name>` next to `input`.
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{OUTPUT_PREFIX}{name}"))
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinarizeReport {
    pub image_path: String,
    pub output_path: String,
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub threshold: u8,
    pub between_class_variance: f64,
    /// Pre-binarization intensity histogram, 256 bins.
    pub histogram: Vec<u64>,
}

impl BinarizeReport {
    pub fn new(
        image_path: impl Into<String>,
        output_path: impl Into<String>,
        buffer: &PixelBuffer,
        outcome: &BinarizeOutcome,
    ) -> Self {
        Self {
            image_path: image_path.into(),
            output_path: output_path.into(),
            width: buffer.width,
            height: buffer.height,
            channels: buffer.channels,
            threshold: outcome.threshold.get(),
            between_class_variance: outcome.between_class_variance,
            histogram: outcome.histogram.bins().to_vec(),
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::threshold_and_binarize;

    #[test]
    fn config_fills_defaults() {
        let cfg: BinarizeConfig = serde_json::from_str(r#"{"image_path": "in/photo.jpg"}"#).unwrap();
        assert_eq!(cfg, BinarizeConfig::for_image("in/photo.jpg"));
        assert_eq!(cfg.jpeg_quality, 100);
        assert_eq!(cfg.output_path(), PathBuf::from("in/Result_photo.jpg"));
    }

    #[test]
    fn explicit_output_path_wins() {
        let mut cfg = BinarizeConfig::for_image("a.jpg");
        cfg.output_path = Some("out/b.png".to_string());
        assert_eq!(cfg.output_path(), PathBuf::from("out/b.png"));
    }

    #[test]
    fn default_output_path_keeps_directory() {
        assert_eq!(default_output_path("img6.jpg"), PathBuf::from("Result_img6.jpg"));
        assert_eq!(
            default_output_path("/data/scans/page.png"),
            PathBuf::from("/data/scans/Result_page.png")
        );
    }

    #[test]
    fn report_captures_outcome() {
        let buf = PixelBuffer::gray(2, 1, vec![10, 200]).unwrap();
        let res = threshold_and_binarize(buf, &BinarizeParams::default()).unwrap();
        let report = BinarizeReport::new("in.png", "out.png", &res.buffer, &res.outcome);
        assert_eq!(report.threshold, 11);
        assert_eq!(report.histogram.len(), 256);
        assert_eq!(report.histogram[10], 1);
        assert_eq!(report.histogram[200], 1);
        assert_eq!((report.width, report.height, report.channels), (2, 1, 1));
    }
}
