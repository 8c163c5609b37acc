//! Codec boundary built on the `image` crate.
//!
//! Decoding yields a [`PixelBuffer`] with 1 (gray) or 3 (RGB) channels; any
//! other layout is rejected before it reaches the histogram pass. Encoding
//! tags the output with the color type matching the buffer's channel count.

use crate::core::{BinarizeError, Channels, OtsuBinarizer, PixelBuffer};
use crate::io::{BinarizeConfig, BinarizeReport, IoError};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageFormat, ImageReader};
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the file-level helpers.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Binarize(#[from] BinarizeError),

    #[error("unsupported color type {0:?} (expected 8-bit gray or RGB)")]
    UnsupportedColorType(image::ColorType),

    #[error("invalid JPEG quality {0} (expected 1..=100)")]
    InvalidJpegQuality(u8),

    #[error("failed to write report: {0}")]
    Report(#[from] IoError),
}

/// Take ownership of a decoded image as an interleaved pixel buffer.
///
/// 8-bit layouts other than gray and RGB fail with
/// `UnsupportedChannelCount`; deeper sample types fail with
/// `UnsupportedColorType`.
pub fn from_dynamic_image(img: DynamicImage) -> Result<PixelBuffer, CodecError> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let buffer = match img {
        DynamicImage::ImageLuma8(gray) => PixelBuffer::gray(width, height, gray.into_raw())?,
        DynamicImage::ImageRgb8(rgb) => PixelBuffer::rgb(width, height, rgb.into_raw())?,
        other => {
            let color = other.color();
            if color.bytes_per_pixel() != color.channel_count() {
                return Err(CodecError::UnsupportedColorType(color));
            }
            let channels = color.channel_count() as usize;
            return Err(BinarizeError::UnsupportedChannelCount { channels }.into());
        }
    };
    Ok(buffer)
}

/// Decode an image file, guessing the format from its contents.
pub fn read_image(path: impl AsRef<Path>) -> Result<PixelBuffer, CodecError> {
    let path = path.as_ref();
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    from_dynamic_image(img)
}

fn image_dims(buffer: &PixelBuffer) -> Result<(u32, u32), BinarizeError> {
    let invalid = BinarizeError::InvalidDimensions {
        width: buffer.width,
        height: buffer.height,
    };
    let w = u32::try_from(buffer.width).map_err(|_| invalid)?;
    let h = u32::try_from(buffer.height).map_err(|_| invalid)?;
    Ok((w, h))
}

fn color_type(channels: Channels) -> ExtendedColorType {
    match channels {
        Channels::Gray => ExtendedColorType::L8,
        Channels::Rgb => ExtendedColorType::Rgb8,
    }
}

/// Shape-preserving conversion back to an `image` type.
pub fn to_dynamic_image(buffer: PixelBuffer) -> Result<DynamicImage, CodecError> {
    let channels = buffer.validate()?;
    let (w, h) = image_dims(&buffer)?;
    let invalid = BinarizeError::InvalidDimensions {
        width: buffer.width,
        height: buffer.height,
    };
    let img = match channels {
        Channels::Gray => image::GrayImage::from_raw(w, h, buffer.into_raw())
            .map(DynamicImage::ImageLuma8),
        Channels::Rgb => {
            image::RgbImage::from_raw(w, h, buffer.into_raw()).map(DynamicImage::ImageRgb8)
        }
    };
    img.ok_or(CodecError::Binarize(invalid))
}

/// Encode `buffer` to `path`, picking the format from the extension.
///
/// JPEG output uses `jpeg_quality` (1..=100); other formats ignore it.
pub fn write_image(
    buffer: &PixelBuffer,
    path: impl AsRef<Path>,
    jpeg_quality: u8,
) -> Result<(), CodecError> {
    let path = path.as_ref();
    let channels = buffer.validate()?;
    let (w, h) = image_dims(buffer)?;
    let format = ImageFormat::from_path(path)?;

    if format == ImageFormat::Jpeg {
        if !(1..=100).contains(&jpeg_quality) {
            return Err(CodecError::InvalidJpegQuality(jpeg_quality));
        }
        let writer = BufWriter::new(File::create(path)?);
        let mut encoder = JpegEncoder::new_with_quality(writer, jpeg_quality);
        encoder.encode(&buffer.data, w, h, color_type(channels))?;
    } else {
        image::save_buffer_with_format(path, &buffer.data, w, h, color_type(channels), format)?;
    }

    debug!("encoded {} as {:?}", path.display(), format);
    Ok(())
}

/// Decode → threshold → binarize → encode, as configured.
///
/// Writes the JSON report when `config.report_path` is set.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip_all, fields(image = %config.image_path))
)]
pub fn binarize_file(config: &BinarizeConfig) -> Result<BinarizeReport, CodecError> {
    let mut buffer = read_image(&config.image_path)?;
    let outcome = OtsuBinarizer::new(config.params.clone()).run(&mut buffer)?;

    let output_path = config.output_path();
    write_image(&buffer, &output_path, config.jpeg_quality)?;

    let report = BinarizeReport::new(
        config.image_path.clone(),
        output_path.to_string_lossy(),
        &buffer,
        &outcome,
    );
    if let Some(report_path) = &config.report_path {
        report.write_json(report_path)?;
        info!("report written to {report_path}");
    }
    info!(
        "{} -> {} (threshold {})",
        config.image_path,
        output_path.display(),
        outcome.threshold.get()
    );
    Ok(report)
}
