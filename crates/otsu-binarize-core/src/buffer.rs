//! Interleaved 8-bit pixel buffers.
//!
//! Samples are stored row-major with channels interleaved, so the sample for
//! channel `c` of pixel `(x, y)` lives at `(y * width + x) * channels + c`.

use crate::BinarizeError;
use serde::{Deserialize, Serialize};

/// Number of interleaved samples per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channels {
    Gray = 1,
    Rgb = 3,
}

impl Channels {
    /// Map a raw channel count to a supported layout.
    pub fn from_count(channels: usize) -> Result<Self, BinarizeError> {
        match channels {
            1 => Ok(Self::Gray),
            3 => Ok(Self::Rgb),
            _ => Err(BinarizeError::UnsupportedChannelCount { channels }),
        }
    }

    #[inline]
    pub fn count(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Channels {
    type Error = BinarizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::from_count(value)
    }
}

/// Borrowed view over an interleaved pixel buffer.
#[derive(Clone, Copy, Debug)]
pub struct PixelBufferView<'a> {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: &'a [u8], // row-major, len = w*h*c
}

impl PixelBufferView<'_> {
    /// Check the shape invariants and return the validated channel layout.
    ///
    /// Channel count is checked first, then dimensions, then the exact
    /// buffer length.
    pub fn validate(&self) -> Result<Channels, BinarizeError> {
        validate_shape(self.width, self.height, self.channels, self.data.len())
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// Owned interleaved pixel buffer, as produced and consumed by the codec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Build a buffer, rejecting any shape that violates
    /// `data.len() == width * height * channels`.
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, BinarizeError> {
        validate_shape(width, height, channels, data.len())?;
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Single-channel buffer.
    pub fn gray(width: usize, height: usize, data: Vec<u8>) -> Result<Self, BinarizeError> {
        Self::new(width, height, Channels::Gray.count(), data)
    }

    /// Three-channel RGB buffer.
    pub fn rgb(width: usize, height: usize, data: Vec<u8>) -> Result<Self, BinarizeError> {
        Self::new(width, height, Channels::Rgb.count(), data)
    }

    pub fn view(&self) -> PixelBufferView<'_> {
        PixelBufferView {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: &self.data,
        }
    }

    pub fn validate(&self) -> Result<Channels, BinarizeError> {
        self.view().validate()
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Index of channel `channel` of pixel `(x, y)` in `data`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize, channel: usize) -> usize {
        debug_assert!(x < self.width, "x={x} out of bounds (width={})", self.width);
        debug_assert!(y < self.height, "y={y} out of bounds (height={})", self.height);
        debug_assert!(
            channel < self.channels,
            "channel={channel} out of bounds (channels={})",
            self.channels
        );
        (y * self.width + x) * self.channels + channel
    }

    /// All channel samples of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = self.offset(x, y, 0);
        &self.data[start..start + self.channels]
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

fn validate_shape(
    width: usize,
    height: usize,
    channels: usize,
    len: usize,
) -> Result<Channels, BinarizeError> {
    let layout = Channels::from_count(channels)?;
    if width == 0 || height == 0 {
        return Err(BinarizeError::InvalidDimensions { width, height });
    }
    let Some(expected) = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
    else {
        return Err(BinarizeError::InvalidDimensions { width, height });
    };
    if len != expected {
        return Err(BinarizeError::InvalidBufferLength { expected, got: len });
    }
    Ok(layout)
}
