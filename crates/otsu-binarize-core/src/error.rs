/// Errors produced while validating or processing a pixel buffer.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinarizeError {
    #[error("unsupported channel count {channels} (expected 1 or 3)")]
    UnsupportedChannelCount { channels: usize },

    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid pixel buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },
}

impl BinarizeError {
    /// `true` for the empty/malformed buffer family (bad dimensions or length).
    pub fn is_malformed_buffer(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::InvalidBufferLength { .. }
        )
    }
}
