//! Blit error types.

use thiserror::Error;

/// Caller contract violations, reported before any pixel is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlitError {
    /// Negative frame dimensions, or a byte size that does not fit in `usize`.
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("frame buffer is {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },

    #[error("snapshot buffer is {actual} bytes, expected {expected}")]
    SnapshotSize { expected: usize, actual: usize },

    /// Negative glyph size, or a stride narrower than the glyph.
    #[error("invalid glyph geometry: {width}x{height}, stride {stride}")]
    InvalidGlyph { width: i32, height: i32, stride: i32 },

    #[error("glyph bitmap is {actual} bytes, needs at least {required}")]
    BitmapTooShort { required: usize, actual: usize },

    /// A required pointer crossed the C boundary as null.
    #[error("null {what} pointer")]
    NullPointer { what: &'static str },

    #[error("copy length mismatch: source {src_len} bytes, destination {dst_len} bytes")]
    CopyLength { src_len: usize, dst_len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_error_displays_lengths() {
        let err = BlitError::FrameSize {
            expected: 16,
            actual: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("16"));
    }

    #[test]
    fn invalid_dimensions_displays_size() {
        let err = BlitError::InvalidDimensions {
            width: -1,
            height: 4,
        };
        assert_eq!(err.to_string(), "invalid frame dimensions -1x4");
    }
}
