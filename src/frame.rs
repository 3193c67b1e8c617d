//! Borrowed views over caller-owned frame buffers.
//!
//! Neither view allocates or resizes; both check the buffer length against
//! the frame dimensions up front so compositing never has to.

use image::{GrayImage, RgbaImage};

use crate::error::BlitError;

pub const RGBA_BYTES_PER_PIXEL: usize = 4;
pub const ALPHA_BYTES_PER_PIXEL: usize = 1;

/// Byte size of a `width`x`height` frame at `bytes_per_pixel`.
pub fn frame_len(width: i64, height: i64, bytes_per_pixel: usize) -> Result<usize, BlitError> {
    let invalid = BlitError::InvalidDimensions { width, height };
    if width < 0 || height < 0 {
        return Err(invalid);
    }
    (width as u64)
        .checked_mul(height as u64)
        .and_then(|px| px.checked_mul(bytes_per_pixel as u64))
        .filter(|len| *len <= usize::MAX as u64)
        .map(|len| len as usize)
        .ok_or(invalid)
}

/// Packed 4-byte-per-pixel frame. Channels 0..3 hold blue, green, red and
/// an opacity byte that compositing forces to 255.
#[derive(Debug)]
pub struct RgbaFrame<'a> {
    pub(crate) data: &'a mut [u8],
    pub(crate) width: usize,
    pub(crate) height: usize,
}

impl<'a> RgbaFrame<'a> {
    pub fn new(data: &'a mut [u8], width: i32, height: i32) -> Result<RgbaFrame<'a>, BlitError> {
        let expected = frame_len(width as i64, height as i64, RGBA_BYTES_PER_PIXEL)?;
        if data.len() != expected {
            return Err(BlitError::FrameSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(RgbaFrame {
            data,
            width: width as usize,
            height: height as usize,
        })
    }

    /// Borrows an `image` buffer. Its bytes are used as-is, so a frame
    /// laid out as BGRA gets the blue channel first.
    pub fn from_image(image: &'a mut RgbaImage) -> RgbaFrame<'a> {
        let (width, height) = image.dimensions();
        RgbaFrame {
            width: width as usize,
            height: height as usize,
            data: image,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * self.width + x) * RGBA_BYTES_PER_PIXEL;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// One coverage byte per pixel.
#[derive(Debug)]
pub struct AlphaFrame<'a> {
    pub(crate) data: &'a mut [u8],
    pub(crate) width: usize,
    pub(crate) height: usize,
}

impl<'a> AlphaFrame<'a> {
    pub fn new(data: &'a mut [u8], width: i32, height: i32) -> Result<AlphaFrame<'a>, BlitError> {
        let expected = frame_len(width as i64, height as i64, ALPHA_BYTES_PER_PIXEL)?;
        if data.len() != expected {
            return Err(BlitError::FrameSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(AlphaFrame {
            data,
            width: width as usize,
            height: height as usize,
        })
    }

    pub fn from_luma(image: &'a mut GrayImage) -> AlphaFrame<'a> {
        let (width, height) = image.dimensions();
        AlphaFrame {
            width: width as usize,
            height: height as usize,
            data: image,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

/// Plain byte copy with no format assumptions.
pub fn copy_frame(source: &[u8], destination: &mut [u8]) -> Result<(), BlitError> {
    if source.len() != destination.len() {
        return Err(BlitError::CopyLength {
            src_len: source.len(),
            dst_len: destination.len(),
        });
    }
    destination.copy_from_slice(source);
    Ok(())
}
