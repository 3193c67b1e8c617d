//! C entry points.
//!
//! `AssImage` mirrors libass' `ASS_Image` so a host can hand over the list
//! `ass_render_frame` returns without copying it. Every entry point checks
//! its arguments the same way the safe API does; since the signatures are
//! `void`, a rejected call is logged and leaves the buffers untouched.

use std::{os::raw::c_int, slice};

use log::{error, warn};

use crate::{
    compositor,
    error::BlitError,
    frame::{self, frame_len, AlphaFrame, RgbaFrame, ALPHA_BYTES_PER_PIXEL, RGBA_BYTES_PER_PIXEL},
    glyph::{required_bitmap_len, GlyphImage, GlyphKind},
};

/// One node of a libass image list.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct AssImage {
    pub w: c_int,
    pub h: c_int,
    pub stride: c_int,
    /// `stride * (h - 1) + w` coverage bytes.
    pub bitmap: *const u8,
    /// `0xRRGGBBAA`, `AA` is transparency.
    pub color: u32,
    pub dst_x: c_int,
    pub dst_y: c_int,
    pub next: *const AssImage,
    /// 0 character, 1 outline, 2 shadow. Kept as a plain int so tags from a
    /// newer libass don't produce an invalid enum value.
    pub kind: c_int,
}

impl AssImage {
    /// Borrows this node as a validated glyph view.
    ///
    /// # Safety
    ///
    /// `bitmap` must point to at least `stride * (h - 1) + w` readable bytes
    /// that stay alive and unmodified while the view is used, or the glyph
    /// must be empty.
    pub unsafe fn glyph(&self) -> Result<GlyphImage<'_>, BlitError> {
        let invalid = BlitError::InvalidGlyph {
            width: self.w,
            height: self.h,
            stride: self.stride,
        };
        if self.w < 0 || self.h < 0 || self.stride < 0 || (self.h > 1 && self.stride < self.w) {
            return Err(invalid);
        }

        let len = required_bitmap_len(self.w as usize, self.h as usize, self.stride as usize)
            .ok_or(invalid)?;
        let bitmap: &[u8] = if len == 0 {
            &[]
        } else if self.bitmap.is_null() {
            return Err(BlitError::NullPointer {
                what: "glyph bitmap",
            });
        } else {
            slice::from_raw_parts(self.bitmap, len)
        };

        Ok(GlyphImage::new(
            self.w,
            self.h,
            self.stride,
            bitmap,
            self.color,
            self.dst_x,
            self.dst_y,
        )?
        .with_kind(GlyphKind::from_raw(self.kind)))
    }
}

/// Walks a `next` chain front to back without taking ownership of it.
pub struct AssImageChain<'a> {
    next: Option<&'a AssImage>,
}

impl<'a> AssImageChain<'a> {
    /// # Safety
    ///
    /// `head` must be null or the start of a finite, acyclic chain of valid
    /// nodes that outlives `'a`.
    pub unsafe fn new(head: *const AssImage) -> AssImageChain<'a> {
        AssImageChain { next: head.as_ref() }
    }

    /// Yields each node as a glyph view, skipping (and logging) malformed
    /// nodes instead of stopping the walk.
    pub fn glyphs(self) -> impl Iterator<Item = GlyphImage<'a>> {
        self.enumerate()
            .filter_map(|(index, image)| match unsafe { image.glyph() } {
                Ok(glyph) => Some(glyph),
                Err(err) => {
                    warn!("skipping image {} in chain: {}", index, err);
                    None
                }
            })
    }
}

impl<'a> Iterator for AssImageChain<'a> {
    type Item = &'a AssImage;

    fn next(&mut self) -> Option<&'a AssImage> {
        let current = self.next?;
        // `new` requires every node in the chain to be valid.
        self.next = unsafe { current.next.as_ref() };
        Some(current)
    }
}

/// Borrows `len` bytes at `ptr`, allowing null when `len` is zero.
unsafe fn bytes_mut<'a>(
    ptr: *mut u8,
    len: usize,
    what: &'static str,
) -> Result<&'a mut [u8], BlitError> {
    if len == 0 {
        Ok(&mut [])
    } else if ptr.is_null() {
        Err(BlitError::NullPointer { what })
    } else {
        Ok(slice::from_raw_parts_mut(ptr, len))
    }
}

unsafe fn try_render_rgba(
    frame_data: *mut u8,
    frame_copy: *mut u8,
    width: c_int,
    height: c_int,
    image: *const AssImage,
) -> Result<(), BlitError> {
    let len = frame_len(width as i64, height as i64, RGBA_BYTES_PER_PIXEL)?;
    let data = bytes_mut(frame_data, len, "frame")?;
    let copy = bytes_mut(frame_copy, len, "frame copy")?;
    let mut frame = RgbaFrame::new(data, width, height)?;
    compositor::render_rgba(&mut frame, copy, AssImageChain::new(image).glyphs())?;
    Ok(())
}

unsafe fn try_render_alpha(
    frame_data: *mut u8,
    width: c_int,
    height: c_int,
    image: *const AssImage,
) -> Result<(), BlitError> {
    let len = frame_len(width as i64, height as i64, ALPHA_BYTES_PER_PIXEL)?;
    let data = bytes_mut(frame_data, len, "frame")?;
    let mut frame = AlphaFrame::new(data, width, height)?;
    compositor::render_alpha(&mut frame, AssImageChain::new(image).glyphs())?;
    Ok(())
}

unsafe fn try_copy_frame(
    source: *const u8,
    destination: *mut u8,
    size: c_int,
) -> Result<(), BlitError> {
    let len = frame_len(size as i64, 1, 1)?;
    if len == 0 {
        return Ok(());
    }
    if source.is_null() {
        return Err(BlitError::NullPointer { what: "source" });
    }
    let destination = bytes_mut(destination, len, "destination")?;
    frame::copy_frame(slice::from_raw_parts(source, len), destination)
}

/// Copies the RGBA frame into `frame_copy`, then composites the image list
/// over `frame_data`.
///
/// # Safety
///
/// - `frame_data` and `frame_copy` must each point to `width * height * 4`
///   bytes and must not overlap. Either may be null only if that size is 0.
/// - `image` must be null or a valid, acyclic libass image list.
#[no_mangle]
pub unsafe extern "C" fn render_rgba(
    frame_data: *mut u8,
    frame_copy: *mut u8,
    width: c_int,
    height: c_int,
    image: *const AssImage,
) {
    if let Err(err) = try_render_rgba(frame_data, frame_copy, width, height, image) {
        error!("render_rgba rejected: {}", err);
    }
}

/// Merges the image list's coverage into a one-byte-per-pixel frame.
///
/// # Safety
///
/// - `frame_data` must point to `width * height` bytes (null only if 0).
/// - `image` must be null or a valid, acyclic libass image list.
#[no_mangle]
pub unsafe extern "C" fn render_alpha(
    frame_data: *mut u8,
    width: c_int,
    height: c_int,
    image: *const AssImage,
) {
    if let Err(err) = try_render_alpha(frame_data, width, height, image) {
        error!("render_alpha rejected: {}", err);
    }
}

/// Copies `size` bytes from `source` to `destination`.
///
/// # Safety
///
/// Both pointers must cover `size` bytes and must not overlap.
#[no_mangle]
pub unsafe extern "C" fn copy_frame(source: *const u8, destination: *mut u8, size: c_int) {
    if let Err(err) = try_copy_frame(source, destination, size) {
        error!("copy_frame rejected: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use std::{mem, ptr};

    use super::*;

    fn node(w: c_int, h: c_int, bitmap: &[u8], color: u32, dst_x: c_int, dst_y: c_int) -> AssImage {
        AssImage {
            w,
            h,
            stride: w,
            bitmap: bitmap.as_ptr(),
            color,
            dst_x,
            dst_y,
            next: ptr::null(),
            kind: 0,
        }
    }

    #[test]
    fn test_layout_matches_ass_image() {
        #[cfg(target_pointer_width = "64")]
        {
            assert_eq!(mem::size_of::<AssImage>(), 56);
            assert_eq!(mem::align_of::<AssImage>(), 8);
        }
        #[cfg(target_pointer_width = "32")]
        assert_eq!(mem::size_of::<AssImage>(), 36);
    }

    #[test]
    fn test_chain_walks_in_order() {
        let bitmap = [255u8];
        let mut third = node(1, 1, &bitmap, 3, 0, 0);
        third.kind = 2;
        let mut second = node(1, 1, &bitmap, 2, 0, 0);
        second.next = &third;
        let mut first = node(1, 1, &bitmap, 1, 0, 0);
        first.next = &second;

        let colors: Vec<u32> = unsafe { AssImageChain::new(&first) }.map(|i| i.color).collect();
        assert_eq!(colors, [1, 2, 3]);

        let kinds: Vec<GlyphKind> = unsafe { AssImageChain::new(&first) }
            .glyphs()
            .map(|g| g.kind())
            .collect();
        assert_eq!(kinds, [GlyphKind::Fill, GlyphKind::Fill, GlyphKind::Shadow]);
    }

    #[test]
    fn test_null_chain_is_empty() {
        assert_eq!(unsafe { AssImageChain::new(ptr::null()) }.count(), 0);
    }

    #[test]
    fn test_malformed_node_is_skipped() {
        let bitmap = [255u8];
        let good = node(1, 1, &bitmap, 0, 0, 0);
        let mut bad = node(1, 1, &bitmap, 0, 0, 0);
        bad.bitmap = ptr::null();
        bad.next = &good;

        let glyphs: Vec<_> = unsafe { AssImageChain::new(&bad) }.glyphs().collect();
        assert_eq!(glyphs.len(), 1);
    }

    #[test]
    fn test_narrow_stride_rejected_before_bitmap_is_read() {
        // 4 rows of width 8 with stride 1: the bitmap is never long enough
        // for that geometry, so the node must be refused on its header alone.
        let bitmap = [255u8];
        let mut image = node(8, 4, &bitmap, 0, 0, 0);
        image.stride = 1;

        let err = unsafe { image.glyph() }.unwrap_err();
        assert_eq!(
            err,
            BlitError::InvalidGlyph {
                width: 8,
                height: 4,
                stride: 1
            }
        );
    }

    #[test]
    fn test_empty_glyph_accepts_null_bitmap() {
        let mut image = node(0, 4, &[], 0, 0, 0);
        image.bitmap = ptr::null();
        let glyph = unsafe { image.glyph() }.unwrap();
        assert!(glyph.is_empty());
    }

    #[test]
    fn test_render_rgba_rejects_null_frame() {
        let mut copy = vec![9u8; 4];
        unsafe { render_rgba(ptr::null_mut(), copy.as_mut_ptr(), 1, 1, ptr::null()) };
        assert_eq!(copy, [9, 9, 9, 9]);
    }

    #[test]
    fn test_render_alpha_rejects_negative_size() {
        let mut data = vec![7u8; 4];
        let bitmap = [255u8];
        let image = node(1, 1, &bitmap, 0, 0, 0);
        unsafe { render_alpha(data.as_mut_ptr(), -2, -2, &image) };
        assert_eq!(data, [7, 7, 7, 7]);
    }

    #[test]
    fn test_copy_frame_copies_bytes() {
        let source = [1u8, 2, 3];
        let mut destination = [0u8; 3];
        unsafe { copy_frame(source.as_ptr(), destination.as_mut_ptr(), 3) };
        assert_eq!(destination, source);

        unsafe { copy_frame(ptr::null(), ptr::null_mut(), 0) };
    }
}
