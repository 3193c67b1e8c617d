//! Glyph compositing onto caller-owned frames.
//!
//! Two independent operations share the same glyph descriptor:
//! [`render_rgba`] paints each glyph's solid color over a packed RGBA frame
//! using integer "over" math, and [`render_alpha`] merges glyph coverage into
//! a single-channel frame as a coverage union. Glyphs are painted in list
//! order, so later glyphs land on top.

pub mod alpha;
pub mod rgba;

use std::ops::Range;

use crate::glyph::GlyphImage;

pub use alpha::{blend_coverage, render_alpha};
pub use rgba::{blend_channel, render_rgba};

/// What a render call touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlitStats {
    /// Glyphs visited, including ones that were entirely off-frame.
    pub glyphs: usize,
    pub pixels_written: usize,
    /// Source pixels dropped because they fell outside the frame.
    pub pixels_clipped: usize,
}

impl BlitStats {
    fn record(&mut self, glyph: &GlyphImage<'_>, clip: &GlyphClip) {
        let area = glyph.width() * glyph.height();
        let visible = clip.area();
        self.glyphs += 1;
        self.pixels_written += visible;
        self.pixels_clipped += area - visible;
    }
}

/// Source rows/columns of a glyph that land inside a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GlyphClip {
    pub xs: Range<usize>,
    pub ys: Range<usize>,
}

impl GlyphClip {
    pub fn new(glyph: &GlyphImage<'_>, frame_width: usize, frame_height: usize) -> GlyphClip {
        GlyphClip {
            xs: visible_span(glyph.dst_x(), glyph.width(), frame_width),
            ys: visible_span(glyph.dst_y(), glyph.height(), frame_height),
        }
    }

    pub fn area(&self) -> usize {
        self.xs.len() * self.ys.len()
    }
}

/// Source indices `i` in `0..len` with `offset + i` inside `0..limit`.
fn visible_span(offset: i32, len: usize, limit: usize) -> Range<usize> {
    let offset = offset as i64;
    let start = (-offset).clamp(0, len as i64);
    let end = (limit as i64 - offset).clamp(start, len as i64);
    start as usize..end as usize
}

/// Destination coordinate of source index `i`. Only called for indices
/// inside a [`GlyphClip`], so the result is never negative.
#[inline]
pub(crate) fn dest_coord(offset: i32, i: usize) -> usize {
    (offset as i64 + i as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_span_inside() {
        assert_eq!(visible_span(2, 3, 10), 0..3);
    }

    #[test]
    fn test_visible_span_clips_both_ends() {
        assert_eq!(visible_span(-2, 5, 10), 2..5);
        assert_eq!(visible_span(8, 5, 10), 0..2);
        assert_eq!(visible_span(-2, 10, 4), 2..6);
    }

    #[test]
    fn test_visible_span_fully_outside() {
        assert!(visible_span(10, 5, 10).is_empty());
        assert!(visible_span(-5, 5, 10).is_empty());
        assert!(visible_span(i32::MIN, 5, 10).is_empty());
        assert!(visible_span(i32::MAX, 5, 10).is_empty());
        assert!(visible_span(0, 5, 0).is_empty());
    }

    #[test]
    fn test_stats_count_clipped_pixels() {
        let bitmap = [255u8; 6];
        let glyph = GlyphImage::new(3, 2, 3, &bitmap, 0u32, -1, 0).unwrap();
        let clip = GlyphClip::new(&glyph, 4, 1);
        let mut stats = BlitStats::default();
        stats.record(&glyph, &clip);
        assert_eq!(
            stats,
            BlitStats {
                glyphs: 1,
                pixels_written: 2,
                pixels_clipped: 4,
            }
        );
    }
}
