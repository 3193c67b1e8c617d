use std::borrow::Borrow;

use log::{debug, trace};

use super::{dest_coord, BlitStats, GlyphClip};
use crate::{error::BlitError, frame::AlphaFrame, glyph::GlyphImage};

/// Coverage union `1 - (1 - src) * (1 - dst)`, truncated back to a byte.
///
/// Evaluated in `f32` on the byte scale so that `src == 0` returns `dst`
/// and `src == 255` returns 255 exactly.
#[inline]
pub fn blend_coverage(dst: u8, src: u8) -> u8 {
    let uncovered = (255.0 - src as f32) * (255.0 - dst as f32) / 255.0;
    (255.0 - uncovered) as u8
}

/// Merges every glyph's coverage into a one-byte-per-pixel frame, in list
/// order. Glyph colors are ignored.
pub fn render_alpha<'b, I>(frame: &mut AlphaFrame<'_>, glyphs: I) -> Result<BlitStats, BlitError>
where
    I: IntoIterator,
    I::Item: Borrow<GlyphImage<'b>>,
{
    let mut stats = BlitStats::default();
    for glyph in glyphs {
        let glyph: &GlyphImage<'b> = glyph.borrow();
        let clip = GlyphClip::new(glyph, frame.width, frame.height);
        stats.record(glyph, &clip);
        trace!(
            "alpha glyph {}x{} at ({}, {}): {} pixels visible",
            glyph.width(),
            glyph.height(),
            glyph.dst_x(),
            glyph.dst_y(),
            clip.area()
        );

        for y in clip.ys.clone() {
            let row = glyph.row(y);
            let dest_row = dest_coord(glyph.dst_y(), y) * frame.width;
            for x in clip.xs.clone() {
                let dest = &mut frame.data[dest_row + dest_coord(glyph.dst_x(), x)];
                *dest = blend_coverage(*dest, row[x]);
            }
        }
    }

    debug!(
        "render_alpha {}x{}: {} glyphs, {} pixels written, {} clipped",
        frame.width, frame.height, stats.glyphs, stats.pixels_written, stats.pixels_clipped
    );
    Ok(stats)
}
