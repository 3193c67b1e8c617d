use std::borrow::Borrow;

use log::{debug, trace};

use super::{dest_coord, BlitStats, GlyphClip};
use crate::{
    error::BlitError,
    frame::{copy_frame, RgbaFrame, RGBA_BYTES_PER_PIXEL},
    glyph::GlyphImage,
};

/// Fixed-point "over": `(k * src + (255 - k) * dst) / 255`, truncating.
#[inline]
pub fn blend_channel(dst: u8, src: u8, k: u32) -> u8 {
    ((k * src as u32 + (255 - k) * dst as u32) / 255) as u8
}

/// Snapshots `frame` into `frame_copy`, then paints every glyph over the
/// frame in list order.
///
/// Each covered pixel gets the glyph color weighted by
/// `coverage * opacity / 255` and its fourth channel set to 255. Pixels
/// that fall outside the frame are skipped. Both buffers are checked before
/// anything is written.
pub fn render_rgba<'b, I>(
    frame: &mut RgbaFrame<'_>,
    frame_copy: &mut [u8],
    glyphs: I,
) -> Result<BlitStats, BlitError>
where
    I: IntoIterator,
    I::Item: Borrow<GlyphImage<'b>>,
{
    if frame_copy.len() != frame.data.len() {
        return Err(BlitError::SnapshotSize {
            expected: frame.data.len(),
            actual: frame_copy.len(),
        });
    }
    copy_frame(frame.data, frame_copy)?;

    let mut stats = BlitStats::default();
    for glyph in glyphs {
        let glyph: &GlyphImage<'b> = glyph.borrow();
        let clip = GlyphClip::new(glyph, frame.width, frame.height);
        stats.record(glyph, &clip);
        trace!(
            "rgba glyph {}x{} at ({}, {}) kind {:?}: {} of {} pixels visible",
            glyph.width(),
            glyph.height(),
            glyph.dst_x(),
            glyph.dst_y(),
            glyph.kind(),
            clip.area(),
            glyph.width() * glyph.height()
        );
        composite_glyph(frame, glyph, &clip);
    }

    debug!(
        "render_rgba {}x{}: {} glyphs, {} pixels written, {} clipped",
        frame.width, frame.height, stats.glyphs, stats.pixels_written, stats.pixels_clipped
    );
    Ok(stats)
}

fn composite_glyph(frame: &mut RgbaFrame<'_>, glyph: &GlyphImage<'_>, clip: &GlyphClip) {
    let color = glyph.color();
    let opacity = color.opacity();
    let [b, g, r] = color.bgr();

    for y in clip.ys.clone() {
        let row = glyph.row(y);
        let dest_y = dest_coord(glyph.dst_y(), y);
        for x in clip.xs.clone() {
            let dest_x = dest_coord(glyph.dst_x(), x);
            let idx = (dest_y * frame.width + dest_x) * RGBA_BYTES_PER_PIXEL;
            let pixel = &mut frame.data[idx..idx + RGBA_BYTES_PER_PIXEL];

            let k = row[x] as u32 * opacity / 255;
            pixel[0] = blend_channel(pixel[0], b, k);
            pixel[1] = blend_channel(pixel[1], g, k);
            pixel[2] = blend_channel(pixel[2], r, k);
            pixel[3] = 255;
        }
    }
}
