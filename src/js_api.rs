use std::convert::TryFrom;

use wasm_bindgen::prelude::*;

use crate::{
    compositor::{self, BlitStats},
    error::BlitError,
    frame::{self, AlphaFrame, RgbaFrame},
    glyph::{GlyphImage, GlyphKind},
};

struct OwnedGlyph {
    width: i32,
    height: i32,
    stride: i32,
    bitmap: Vec<u8>,
    color: u32,
    dst_x: i32,
    dst_y: i32,
    kind: GlyphKind,
}

impl OwnedGlyph {
    fn view(&self) -> Result<GlyphImage<'_>, BlitError> {
        Ok(GlyphImage::new(
            self.width,
            self.height,
            self.stride,
            &self.bitmap,
            self.color,
            self.dst_x,
            self.dst_y,
        )?
        .with_kind(self.kind))
    }
}

/// Glyph list assembled on the JS side, e.g. from a libass wasm build's
/// image list. Glyphs are painted in push order.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsGlyphList {
    glyphs: Vec<OwnedGlyph>,
}

#[wasm_bindgen]
impl JsGlyphList {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsGlyphList {
        JsGlyphList::default()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn push(
        &mut self,
        width: i32,
        height: i32,
        stride: i32,
        bitmap: Vec<u8>,
        color: u32,
        dst_x: i32,
        dst_y: i32,
        kind: i32,
    ) -> Result<(), JsError> {
        self.try_push(OwnedGlyph {
            width,
            height,
            stride,
            bitmap,
            color,
            dst_x,
            dst_y,
            kind: GlyphKind::from_raw(kind),
        })?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn clear(&mut self) {
        self.glyphs.clear();
    }

    /// Drops every glyph of the given kind (0 fill, 1 outline, 2 shadow).
    #[wasm_bindgen(js_name = removeKind)]
    pub fn remove_kind(&mut self, kind: i32) {
        let kind = GlyphKind::from_raw(kind);
        self.glyphs.retain(|glyph| glyph.kind != kind);
    }
}

impl JsGlyphList {
    fn try_push(&mut self, glyph: OwnedGlyph) -> Result<(), BlitError> {
        glyph.view()?;
        self.glyphs.push(glyph);
        Ok(())
    }

    /// Every stored glyph passed validation in `try_push`.
    fn views(&self) -> impl Iterator<Item = GlyphImage<'_>> {
        self.glyphs.iter().filter_map(|glyph| glyph.view().ok())
    }
}

#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsBlitStats {
    pub glyphs: u32,
    pub pixels_written: u32,
    pub pixels_clipped: u32,
}

/// JS numbers only carry `u32` here; larger counts saturate.
fn saturating_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

impl From<BlitStats> for JsBlitStats {
    fn from(stats: BlitStats) -> Self {
        JsBlitStats {
            glyphs: saturating_u32(stats.glyphs),
            pixels_written: saturating_u32(stats.pixels_written),
            pixels_clipped: saturating_u32(stats.pixels_clipped),
        }
    }
}

fn render_rgba_inner(
    frame: &mut [u8],
    frame_copy: &mut [u8],
    width: i32,
    height: i32,
    glyphs: &JsGlyphList,
) -> Result<JsBlitStats, BlitError> {
    let mut frame = RgbaFrame::new(frame, width, height)?;
    Ok(compositor::render_rgba(&mut frame, frame_copy, glyphs.views())?.into())
}

fn render_alpha_inner(
    frame: &mut [u8],
    width: i32,
    height: i32,
    glyphs: &JsGlyphList,
) -> Result<JsBlitStats, BlitError> {
    let mut frame = AlphaFrame::new(frame, width, height)?;
    Ok(compositor::render_alpha(&mut frame, glyphs.views())?.into())
}

#[wasm_bindgen(js_name = renderRgba)]
pub fn render_rgba(
    frame: &mut [u8],
    frame_copy: &mut [u8],
    width: i32,
    height: i32,
    glyphs: &JsGlyphList,
) -> Result<JsBlitStats, JsError> {
    Ok(render_rgba_inner(frame, frame_copy, width, height, glyphs)?)
}

#[wasm_bindgen(js_name = renderAlpha)]
pub fn render_alpha(
    frame: &mut [u8],
    width: i32,
    height: i32,
    glyphs: &JsGlyphList,
) -> Result<JsBlitStats, JsError> {
    Ok(render_alpha_inner(frame, width, height, glyphs)?)
}

#[wasm_bindgen(js_name = copyFrame)]
pub fn copy_frame(source: &[u8], destination: &mut [u8]) -> Result<(), JsError> {
    frame::copy_frame(source, destination)?;
    Ok(())
}
