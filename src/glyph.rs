use crate::error::BlitError;

/// Visual role of a glyph image. Carried through for callers that want to
/// pre-filter a list; blending treats every kind the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GlyphKind {
    #[default]
    Fill,
    Outline,
    Shadow,
    /// A tag this crate does not know about.
    Other(i32),
}

impl GlyphKind {
    pub const fn from_raw(raw: i32) -> GlyphKind {
        match raw {
            0 => GlyphKind::Fill,
            1 => GlyphKind::Outline,
            2 => GlyphKind::Shadow,
            n => GlyphKind::Other(n),
        }
    }

    pub const fn to_raw(self) -> i32 {
        match self {
            GlyphKind::Fill => 0,
            GlyphKind::Outline => 1,
            GlyphKind::Shadow => 2,
            GlyphKind::Other(n) => n,
        }
    }
}

/// Packed `0xRRGGBBAA` glyph color. The low byte is transparency,
/// so `0x00` is fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlyphColor(pub u32);

impl GlyphColor {
    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn transparency(self) -> u8 {
        self.0 as u8
    }

    /// Opacity multiplier in `[0, 255]`: `255 - (color & 0xFF)`.
    #[inline]
    pub const fn opacity(self) -> u32 {
        255 - (self.0 & 0xFF)
    }

    /// Color channels in destination order (blue, green, red).
    #[inline]
    pub const fn bgr(self) -> [u8; 3] {
        [self.blue(), self.green(), self.red()]
    }
}

impl From<u32> for GlyphColor {
    fn from(value: u32) -> Self {
        GlyphColor(value)
    }
}

/// Smallest bitmap that can back a `width`x`height` glyph. The last row
/// doesn't have to be padded out to `stride`.
pub fn required_bitmap_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }
    stride.checked_mul(height - 1)?.checked_add(width)
}

/// Borrowed, read-only view of one pre-rendered glyph: a coverage bitmap
/// plus a solid color and a placement offset in frame coordinates.
#[derive(Debug, Clone, Copy)]
pub struct GlyphImage<'a> {
    width: usize,
    height: usize,
    stride: usize,
    bitmap: &'a [u8],
    color: GlyphColor,
    dst_x: i32,
    dst_y: i32,
    kind: GlyphKind,
}

impl<'a> GlyphImage<'a> {
    /// Validates the geometry against the bitmap before anything can be
    /// drawn from it.
    pub fn new(
        width: i32,
        height: i32,
        stride: i32,
        bitmap: &'a [u8],
        color: impl Into<GlyphColor>,
        dst_x: i32,
        dst_y: i32,
    ) -> Result<GlyphImage<'a>, BlitError> {
        let invalid = BlitError::InvalidGlyph {
            width,
            height,
            stride,
        };
        if width < 0 || height < 0 || stride < 0 || (height > 1 && stride < width) {
            return Err(invalid);
        }

        let (w, h, s) = (width as usize, height as usize, stride as usize);
        let required = required_bitmap_len(w, h, s).ok_or(invalid)?;
        if bitmap.len() < required {
            return Err(BlitError::BitmapTooShort {
                required,
                actual: bitmap.len(),
            });
        }

        Ok(GlyphImage {
            width: w,
            height: h,
            stride: s,
            bitmap,
            color: color.into(),
            dst_x,
            dst_y,
            kind: GlyphKind::default(),
        })
    }

    pub fn with_kind(mut self, kind: GlyphKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn bitmap(&self) -> &'a [u8] {
        self.bitmap
    }

    pub fn color(&self) -> GlyphColor {
        self.color
    }

    pub fn dst_x(&self) -> i32 {
        self.dst_x
    }

    pub fn dst_y(&self) -> i32 {
        self.dst_y
    }

    pub fn kind(&self) -> GlyphKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage row `y`, exactly `width` bytes long.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.bitmap[start..start + self.width]
    }

    #[inline]
    pub fn coverage(&self, x: usize, y: usize) -> u8 {
        self.bitmap[y * self.stride + x]
    }
}
