//! Composites libass-style glyph bitmaps onto video frames.
//!
//! Each glyph is a coverage bitmap with one solid color and an offset into
//! the frame. [`render_rgba`] paints glyph colors over a packed RGBA frame
//! after snapshotting it, [`render_alpha`] merges glyph coverage into a
//! one-byte-per-pixel frame. Both clip to the frame and paint in list order.
//!
//! The same operations are exported for C hosts in [`ffi`] and for
//! JavaScript in [`js_api`].

pub mod compositor;
pub mod error;
pub mod ffi;
pub mod frame;
pub mod glyph;
pub mod js_api;
pub mod utils;

use utils::{init_logging, set_panic_hook};
use wasm_bindgen::prelude::*;

pub use compositor::{render_alpha, render_rgba, BlitStats};
pub use error::BlitError;
pub use frame::{copy_frame, AlphaFrame, RgbaFrame};
pub use glyph::{GlyphColor, GlyphImage, GlyphKind};

#[wasm_bindgen(start)]
pub fn main() {
    set_panic_hook();
    init_logging();
}
