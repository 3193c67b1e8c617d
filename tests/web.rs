//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use subblit::js_api::{copy_frame, render_alpha, render_rgba, JsGlyphList};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn render_rgba_from_js_list() {
    let mut list = JsGlyphList::new();
    assert!(list.push(1, 1, 1, vec![255], 0xFF00_0000, 1, 0, 0).is_ok());

    let mut frame = vec![0u8, 0, 0, 255, 0, 0, 0, 255];
    let mut copy = vec![0u8; 8];
    let stats = render_rgba(&mut frame, &mut copy, 2, 1, &list).ok().unwrap();

    assert_eq!(frame, [0, 0, 0, 255, 0, 0, 255, 255]);
    assert_eq!(copy, [0, 0, 0, 255, 0, 0, 0, 255]);
    assert_eq!(stats.pixels_written, 1);
}

#[wasm_bindgen_test]
fn render_alpha_from_js_list() {
    let mut list = JsGlyphList::new();
    assert!(list.push(2, 1, 2, vec![0, 255], 0, 0, 0, 1).is_ok());

    let mut frame = vec![100u8, 100];
    assert!(render_alpha(&mut frame, 2, 1, &list).is_ok());

    assert_eq!(frame, [100, 255]);
}

#[wasm_bindgen_test]
fn push_rejects_short_bitmap() {
    let mut list = JsGlyphList::new();
    assert!(list.push(2, 2, 2, vec![1, 2, 3], 0, 0, 0, 0).is_err());
    assert!(list.is_empty());
}

#[wasm_bindgen_test]
fn copy_frame_requires_equal_lengths() {
    let mut destination = vec![0u8; 3];
    assert!(copy_frame(&[1, 2, 3], &mut destination).is_ok());
    assert_eq!(destination, [1, 2, 3]);
    assert!(copy_frame(&[1, 2], &mut destination).is_err());
}
