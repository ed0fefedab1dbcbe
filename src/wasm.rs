//! JavaScript bindings.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::color::{self, Color};
use crate::error::PaletteError;
use crate::extract::PaletteExtractor;
use crate::harmony::{HarmonyMode, generate_harmony_ring, validate_ring_count};
use crate::sampler::PixelBuffer;

fn js_error(e: PaletteError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

fn color_to_js(color: &Color) -> Result<Object, JsValue> {
    let obj = Object::new();
    set(&obj, "hex", &JsValue::from_str(color.hex()))?;
    set(&obj, "r", &JsValue::from(color.red()))?;
    set(&obj, "g", &JsValue::from(color.green()))?;
    set(&obj, "b", &JsValue::from(color.blue()))?;
    set(&obj, "h", &JsValue::from(color.hue()))?;
    set(&obj, "s", &JsValue::from(color.saturation()))?;
    set(&obj, "l", &JsValue::from(color.lightness()))?;
    if let Some(position) = color.position() {
        let pos = Object::new();
        set(&pos, "x", &JsValue::from(position.x))?;
        set(&pos, "y", &JsValue::from(position.y))?;
        set(&obj, "position", &pos)?;
    }
    Ok(obj)
}

fn colors_to_js<'a>(colors: impl IntoIterator<Item = &'a Color>) -> Result<Array, JsValue> {
    let out = Array::new();
    for color in colors {
        let obj = color_to_js(color)?;
        out.push(&obj);
    }
    Ok(out)
}

/// Extract `n_colors` dominant colors from decoded RGBA pixels and expand each
/// into a harmony ring.
///
/// Returns `{ bases: Color[], palette: Color[] }` where `palette` lists the
/// bases followed by every ring.
#[wasm_bindgen(js_name = extractPalette)]
pub fn extract_palette(
    data: Vec<u8>,
    width: u32,
    height: u32,
    n_colors: usize,
    ring_count: usize,
    mode: &str,
    seed: Option<u64>,
) -> Result<Object, JsValue> {
    if n_colors == 0 {
        return Err(js_error(PaletteError::invalid_parameter("n_colors", n_colors)));
    }
    let ring_count = validate_ring_count(ring_count).map_err(js_error)?;
    let mode: HarmonyMode = mode.parse().map_err(js_error)?;
    let buffer = PixelBuffer::new(width, height, &data).map_err(js_error)?;

    let mut extractor = PaletteExtractor::new();
    if let Some(seed) = seed {
        extractor = extractor.with_seed(seed);
    }
    let palette = extractor.build_palette(&buffer, n_colors, ring_count, mode);

    let result = Object::new();
    let bases = colors_to_js(palette.bases())?;
    let colors = colors_to_js(&palette)?;
    set(&result, "bases", &bases)?;
    set(&result, "palette", &colors)?;
    set(&result, "mode", &JsValue::from_str(palette.mode().as_str()))?;
    Ok(result)
}

/// Hex strings of the harmony ring around `base_hex`.
#[wasm_bindgen(js_name = harmonyRing)]
pub fn harmony_ring(base_hex: &str, ring_count: usize, mode: &str) -> Result<Array, JsValue> {
    let base = Color::from_hex(base_hex).map_err(js_error)?;
    let ring_count = validate_ring_count(ring_count).map_err(js_error)?;
    let mode: HarmonyMode = mode.parse().map_err(js_error)?;

    let out = Array::new();
    for color in generate_harmony_ring(&base, ring_count, mode) {
        out.push(&JsValue::from_str(color.hex()));
    }
    Ok(out)
}

#[wasm_bindgen(js_name = rgbToHex)]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    color::rgb_to_hex(r, g, b)
}

/// `[h, s, l]`
#[wasm_bindgen(js_name = rgbToHsl)]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Vec<u16> {
    let (h, s, l) = color::rgb_to_hsl(r, g, b);
    vec![h, s as u16, l as u16]
}

/// `[r, g, b]`
#[wasm_bindgen(js_name = hslToRgb)]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec<u8> {
    let (r, g, b) = color::hsl_to_rgb(h, s, l);
    vec![r, g, b]
}
