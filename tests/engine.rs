//! End-to-end behaviour of the public API: extraction cardinality,
//! distinctness, positions and harmony laws.

use image::{Rgba, RgbaImage};
use palette_harmony::{
    Color, ExtractionConfig, HarmonyMode, PaletteExtractor, PixelBuffer, build_palette,
    extract_dominant_colors, generate_harmony_ring, hsl_to_rgb, rgb_to_hex, rgb_to_hsl,
};
use pretty_assertions::assert_eq;

fn quadrants(size: u32, colors: [[u8; 3]; 4]) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        let idx = (y >= size / 2) as usize * 2 + (x >= size / 2) as usize;
        let [r, g, b] = colors[idx];
        Rgba([r, g, b, 255])
    })
}

// ============================================================================
// Conversions
// ============================================================================

#[test]
fn test_hex_is_seven_lowercase_chars() {
    for (r, g, b) in [(0, 0, 0), (255, 255, 255), (171, 205, 239), (16, 32, 64)] {
        let hex = rgb_to_hex(r, g, b);
        assert_eq!(hex.len(), 7);
        assert!(hex.starts_with('#'));
        assert!(hex[1..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}

#[test]
fn test_hsl_round_trip_on_grays() {
    for v in (0..=255u8).step_by(5) {
        let (h, s, l) = rgb_to_hsl(v, v, v);
        let (r, g, b) = hsl_to_rgb(h as f32, s as f32, l as f32);
        for channel in [r, g, b] {
            assert!((channel as i16 - v as i16).abs() <= 1, "gray {v} came back as {channel}");
        }
    }
}

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn test_red_blue_image_yields_both_colors_with_positions() {
    let img = RgbaImage::from_fn(4, 4, |_, y| {
        if y < 2 { Rgba([255, 0, 0, 255]) } else { Rgba([0, 0, 255, 255]) }
    });
    let buffer = PixelBuffer::from(&img);

    let colors = PaletteExtractor::new().with_seed(17).extract(&buffer, 2);

    let mut found: Vec<[u8; 3]> = colors.iter().map(Color::rgb).collect();
    found.sort();
    assert_eq!(found, vec![[0, 0, 255], [255, 0, 0]]);

    for color in &colors {
        let pos = color.position().expect("extracted colors carry a position");
        let pixel = img.get_pixel(pos.x, pos.y);
        assert_eq!([pixel[0], pixel[1], pixel[2]], color.rgb());
    }
}

#[test]
fn test_always_returns_k_colors() {
    let empty = PixelBuffer::empty();
    let solid = RgbaImage::from_pixel(50, 50, Rgba([90, 90, 90, 255]));
    let noisy = RgbaImage::from_fn(64, 48, |x, y| {
        Rgba([(x * 4) as u8, (y * 5) as u8, ((x ^ y) * 3) as u8, 255])
    });

    for k in 1..=8 {
        assert_eq!(extract_dominant_colors(&empty, k).len(), k);
        assert_eq!(extract_dominant_colors(&PixelBuffer::from(&solid), k).len(), k);
        assert_eq!(extract_dominant_colors(&PixelBuffer::from(&noisy), k).len(), k);
    }
}

#[test]
fn test_empty_image_fallback_is_gray_at_origin() {
    let colors = extract_dominant_colors(&PixelBuffer::empty(), 3);
    for color in colors {
        assert_eq!(color.hex(), "#808080");
        assert_eq!(color.position().map(|p| (p.x, p.y)), Some((0, 0)));
    }
}

#[test]
fn test_well_separated_colors_stay_apart() {
    let img = quadrants(
        64,
        [[230, 30, 30], [30, 200, 40], [20, 40, 220], [240, 240, 240]],
    );
    let buffer = PixelBuffer::from(&img);

    for seed in [1, 2, 3, 4, 5] {
        let colors = PaletteExtractor::new().with_seed(seed).extract(&buffer, 4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert!(a.distance(b) >= 60.0, "{a} and {b} are too close (seed {seed})");
            }
        }
    }
}

#[test]
fn test_single_color_image_has_no_duplicate_hexes() {
    let img = RgbaImage::from_pixel(40, 40, Rgba([20, 60, 100, 255]));
    let colors = PaletteExtractor::new()
        .with_seed(3)
        .extract(&PixelBuffer::from(&img), 4);

    let mut hexes: Vec<&str> = colors.iter().map(Color::hex).collect();
    hexes.sort();
    hexes.dedup();
    assert_eq!(hexes.len(), 4);
}

#[test]
fn test_custom_config_is_honoured() {
    let img = quadrants(32, [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 0]]);
    let config = ExtractionConfig {
        sample_stride: 1,
        iterations: 3,
        ..ExtractionConfig::default()
    };
    let extractor = PaletteExtractor::new().with_config(config.clone()).with_seed(8);
    assert_eq!(extractor.config(), &config);

    let mut found: Vec<[u8; 3]> = extractor
        .extract(&PixelBuffer::from(&img), 4)
        .iter()
        .map(Color::rgb)
        .collect();
    found.sort();
    assert_eq!(found, vec![[0, 0, 255], [0, 255, 0], [255, 0, 0], [255, 255, 0]]);
}

// ============================================================================
// Harmony
// ============================================================================

#[test]
fn test_complementary_hue_law() {
    let base = Color::from_rgb(0, 0, 255);
    for ring_count in 3..=12 {
        let ring = generate_harmony_ring(&base, ring_count, HarmonyMode::Complementary);
        assert_eq!(ring.len(), ring_count);
        for color in &ring {
            assert_eq!(color.hue(), (base.hue() + 180) % 360);
        }
    }
}

#[test]
fn test_complementary_hue_holds_up_to_rounding_on_dark_base() {
    let base: Color = "#001122".parse().unwrap();
    assert_eq!(base.hue(), 210);

    let ring = generate_harmony_ring(&base, 3, HarmonyMode::Complementary);
    assert!(ring.iter().any(|c| c.hex() == "#331a00"));
    for color in &ring {
        assert!(
            (color.hue() as i32 - 30).abs() <= 1,
            "{color} has hue {}",
            color.hue()
        );
    }
}

#[test]
fn test_triadic_hue_cycling() {
    let base = Color::from_rgb(0, 255, 0);
    let ring = generate_harmony_ring(&base, 6, HarmonyMode::Triadic);
    let offsets: Vec<u16> = ring
        .iter()
        .map(|c| (c.hue() + 360 - base.hue()) % 360)
        .collect();
    assert_eq!(offsets, vec![0, 120, 240, 0, 120, 240]);
}

#[test]
fn test_harmony_lightness_bounds_for_every_mode() {
    let bases = [
        Color::from_rgb(5, 5, 5),
        Color::from_rgb(250, 250, 250),
        Color::from_rgb(200, 120, 40),
    ];
    for base in &bases {
        for mode in HarmonyMode::ALL {
            for color in generate_harmony_ring(base, 12, mode) {
                assert!((10..=90).contains(&color.lightness()));
            }
        }
    }
}

#[test]
fn test_full_palette_order() {
    let img = quadrants(16, [[255, 0, 0], [255, 0, 0], [0, 0, 255], [0, 0, 255]]);
    let bases = PaletteExtractor::new()
        .with_seed(4)
        .extract(&PixelBuffer::from(&img), 2);
    let palette = build_palette(&bases, 4, HarmonyMode::Analogous);

    assert_eq!(palette.len(), 2 + 2 * 4);
    assert_eq!(&palette.colors()[..2], bases.as_slice());
    assert_eq!(
        &palette.colors()[2..6],
        generate_harmony_ring(&bases[0], 4, HarmonyMode::Analogous).as_slice()
    );
    assert_eq!(
        &palette.colors()[6..],
        generate_harmony_ring(&bases[1], 4, HarmonyMode::Analogous).as_slice()
    );
}
