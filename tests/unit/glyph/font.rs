use super::*;

#[test]
fn builtin_font_is_valid() {
    let font = GlyphFont::builtin();
    font.validate().unwrap();
    assert_eq!(font.digit_width(), 4);
    assert_eq!(font.colon_width(), 2);
    assert_eq!(font.height(), 9);
    assert_eq!(font.span_cols(), 22);
}

#[test]
fn pixel_lookup_reads_msb_first() {
    let glyph = GlyphBitmap {
        width: 4,
        rows: vec![0b1000, 0b0001],
        pins: vec![0b1000, 0b0000],
    };
    assert_eq!(
        glyph_pixel(&glyph, 0, 0),
        GlyphPixel {
            lit: true,
            pinned: true
        }
    );
    assert!(!glyph_pixel(&glyph, 0, 3).lit);
    assert!(glyph_pixel(&glyph, 1, 3).lit);
    assert!(!glyph_pixel(&glyph, 1, 3).pinned);
}

#[test]
fn out_of_range_pixels_are_unlit() {
    let glyph = GlyphFont::builtin().glyph(GlyphId::COLON).clone();
    assert_eq!(glyph_pixel(&glyph, 0, 5), GlyphPixel::default());
    assert_eq!(glyph_pixel(&glyph, 40, 0), GlyphPixel::default());
}

#[test]
fn pins_on_unlit_pixels_are_ignored() {
    let glyph = GlyphBitmap {
        width: 2,
        rows: vec![0b01],
        pins: vec![0b11],
    };
    assert_eq!(glyph_pixel(&glyph, 0, 0), GlyphPixel::default());
    assert!(glyph_pixel(&glyph, 0, 1).pinned);
}

#[test]
fn lit_pixels_enumerates_every_set_bit() {
    let font = GlyphFont::builtin();
    let eight = font.glyph(GlyphId::digit(8).unwrap());
    let expected: u32 = eight.rows.iter().map(|m| m.count_ones()).sum();
    assert_eq!(eight.lit_pixels().count() as u32, expected);
}

#[test]
fn digit_ids_stop_at_nine() {
    assert!(GlyphId::digit(9).is_some());
    assert!(GlyphId::digit(10).is_none());
    assert!(GlyphId::COLON.is_colon());
}

#[test]
fn font_rejects_wrong_glyph_count_and_heights() {
    assert!(GlyphFont::new(1, vec![]).is_err());

    let mut glyphs: Vec<GlyphBitmap> = (0..=9)
        .map(|d| GlyphFont::builtin().glyph(GlyphId::digit(d).unwrap()).clone())
        .collect();
    glyphs.push(GlyphBitmap {
        width: 2,
        rows: vec![3; 4],
        pins: vec![],
    });
    assert!(GlyphFont::new(1, glyphs).is_err());
}

#[test]
fn font_json_roundtrip_preserves_metrics() {
    let json = serde_json::to_string(&GlyphFont::builtin()).unwrap();
    let font = GlyphFont::from_json_str(&json).unwrap();
    assert_eq!(font, GlyphFont::builtin());
}
