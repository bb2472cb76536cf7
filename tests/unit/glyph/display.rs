use super::*;

#[test]
fn parses_clock_strings() {
    let v: DisplayValue = "12:30".parse().unwrap();
    assert_eq!(v.slot(0), GlyphId::digit(1));
    assert_eq!(v.slot(1), GlyphId::digit(2));
    assert_eq!(v.slot(COLON_SLOT), Some(GlyphId::COLON));
    assert_eq!(v.slot(3), GlyphId::digit(3));
    assert_eq!(v.slot(4), GlyphId::digit(0));
    assert_eq!(v.slot(9), None);
}

#[test]
fn spaces_are_blank_slots() {
    let v: DisplayValue = " 9:05".parse().unwrap();
    assert_eq!(v.slot(0), None);
    assert_eq!(v.slot(1), GlyphId::digit(9));
}

#[test]
fn rejects_malformed_values() {
    assert!("1230".parse::<DisplayValue>().is_err());
    assert!("12-30".parse::<DisplayValue>().is_err());
    assert!("1a:30".parse::<DisplayValue>().is_err());
}

#[test]
fn from_digits_places_colon_and_blanks() {
    let v = DisplayValue::from_digits([None, Some(7), Some(4), Some(5)]).unwrap();
    assert_eq!(v, " 7:45".parse().unwrap());
    assert!(DisplayValue::from_digits([Some(12), None, None, None]).is_err());
}

#[test]
fn format_tag_distinguishes_equal_digits() {
    let a: DisplayValue = "10:30".parse().unwrap();
    let b = a.with_format(HourFormat::TwelveHour);
    assert_ne!(a, b);
    assert_eq!(a.slots(), b.slots());
}

#[test]
fn slot_origins_follow_widths_and_gaps() {
    let font = GlyphFont::builtin();
    let layout = SlotLayout::new(CellCoord::new(1, 10), &font);
    let cols: Vec<i32> = (0..SLOT_COUNT)
        .map(|s| layout.slot_origin(s).unwrap().col)
        .collect();
    assert_eq!(cols, vec![1, 6, 11, 14, 19]);
    assert_eq!(layout.slot_origin(0).unwrap().row, 10);
    assert!(layout.slot_origin(5).is_none());
}

#[test]
fn digit_mask_covers_exactly_the_lit_pixels() {
    let font = GlyphFont::builtin();
    let geometry = GridGeometry::new(24, 28, CellCoord::new(1, 10), 8).unwrap();
    let layout = SlotLayout::new(geometry.digit_origin(), &font);
    let display: DisplayValue = "12:30".parse().unwrap();

    let pixels = layout.placed_pixels(&display, &font);
    let mask = layout.digit_mask(&display, &font, &geometry);
    assert_eq!(mask.iter().filter(|&&m| m).count(), pixels.len());
    for px in &pixels {
        let idx = geometry.index(px.cell.col, px.cell.row).unwrap();
        assert!(mask[idx]);
    }
}

#[test]
fn blank_slots_contribute_no_pixels() {
    let font = GlyphFont::builtin();
    let layout = SlotLayout::new(CellCoord::new(0, 0), &font);
    let display: DisplayValue = " 1:  ".parse().unwrap();
    let pixels = layout.placed_pixels(&display, &font);
    assert!(pixels.iter().all(|p| p.slot == 1 || p.slot == COLON_SLOT));
}
