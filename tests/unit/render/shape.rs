use super::*;

fn area(rects: &[Rect]) -> f64 {
    rects.iter().map(|r| r.area()).sum()
}

#[test]
fn eight_pixel_cells() {
    let frame = Rect::new(16.0, 8.0, 24.0, 16.0);

    let full = shape_rects(frame, ShapeLevel::Full);
    assert_eq!(full, vec![Rect::new(17.0, 9.0, 23.0, 15.0)]);

    let compact = shape_rects(frame, ShapeLevel::Compact);
    assert_eq!(
        compact,
        vec![
            Rect::new(17.0, 10.0, 23.0, 14.0),
            Rect::new(18.0, 9.0, 22.0, 10.0),
            Rect::new(18.0, 14.0, 22.0, 15.0),
        ]
    );

    let core = shape_rects(frame, ShapeLevel::Core);
    assert_eq!(core, vec![Rect::new(18.0, 10.0, 22.0, 14.0)]);
}

#[test]
fn shapes_shrink_from_full_to_core() {
    for size in [5.0, 6.0, 8.0, 12.0, 16.0] {
        let frame = Rect::new(0.0, 0.0, size, size);
        let full = area(&shape_rects(frame, ShapeLevel::Full));
        let compact = area(&shape_rects(frame, ShapeLevel::Compact));
        let core = area(&shape_rects(frame, ShapeLevel::Core));
        assert!(full > compact, "size {size}");
        assert!(compact > core, "size {size}");
    }
}

#[test]
fn shapes_stay_inside_the_frame() {
    for size in [5.0, 7.0, 8.0, 11.0] {
        let frame = Rect::new(3.0, 5.0, 3.0 + size, 5.0 + size);
        for level in [ShapeLevel::Core, ShapeLevel::Compact, ShapeLevel::Full] {
            for r in shape_rects(frame, level) {
                assert!(r.x0 >= frame.x0 && r.x1 <= frame.x1);
                assert!(r.y0 >= frame.y0 && r.y1 <= frame.y1);
                assert!(r.area() > 0.0);
            }
        }
    }
}

#[test]
fn small_cells_use_a_two_pixel_core() {
    let core = shape_rects(Rect::new(0.0, 0.0, 6.0, 6.0), ShapeLevel::Core);
    assert_eq!(core, vec![Rect::new(2.0, 2.0, 4.0, 4.0)]);
}
