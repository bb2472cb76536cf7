use super::*;
use crate::engine::reveal::PixelReveal;
use crate::foundation::core::{CellCoord, Rgba8};
use crate::glyph::display::HourFormat;
use crate::render::surface::RecordingSurface;

const OVERLAY: Rgba8 = Rgba8::rgb(255, 0, 0);

fn geometry() -> GridGeometry {
    GridGeometry::new(24, 28, CellCoord::new(1, 10), 8).unwrap()
}

fn face() -> ClockFace {
    let mut face = ClockFace::new(
        geometry(),
        GlyphFont::builtin(),
        &ClockConfig::default(),
        Rng64::new(7),
    )
    .unwrap();
    face.set_palette(Palette {
        digit_stroke: OVERLAY,
        ..Palette::dark()
    });
    face
}

fn run_pass(face: &mut ClockFace) -> u32 {
    let bound = face.timing().max_pass_ticks();
    for n in 1..=bound {
        if face.tick() {
            return n;
        }
    }
    panic!("pass did not complete within {bound} ticks");
}

#[test]
fn rejects_a_digit_region_outside_the_grid() {
    let g = GridGeometry::new(24, 28, CellCoord::new(3, 10), 8).unwrap();
    let err = ClockFace::new(g, GlyphFont::builtin(), &ClockConfig::default(), Rng64::new(1))
        .unwrap_err();
    assert!(matches!(err, crate::GridClockError::Layout(_)));
}

#[test]
fn set_display_reports_changes_only() {
    let mut f = face();
    let v: DisplayValue = "12:30".parse().unwrap();
    assert!(f.set_display(v));
    assert_eq!(f.phase(), PassPhase::Intro);
    assert!(!f.set_display(v));
    assert!(f.set_display(v.with_format(HourFormat::TwelveHour)));
    assert!(f.set_display("12:31".parse().unwrap()));
}

#[test]
fn pass_completes_and_stays_complete() {
    let mut f = face();
    f.set_display("12:30".parse().unwrap());
    run_pass(&mut f);
    assert_eq!(f.phase(), PassPhase::Complete);
    assert!(f.reveal().is_complete());
    for _ in 0..5 {
        assert!(f.tick());
    }
}

#[test]
fn render_draws_grid_then_overlay() {
    let mut f = face();
    f.set_display("12:30".parse().unwrap());
    run_pass(&mut f);

    let mut surface = RecordingSurface::new();
    f.render(&mut surface);
    assert_eq!(
        surface.calls().first(),
        Some(&crate::render::surface::DrawCall::Background(Rgba8::BLACK))
    );
    let resting = surface
        .shapes_in(f.palette().grid_stroke)
        .filter(|(_, level)| *level == ShapeLevel::Core)
        .count();
    assert!(resting >= geometry().cell_count());

    let overlay: Vec<_> = surface.shapes_in(OVERLAY).collect();
    assert_eq!(overlay.len(), f.reveal().all_pixels().count());
    for (px, (frame, level)) in f.reveal().all_pixels().zip(&overlay) {
        assert_eq!(*frame, geometry().cell_frame(px.cell().col, px.cell().row));
        let expected = match px.state() {
            PixelReveal::Pinned(_) => ShapeLevel::Core,
            PixelReveal::Latch(_) => ShapeLevel::Full,
        };
        assert_eq!(*level, expected);
    }
}

#[test]
fn overlay_is_empty_before_the_intro_ends() {
    let mut f = face();
    f.set_display("12:30".parse().unwrap());
    f.tick();
    let mut surface = RecordingSurface::new();
    f.render(&mut surface);
    assert_eq!(surface.shapes_in(OVERLAY).count(), 0);
}

#[test]
fn disabling_mid_pass_freezes_the_final_frame() {
    let mut f = face();
    f.set_display("12:30".parse().unwrap());
    for _ in 0..20 {
        f.tick();
    }
    f.set_enabled(false);
    assert!(!f.is_enabled());
    assert!(f.reveal().is_complete());

    let mut first = RecordingSurface::new();
    f.render(&mut first);
    for _ in 0..10 {
        assert!(f.tick());
    }
    let mut later = RecordingSurface::new();
    f.render(&mut later);
    assert_eq!(first.calls(), later.calls());
}

#[test]
fn display_change_while_disabled_draws_instantly() {
    let mut f = face();
    f.set_enabled(false);
    f.set_display("09:41".parse().unwrap());
    assert_eq!(f.phase(), PassPhase::Complete);
    assert!(f.reveal().all_pixels().all(|px| px.state().is_done()));
}

#[test]
fn enabling_restarts_the_pass() {
    let mut f = face();
    f.set_display("12:30".parse().unwrap());
    f.set_enabled(false);
    f.set_enabled(true);
    assert_eq!(f.phase(), PassPhase::Intro);
    assert!(!f.reveal().is_complete());
    run_pass(&mut f);
}

#[test]
fn replay_restarts_with_new_staggers() {
    let mut f = face();
    f.set_display("12:30".parse().unwrap());
    let before: Vec<i32> = f.background().cells().iter().map(|c| c.start_delay_ms()).collect();
    run_pass(&mut f);
    f.replay();
    assert_eq!(f.phase(), PassPhase::Intro);
    let after: Vec<i32> = f.background().cells().iter().map(|c| c.start_delay_ms()).collect();
    assert_ne!(before, after);
}

#[test]
fn render_frame_matches_the_grid_size() {
    let mut f = face();
    f.set_display("12:30".parse().unwrap());
    run_pass(&mut f);
    let frame = f.render_frame().unwrap();
    assert_eq!((frame.width, frame.height), geometry().pixel_size());
}

#[test]
fn render_frame_reports_oversized_surfaces() {
    let f = ClockFace::new(
        geometry().with_offset(i32::MAX, 0),
        GlyphFont::builtin(),
        &ClockConfig::default(),
        Rng64::new(7),
    )
    .unwrap();
    assert!(f.render_frame().is_err());
}
