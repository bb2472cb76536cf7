use super::*;
use crate::config::ClockConfig;
use crate::foundation::core::CellCoord;
use crate::foundation::math::Rng64;
use crate::glyph::font::GlyphFont;
use crate::layout::grid::GridGeometry;

fn face() -> ClockFace {
    let geometry = GridGeometry::new(25, 28, CellCoord::new(1, 9), 8).unwrap();
    ClockFace::new(
        geometry,
        GlyphFont::builtin(),
        &ClockConfig::default(),
        Rng64::new(42),
    )
    .unwrap()
}

#[test]
fn restart_keeps_exactly_one_callback_pending() {
    let mut f = face();
    let mut d = FrameDriver::new(ManualTimer::new());
    d.restart(&mut f);
    let first = d.pending().unwrap();
    d.restart(&mut f);
    let second = d.pending().unwrap();
    assert_ne!(first, second);
    assert_eq!(d.timer().pending_count(), 1);
}

#[test]
fn stale_callbacks_do_not_tick() {
    let mut f = face();
    let mut d = FrameDriver::new(ManualTimer::new());
    d.restart(&mut f);
    let old = d.pending().unwrap();
    d.restart(&mut f);
    assert_eq!(d.on_timer(&mut f, old), TimerOutcome::Stale);
    assert_eq!(d.ticks(), 0);
}

#[test]
fn advance_ticks_once_per_frame() {
    let mut f = face();
    let mut d = FrameDriver::new(ManualTimer::new());
    d.restart(&mut f);
    assert_eq!(d.advance(&mut f, 15), 0);
    assert_eq!(d.advance(&mut f, 1), 1);
    assert_eq!(d.advance(&mut f, 16 * 4), 4);
    assert_eq!(d.ticks(), 5);
    assert_eq!(d.timer().pending_count(), 1);
}

#[test]
fn chain_stops_when_the_pass_completes() {
    let mut f = face();
    let mut d = FrameDriver::new(ManualTimer::new());
    d.restart(&mut f);
    let bound = f.timing().max_pass_ticks();
    assert!(d.run_to_completion(&mut f, bound));
    assert_eq!(d.pending(), None);
    assert_eq!(d.timer().pending_count(), 0);
    assert_eq!(d.advance(&mut f, 1000), 0);
}

#[test]
fn disabling_cancels_and_enabling_restarts() {
    let mut f = face();
    let mut d = FrameDriver::new(ManualTimer::new());
    d.set_display(&mut f, "08:15".parse().unwrap());
    d.advance(&mut f, 160);
    d.set_enabled(&mut f, false);
    assert_eq!(d.pending(), None);
    assert_eq!(d.timer().pending_count(), 0);
    assert!(f.reveal().is_complete());

    d.set_enabled(&mut f, true);
    assert!(d.pending().is_some());
    assert_eq!(d.ticks(), 0);
}

#[test]
fn unchanged_display_keeps_the_chain() {
    let mut f = face();
    let mut d = FrameDriver::new(ManualTimer::new());
    let v: DisplayValue = "08:15".parse().unwrap();
    assert!(d.set_display(&mut f, v));
    d.advance(&mut f, 48);
    let pending = d.pending();
    assert!(!d.set_display(&mut f, v));
    assert_eq!(d.pending(), pending);
    assert_eq!(d.ticks(), 3);
}
