use super::*;

#[test]
fn reference_grid_is_unscaled() {
    let cfg = TimingConfig::default();
    let t = cfg.resolve(25 * 28);
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.cell_anim_ms, 1300);
    assert_eq!(t.stagger_max_ms, 420);
    assert_eq!(t.activation_duration_ms, 520);
    assert_eq!(t.intro_delay_ms, 120);
    assert_eq!(t.frame_ms, 16);
}

#[test]
fn smaller_grids_run_slower_per_cell() {
    let cfg = TimingConfig::default();
    let t = cfg.resolve(24 * 28);
    assert!(t.scale > 1.0);
    assert_eq!(t.intro_delay_ms, 125);
    assert_eq!(t.frame_ms, 16);
    assert!(t.cell_anim_ms > 1300);
}

#[test]
fn zero_durations_stay_zero_and_tiny_ones_floor_at_one() {
    let cfg = TimingConfig {
        stagger_min_ms: 0,
        intro_delay_ms: 1,
        ..TimingConfig::default()
    };
    let t = cfg.resolve(35 * 40);
    assert_eq!(t.stagger_min_ms, 0);
    assert_eq!(t.intro_delay_ms, 1);
}

#[test]
fn inverted_stagger_is_clamped_up() {
    let cfg = TimingConfig {
        stagger_min_ms: 300,
        stagger_max_ms: 100,
        scale_with_grid: false,
        ..TimingConfig::default()
    };
    let t = cfg.resolve(1);
    assert_eq!(t.stagger_min_ms, 300);
    assert_eq!(t.stagger_max_ms, 300);
}

#[test]
fn thresholds_are_clamped_and_ordered() {
    let cfg = TimingConfig {
        digit_compact_threshold: 0.8,
        digit_full_threshold: 0.2,
        frame_ms: 0,
        cell_anim_ms: 0,
        active_percent: 400,
        ..TimingConfig::default()
    };
    let t = cfg.resolve(700);
    assert_eq!(t.digit_compact_threshold, 0.8);
    assert_eq!(t.digit_full_threshold, 0.8);
    assert_eq!(t.frame_ms, 1);
    assert_eq!(t.cell_anim_ms, 1);
    assert_eq!(t.active_percent, 100);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let cfg = ClockConfig::from_json_str(r#"{"timing": {"intro_delay_ms": 40}, "theme": "light"}"#)
        .unwrap();
    assert_eq!(cfg.timing.intro_delay_ms, 40);
    assert_eq!(cfg.timing.cell_anim_ms, 1300);
    assert_eq!(cfg.theme, Theme::Light);
}

#[test]
fn missing_config_file_is_a_config_error() {
    let err = ClockConfig::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, GridClockError::Config(_)));
}
