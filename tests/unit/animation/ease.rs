use super::*;

#[test]
fn endpoints_are_fixed() {
    for ease in [Ease::Linear, Ease::OutQuad, Ease::OutCubic, Ease::InOutCubic] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
    }
}

#[test]
fn out_cubic_matches_closed_form() {
    for i in 0..=20 {
        let t = i as f32 / 20.0;
        let expected = 1.0 - (1.0 - t).powi(3);
        assert!((Ease::OutCubic.apply(t) - expected).abs() < 1e-6);
    }
}

#[test]
fn input_is_clamped() {
    assert_eq!(Ease::OutCubic.apply(-3.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(7.5), 1.0);
    assert_eq!(Ease::Linear.apply(f32::NAN), 0.0);
}

#[test]
fn out_cubic_is_monotonic() {
    let mut prev = 0.0;
    for i in 0..=100 {
        let v = Ease::OutCubic.apply(i as f32 / 100.0);
        assert!(v >= prev);
        prev = v;
    }
}
