use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn range_stays_inside_bounds() {
    let mut rng = Rng64::new(7);
    let mut seen_min = false;
    let mut seen_max = false;
    for _ in 0..2000 {
        let v = rng.range_i32(0, 5);
        assert!((0..=5).contains(&v));
        seen_min |= v == 0;
        seen_max |= v == 5;
    }
    assert!(seen_min && seen_max);
}

#[test]
fn empty_or_inverted_range_returns_min() {
    let mut rng = Rng64::new(1);
    assert_eq!(rng.range_i32(40, 40), 40);
    assert_eq!(rng.range_i32(40, 10), 40);
}

#[test]
fn percent_rolls_respect_extremes() {
    let mut rng = Rng64::new(99);
    for _ in 0..200 {
        assert!(!rng.roll_percent(0));
        assert!(rng.roll_percent(100));
        assert!(rng.roll_percent(250));
    }
}

#[test]
fn unit_floats_are_half_open() {
    let mut rng = Rng64::new(3);
    for _ in 0..1000 {
        let v = rng.next_f64_01();
        assert!((0.0..1.0).contains(&v));
    }
}
