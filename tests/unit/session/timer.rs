use super::*;

#[test]
fn fires_in_due_order() {
    let mut t = ManualTimer::new();
    let late = t.schedule_after(30);
    let early = t.schedule_after(10);
    assert_eq!(t.pending_count(), 2);
    assert!(t.advance(9).is_empty());
    assert_eq!(t.advance(1), vec![early]);
    assert_eq!(t.advance(100), vec![late]);
    assert_eq!(t.now_ms(), 110);
    assert_eq!(t.pending_count(), 0);
}

#[test]
fn cancelled_callbacks_never_fire() {
    let mut t = ManualTimer::new();
    let h = t.schedule_after(16);
    assert!(t.cancel(h));
    assert!(!t.cancel(h));
    assert!(t.advance(1000).is_empty());
}

#[test]
fn fire_next_jumps_the_clock() {
    let mut t = ManualTimer::new();
    assert_eq!(t.fire_next(), None);
    let h = t.schedule_after(16);
    assert_eq!(t.fire_next(), Some(h));
    assert_eq!(t.now_ms(), 16);
    assert!(!t.cancel(h));
}

#[test]
fn handles_are_unique() {
    let mut t = ManualTimer::new();
    let a = t.schedule_after(0);
    let b = t.schedule_after(0);
    assert_ne!(a, b);
    assert_eq!(t.advance(0), vec![a, b]);
}
