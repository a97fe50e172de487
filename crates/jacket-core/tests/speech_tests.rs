// Command listen window timing.

use jacket_core::ListenWindow;

#[test]
fn silence_closes_the_window_after_min() {
    let w = ListenWindow::new(10.0, 2.0, 5.0);
    assert!(!w.is_over(11.5, false));
    assert!(!w.is_over(12.0, false));
    assert!(w.is_over(12.5, false));
    assert_eq!(w.remaining(11.0, false), 1.0);
    assert_eq!(w.remaining(13.0, false), 0.0);
}

#[test]
fn speech_in_progress_runs_to_max() {
    let w = ListenWindow::new(10.0, 2.0, 5.0);
    assert!(!w.is_over(12.5, true));
    assert!(!w.is_over(15.0, true));
    assert!(w.is_over(15.5, true));
    assert_eq!(w.remaining(11.0, true), 4.0);
    assert_eq!(w.remaining(20.0, true), 0.0);
}

#[test]
fn max_caps_a_longer_min() {
    let w = ListenWindow::new(0.0, 6.0, 5.0);
    assert!(!w.is_over(4.0, false));
    assert!(w.is_over(5.5, false));
    assert!(w.is_over(5.5, true));
    assert_eq!(w.remaining(0.0, false), 5.0);
    assert_eq!(w.remaining(0.0, true), 5.0);
}
