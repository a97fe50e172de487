// Mood state: clamping, wrapping, name lookups, derived parameters.

use jacket_core::config::NamesConfig;
use jacket_core::state::wrap_hue;
use jacket_core::{MoodSnapshot, MoodState, Setting};
use std::sync::Arc;
use std::thread;

fn mood() -> MoodState {
    MoodState::new(&NamesConfig::default())
}

#[test]
fn defaults() {
    let m = mood();
    assert_eq!(m.snapshot(), MoodSnapshot::default());
    assert_eq!(m.happiness(), 0);
    assert_eq!(m.brightness(), 2);
    assert_eq!(m.hue(), 0.0);
}

#[test]
fn happiness_clamps() {
    let m = mood();
    assert_eq!(m.set_happiness(Setting::Value(10)), 3);
    assert_eq!(m.set_happiness(Setting::Value(-10)), -3);
    assert_eq!(m.adjust_happiness(-1), -3);
    assert_eq!(m.adjust_happiness(i32::MAX), 3);
    assert_eq!(m.set_happiness(Setting::Clear), 0);
}

#[test]
fn happiness_by_name() {
    let m = mood();
    assert_eq!(m.set_happiness(Setting::Named("ecstatic")), 3);
    assert_eq!(m.set_happiness(Setting::Named("grumpy")), 3);
    assert_eq!(m.set_happiness(Setting::Named("glum")), -1);
}

#[test]
fn brightness_clamps_and_names() {
    let m = mood();
    assert_eq!(m.set_brightness(Setting::Value(7)), 3);
    assert_eq!(m.set_brightness(Setting::Value(-2)), 0);
    assert_eq!(m.set_brightness(Setting::Named("medium")), 2);
    assert_eq!(m.set_brightness(Setting::Named("blinding")), 2);
    assert_eq!(m.adjust_brightness(5), 3);
    assert_eq!(m.adjust_brightness(-1), 2);
}

#[test]
fn hue_wraps() {
    let m = mood();
    assert_eq!(m.set_hue(Setting::Value(720.0)), 0.0);
    assert_eq!(m.set_hue(Setting::Value(-90.0)), 270.0);
    assert_eq!(m.set_hue(Setting::Named("green")), 120.0);
    assert_eq!(m.set_hue(Setting::Named("chartreuse")), 120.0);
    assert_eq!(m.advance_hue(300.0), 60.0);
    assert_eq!(m.set_hue(Setting::Clear), 0.0);
}

#[test]
fn wrap_hue_stays_below_full_circle() {
    assert_eq!(wrap_hue(360.0), 0.0);
    assert_eq!(wrap_hue(-1e-20), 0.0);
    assert_eq!(wrap_hue(f64::NAN), 0.0);
    assert!((wrap_hue(725.5) - 5.5).abs() < 1e-9);
}

#[test]
fn derived_parameters() {
    let m = mood();
    m.set_happiness(Setting::Value(-3));
    assert!((m.happiness_frequency() - 0.25).abs() < 1e-12);
    m.set_happiness(Setting::Value(3));
    assert!((m.happiness_frequency() - 2.0).abs() < 1e-12);

    m.set_brightness(Setting::Value(0));
    assert_eq!(m.brightness_intensity(), 0.0);
    m.set_brightness(Setting::Value(3));
    assert!((m.brightness_intensity() - 1.0).abs() < 1e-12);
}

#[test]
fn out_of_range_name_tables_are_clamped() {
    let mut names = NamesConfig::default();
    names.brightness.insert("eleven".into(), 11);
    let m = MoodState::new(&names);
    assert_eq!(m.set_brightness(Setting::Named("eleven")), 3);
}

#[test]
fn concurrent_adjustments_stay_in_range() {
    let m = Arc::new(mood());
    let handles: Vec<_> = (0..4)
        .map(|k| {
            let m = m.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let delta = if k % 2 == 0 { 1 } else { -1 };
                    let h = m.adjust_happiness(delta);
                    assert!((-3..=3).contains(&h));
                    let b = m.adjust_brightness(-delta);
                    assert!((0..=3).contains(&b));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}
