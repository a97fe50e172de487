// Animations driven frame by frame with a hand-advanced clock.

use jacket_core::config::NamesConfig;
use jacket_core::utils::lerp;
use jacket_core::{
    decompose, hsv_to_rgb, Animation, AudioSource, Color, ManualClock, MoodState, Setting, Stage,
    PULSE_MIN_FRACTION,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

const RED: Color = Color(0xFF0000);
const BLUE: Color = Color(0x0000FF);

fn stage_with(clock: &Arc<ManualClock>, audio: Option<Arc<dyn AudioSource>>, pixels: usize) -> Stage {
    let mood = Arc::new(MoodState::new(&NamesConfig::default()));
    Stage::new(mood, clock.clone(), audio, pixels)
}

fn stage(clock: &Arc<ManualClock>, pixels: usize) -> Stage {
    stage_with(clock, None, pixels)
}

fn frame<A: Animation>(anim: &mut A, pixels: usize) -> Option<Vec<Color>> {
    (0..pixels).map(|_| anim.next()).collect()
}

fn lit(frame: &[Color]) -> Vec<usize> {
    frame
        .iter()
        .enumerate()
        .filter(|(_, c)| **c != Color::BLACK)
        .map(|(i, _)| i)
        .collect()
}

struct CannedAudio(Vec<i16>);

impl AudioSource for CannedAudio {
    fn read(&self) -> jacket_core::Result<Option<Vec<i16>>> {
        Ok(Some(self.0.clone()))
    }

    fn last_read(&self) -> Option<Vec<i16>> {
        Some(self.0.clone())
    }
}

#[test]
fn idle_uses_current_hue_and_goes_dark_at_zero_brightness() {
    let clock = Arc::new(ManualClock::new(0.0));
    let stage = stage(&clock, 10);
    let mut idle = stage.idle();

    let f = frame(&mut idle, 10).unwrap();
    for c in &f {
        let (r, g, b) = decompose(*c);
        assert!(r > 0);
        assert_eq!((g, b), (0, 0));
    }

    stage.mood.set_hue(Setting::Value(120.0));
    let f = frame(&mut idle, 10).unwrap();
    assert!(f.iter().all(|c| decompose(*c).0 == 0 && decompose(*c).1 > 0));

    stage.mood.set_brightness(Setting::Value(0));
    clock.advance(0.3);
    let f = frame(&mut idle, 10).unwrap();
    assert!(f.iter().all(|c| *c == Color::BLACK));
}

#[test]
fn idle_single_light() {
    let clock = Arc::new(ManualClock::new(0.0));
    let mut idle = stage(&clock, 1).idle();
    assert!(frame(&mut idle, 3).is_some());
}

#[test]
fn pulse_frame_is_uniform() {
    let clock = Arc::new(ManualClock::new(0.0));
    let stage = stage(&clock, 6);
    let mut pulse = stage.pulse(80.0, 2.0);

    let max = stage.mood.brightness_intensity();
    let expected = hsv_to_rgb(80.0, 1.0, lerp(0.0, -1.0, 1.0, max, PULSE_MIN_FRACTION * max));
    assert_eq!(frame(&mut pulse, 6).unwrap(), vec![expected; 6]);

    clock.advance(0.1);
    let f = frame(&mut pulse, 6).unwrap();
    assert!(f.iter().all(|c| *c == f[0]));
}

#[test]
fn solid_is_constant_forever() {
    let clock = Arc::new(ManualClock::new(0.0));
    let mut solid = stage(&clock, 3).solid(RED);
    assert_eq!(frame(&mut solid, 100).unwrap(), vec![RED; 100]);
    assert_eq!(solid.name(), "solid");
}

#[test]
fn sparkle_is_reproducible_for_a_seed() {
    let clock = Arc::new(ManualClock::new(1.5));
    let stage = stage(&clock, 12);
    let mut a = stage.sparkle(&mut StdRng::seed_from_u64(7));
    let mut b = stage.sparkle(&mut StdRng::seed_from_u64(7));
    for _ in 0..5 {
        assert_eq!(frame(&mut a, 12), frame(&mut b, 12));
        clock.advance(0.05);
    }

    stage.mood.set_brightness(Setting::Value(0));
    assert!(frame(&mut a, 12).unwrap().iter().all(|c| *c == Color::BLACK));
}

#[test]
fn sweep_lights_at_most_two_with_dimmer_tail() {
    let clock = Arc::new(ManualClock::new(0.0));
    let stage = stage(&clock, 26);
    let mut sweep = stage.sweep();

    // At t = 0 the head is centered and the tail trails just behind it.
    let f = frame(&mut sweep, 26).unwrap();
    assert_eq!(lit(&f), vec![11, 13]);
    assert!(decompose(f[13]).0 > decompose(f[11]).0);

    for _ in 0..40 {
        clock.advance(0.037);
        let f = frame(&mut sweep, 26).unwrap();
        let on = lit(&f);
        assert!(!on.is_empty() && on.len() <= 2, "lit: {on:?}");
    }
}

#[test]
fn sweep_head_stays_on_the_strip_at_the_edge() {
    let clock = Arc::new(ManualClock::new(0.0));
    let stage = stage(&clock, 26);
    // Quarter period at happiness 0: the head sits at the far end.
    let f = stage.mood.happiness_frequency();
    clock.set(0.25 / f);
    let mut sweep = stage.sweep();
    let frame = frame(&mut sweep, 26).unwrap();
    assert!(lit(&frame).contains(&25));
}

#[test]
fn wink_lights_exactly_one_half() {
    let clock = Arc::new(ManualClock::new(0.0));
    let stage = stage(&clock, 10);
    for seed in 0..8 {
        let mut wink = stage.wink(&mut StdRng::seed_from_u64(seed));
        let left_on = wink.left_on();
        let f = frame(&mut wink, 10).unwrap();
        let expected: Vec<usize> = if left_on { (0..5).collect() } else { (5..10).collect() };
        assert_eq!(lit(&f), expected);
    }
}

#[test]
fn spectrum_lights_the_matching_bin() {
    let pixels = 26;
    // Period of four samples: bin 13 of a 52-point transform, shown on light 12.
    let samples: Vec<i16> = (0..2 * pixels)
        .map(|t| [10_000, 0, -10_000, 0][t % 4])
        .collect();
    let clock = Arc::new(ManualClock::new(0.0));
    let audio: Arc<dyn AudioSource> = Arc::new(CannedAudio(samples));
    let stage = stage_with(&clock, Some(audio), pixels);
    let mut spectrum = stage.spectrum();

    let f = frame(&mut spectrum, pixels).unwrap();
    let hue = lerp(12.0, 0.0, pixels as f64, 0.0, 360.0);
    let max = stage.mood.brightness_intensity();
    assert_eq!(f[12], hsv_to_rgb(hue, 1.0, max));
    assert_eq!(lit(&f), vec![12]);
}

#[test]
fn spectrum_keeps_last_frame_without_enough_samples() {
    let clock = Arc::new(ManualClock::new(0.0));
    let stage = stage(&clock, 8);
    let mut spectrum = stage.spectrum();
    assert!(!spectrum.analyze(&[0; 15]));
    assert_eq!(frame(&mut spectrum, 8).unwrap(), vec![Color::BLACK; 8]);
    assert!(spectrum.analyze(&[0; 16]));
}

#[test]
fn duration_ends_after_deadline_and_stays_ended() {
    let clock = Arc::new(ManualClock::new(0.0));
    let stage = stage(&clock, 4);
    let mut d = stage.duration(0.01, stage.solid(RED));
    assert_eq!(d.deadline(), 0.01);
    assert_eq!(d.next(), Some(RED));
    clock.advance(0.02);
    assert_eq!(d.next(), None);
    clock.set(0.0);
    assert_eq!(d.next(), None);
}

#[test]
fn duration_with_real_time() {
    let clock = Arc::new(jacket_core::SystemClock::new());
    let mood = Arc::new(MoodState::new(&NamesConfig::default()));
    let stage = Stage::new(mood, clock, None, 4);
    let mut d = stage.duration(0.01, stage.solid(RED));
    std::thread::sleep(std::time::Duration::from_millis(20));
    assert_eq!(d.next(), None);
}

#[test]
fn duration_ends_with_its_inner_animation() {
    let clock = Arc::new(ManualClock::new(0.0));
    let stage = stage(&clock, 2);
    let inner = stage.duration(1.0, stage.solid(BLUE));
    let mut outer = stage.duration(10.0, inner);
    assert_eq!(outer.next(), Some(BLUE));
    clock.advance(2.0);
    assert_eq!(outer.next(), None);
}

#[test]
fn crossfade_phases() {
    let clock = Arc::new(ManualClock::new(0.0));
    let stage = stage(&clock, 4);
    let mut fade = stage.crossfade(1.0, 2.0, stage.solid(RED), stage.solid(BLUE));
    assert_eq!((fade.fade_start(), fade.end()), (1.0, 3.0));

    assert_eq!(frame(&mut fade, 4).unwrap(), vec![RED; 4]);

    clock.set(1.0);
    assert_eq!(frame(&mut fade, 4).unwrap(), vec![RED; 4]);

    clock.set(2.0);
    for c in frame(&mut fade, 4).unwrap() {
        let (r, g, b) = decompose(c);
        assert!((0..=255).contains(&r) && (0..=255).contains(&b));
        assert_eq!(g, 0);
        assert!(r > 0 && r < 255 && b > 0 && b < 255);
    }

    clock.set(3.0);
    assert_eq!(fade.next(), None);
    clock.set(2.0);
    assert_eq!(fade.next(), None);
}

#[test]
fn crossfade_decides_phase_once_per_frame() {
    let clock = Arc::new(ManualClock::new(0.0));
    let stage = stage(&clock, 4);
    let mut fade = stage.crossfade(1.0, 1.0, stage.solid(RED), stage.solid(BLUE));

    assert_eq!(fade.next(), Some(RED));
    clock.set(5.0);
    // The rest of the frame still holds; the end shows on the next frame.
    assert_eq!(
        (0..3).map(|_| fade.next()).collect::<Vec<_>>(),
        vec![Some(RED); 3]
    );
    assert_eq!(fade.next(), None);
}

#[test]
fn crossfade_ends_when_an_input_ends() {
    let clock = Arc::new(ManualClock::new(0.0));
    let stage = stage(&clock, 2);
    let first = stage.duration(0.0, stage.solid(RED));
    let mut fade = stage.crossfade(5.0, 5.0, first, stage.idle());
    assert_eq!(fade.next(), None);
}

#[test]
fn names() {
    let clock = Arc::new(ManualClock::new(0.0));
    let stage = stage(&clock, 4);
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(stage.idle().name(), "idle");
    assert_eq!(stage.pulse(0.0, 1.0).name(), "pulse");
    assert_eq!(stage.sparkle(&mut rng).name(), "sparkle");
    assert_eq!(stage.sweep().name(), "knight rider");
    assert_eq!(stage.spectrum().name(), "spectrum");
    assert_eq!(stage.wink(&mut rng).name(), "wink");
    assert_eq!(stage.duration(1.0, stage.idle()).name(), "duration");
    assert_eq!(
        stage.crossfade(1.0, 1.0, stage.idle(), stage.idle()).name(),
        "crossfade"
    );
}
