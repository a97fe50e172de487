use super::{Animation, FrameCursor, Stage};
use crate::color::{hsv_to_rgb, Color};
use crate::constants::{
    HUE_DEGREES, IDLE_MIN_FRACTION, LISTEN_PULSE_HUE, LISTEN_PULSE_HZ, PULSE_MIN_FRACTION,
};
use crate::utils::lerp;
use rand::Rng;
use std::f64::consts::{PI, TAU};

#[inline]
fn wave(freq_hz: f64, t: f64, phase: f64) -> f64 {
    (TAU * freq_hz * t + phase).sin()
}

/// Default flow: the current hue breathing between full and half intensity,
/// with the phase spread across the strip.
pub struct Idle {
    stage: Stage,
    cursor: FrameCursor,
    t: f64,
    freq_hz: f64,
    max_value: f64,
    hue: f64,
}

impl Idle {
    pub fn new(stage: Stage) -> Self {
        let cursor = FrameCursor::new(stage.pixels);
        Self {
            stage,
            cursor,
            t: 0.0,
            freq_hz: 0.0,
            max_value: 0.0,
            hue: 0.0,
        }
    }
}

impl Iterator for Idle {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        let i = self.cursor.step();
        if i == 0 {
            self.t = self.stage.now();
            self.freq_hz = self.stage.mood.happiness_frequency();
            self.max_value = self.stage.mood.brightness_intensity();
            self.hue = self.stage.mood.hue();
        }
        let n = self.cursor.pixels();
        let phase = if n > 1 {
            i as f64 / (n - 1) as f64 * TAU
        } else {
            0.0
        };
        let x = wave(self.freq_hz, self.t, phase);
        let min_value = IDLE_MIN_FRACTION * self.max_value;
        let value = lerp(x, -1.0, 1.0, self.max_value, min_value);
        Some(hsv_to_rgb(self.hue, 1.0, value))
    }
}

impl Animation for Idle {
    fn name(&self) -> &'static str {
        "idle"
    }
}

/// One hue on every light, gently pulsing at `freq_hz`.
pub struct Pulse {
    stage: Stage,
    cursor: FrameCursor,
    hue: f64,
    freq_hz: f64,
    color: Color,
}

impl Pulse {
    pub fn new(stage: Stage, hue: f64, freq_hz: f64) -> Self {
        let cursor = FrameCursor::new(stage.pixels);
        Self {
            stage,
            cursor,
            hue,
            freq_hz,
            color: Color::BLACK,
        }
    }
}

impl Iterator for Pulse {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        if self.cursor.step() == 0 {
            let x = wave(self.freq_hz, self.stage.now(), 0.0);
            let max_value = self.stage.mood.brightness_intensity();
            let min_value = PULSE_MIN_FRACTION * max_value;
            let value = lerp(x, -1.0, 1.0, max_value, min_value);
            self.color = hsv_to_rgb(self.hue, 1.0, value);
        }
        Some(self.color)
    }
}

impl Animation for Pulse {
    fn name(&self) -> &'static str {
        "pulse"
    }
}

/// Constant color forever.
pub struct Solid {
    color: Color,
}

impl Solid {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Iterator for Solid {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        Some(self.color)
    }
}

impl Animation for Solid {
    fn name(&self) -> &'static str {
        "solid"
    }
}

/// Every light cycles through the hue circle at its own random rate; its
/// brightness follows the rate of the mirrored light.
pub struct Sparkle {
    stage: Stage,
    cursor: FrameCursor,
    phases: Vec<f64>,
    frequencies: Vec<f64>,
    t: f64,
    max_value: f64,
}

impl Sparkle {
    pub fn new<R: Rng + ?Sized>(stage: Stage, rng: &mut R) -> Self {
        let cursor = FrameCursor::new(stage.pixels);
        let n = cursor.pixels();
        let f = stage.mood.happiness_frequency();
        let phases = (0..n).map(|_| rng.gen_range(0.0..TAU)).collect();
        let frequencies = (0..n).map(|_| rng.gen_range(f / 2.0..=f * 2.0)).collect();
        Self {
            stage,
            cursor,
            phases,
            frequencies,
            t: 0.0,
            max_value: 0.0,
        }
    }
}

impl Iterator for Sparkle {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        let i = self.cursor.step();
        if i == 0 {
            self.t = self.stage.now();
            self.max_value = self.stage.mood.brightness_intensity();
        }
        let mirror = self.cursor.pixels() - 1 - i;
        let x = wave(self.frequencies[i], self.t, self.phases[i]);
        let hue = lerp(x, -1.0, 1.0, 0.0, HUE_DEGREES);
        let x = wave(self.frequencies[mirror], self.t, self.phases[mirror]);
        let value = lerp(x, -1.0, 1.0, 0.0, self.max_value);
        Some(hsv_to_rgb(hue, 1.0, value))
    }
}

impl Animation for Sparkle {
    fn name(&self) -> &'static str {
        "sparkle"
    }
}

/// "Knight rider" scanner: a bright head and a dimmer trailing light sweeping
/// back and forth at the happiness frequency.
pub struct Sweep {
    stage: Stage,
    cursor: FrameCursor,
    head: usize,
    tail: usize,
    head_color: Color,
    tail_color: Color,
}

impl Sweep {
    pub fn new(stage: Stage) -> Self {
        let cursor = FrameCursor::new(stage.pixels);
        Self {
            stage,
            cursor,
            head: 0,
            tail: 0,
            head_color: Color::BLACK,
            tail_color: Color::BLACK,
        }
    }

    fn position(x: f64, n: usize) -> usize {
        let i = lerp(x, -1.0, 1.0, 0.0, n as f64) as usize;
        i.min(n - 1)
    }
}

impl Iterator for Sweep {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        let i = self.cursor.step();
        let n = self.cursor.pixels();
        if i == 0 {
            let t = self.stage.now();
            let f = self.stage.mood.happiness_frequency();
            self.head = Self::position(wave(f, t, 0.0), n);
            self.tail = Self::position(wave(f, t, -PI / n as f64), n);
            let hue = self.stage.mood.hue();
            let value = self.stage.mood.brightness_intensity();
            self.head_color = hsv_to_rgb(hue, 1.0, value);
            self.tail_color = hsv_to_rgb(hue, 1.0, value / 2.0);
        }
        // When both land on the same light the tail is drawn last and wins.
        let color = if i == self.tail {
            self.tail_color
        } else if i == self.head {
            self.head_color
        } else {
            Color::BLACK
        };
        Some(color)
    }
}

impl Animation for Sweep {
    fn name(&self) -> &'static str {
        "knight rider"
    }
}

/// Listening-style pulse on one half of the strip, chosen at random.
pub struct Wink {
    cursor: FrameCursor,
    pulse: Pulse,
    left_on: bool,
}

impl Wink {
    pub fn new<R: Rng + ?Sized>(stage: Stage, rng: &mut R) -> Self {
        let left_on = rng.gen::<f64>() >= 0.5;
        let cursor = FrameCursor::new(stage.pixels);
        let pulse = Pulse::new(stage, LISTEN_PULSE_HUE, LISTEN_PULSE_HZ);
        Self {
            cursor,
            pulse,
            left_on,
        }
    }

    pub fn left_on(&self) -> bool {
        self.left_on
    }
}

impl Iterator for Wink {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        let i = self.cursor.step();
        let half = self.cursor.pixels() / 2;
        let color = self.pulse.next()?;
        let lit = if self.left_on { i < half } else { i >= half };
        Some(if lit { color } else { Color::BLACK })
    }
}

impl Animation for Wink {
    fn name(&self) -> &'static str {
        "wink"
    }
}
