//! Mood state shared between the listen, render and hue-drift threads.
//!
//! All three values live behind one mutex and are clamped (or wrapped, for
//! hue) before they are stored, so readers never observe an out-of-range
//! value. Derived animation parameters are computed on read.

use crate::config::NamesConfig;
use crate::constants::*;
use crate::utils::{clamp, lerp};
use fnv::FnvHashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A write request for one of the mood values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Setting<'a, T> {
    /// Reset to zero.
    Clear,
    Value(T),
    /// Look the value up by name; unknown names leave the value as it is.
    Named(&'a str),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoodSnapshot {
    pub happiness: i32,
    pub brightness: i32,
    pub hue: f64,
}

impl Default for MoodSnapshot {
    fn default() -> Self {
        Self {
            happiness: DEFAULT_HAPPINESS,
            brightness: DEFAULT_BRIGHTNESS,
            hue: 0.0,
        }
    }
}

pub struct MoodState {
    inner: Mutex<MoodSnapshot>,
    hue_names: FnvHashMap<String, f64>,
    brightness_names: FnvHashMap<String, i32>,
    happiness_names: FnvHashMap<String, i32>,
}

#[inline]
fn clamp_happiness(v: i32) -> i32 {
    clamp(v, HAPPINESS_MIN, HAPPINESS_MAX)
}

#[inline]
fn clamp_brightness(v: i32) -> i32 {
    clamp(v, BRIGHTNESS_MIN, BRIGHTNESS_MAX)
}

/// Wrap degrees into `0..360`.
#[inline]
pub fn wrap_hue(deg: f64) -> f64 {
    let h = deg.rem_euclid(HUE_DEGREES);
    // rem_euclid of a tiny negative value rounds up to exactly 360
    if h >= HUE_DEGREES || !h.is_finite() {
        0.0
    } else {
        h
    }
}

impl MoodState {
    pub fn new(names: &NamesConfig) -> Self {
        Self {
            inner: Mutex::new(MoodSnapshot::default()),
            hue_names: names.hues.clone(),
            brightness_names: names
                .brightness
                .iter()
                .map(|(k, v)| (k.clone(), clamp_brightness(*v)))
                .collect(),
            happiness_names: names
                .happiness
                .iter()
                .map(|(k, v)| (k.clone(), clamp_happiness(*v)))
                .collect(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MoodSnapshot> {
        // Values are validated before every store, so a poisoned guard still holds legal state.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> MoodSnapshot {
        *self.lock()
    }

    pub fn happiness(&self) -> i32 {
        self.lock().happiness
    }

    pub fn set_happiness(&self, setting: Setting<'_, i32>) -> i32 {
        let mut mood = self.lock();
        mood.happiness = match setting {
            Setting::Clear => 0,
            Setting::Value(v) => clamp_happiness(v),
            Setting::Named(name) => self
                .happiness_names
                .get(name)
                .copied()
                .unwrap_or(mood.happiness),
        };
        log::debug!("Happiness: {}", mood.happiness);
        mood.happiness
    }

    /// Add `delta` to happiness atomically and return the clamped result.
    pub fn adjust_happiness(&self, delta: i32) -> i32 {
        let mut mood = self.lock();
        mood.happiness = clamp_happiness(mood.happiness.saturating_add(delta));
        log::debug!("Happiness: {}", mood.happiness);
        mood.happiness
    }

    /// Animation speed in Hz: -3 maps to 0.25, +3 to 2.0.
    pub fn happiness_frequency(&self) -> f64 {
        lerp(
            self.happiness() as f64,
            HAPPINESS_MIN as f64,
            HAPPINESS_MAX as f64,
            SAD_FREQUENCY_HZ,
            HAPPY_FREQUENCY_HZ,
        )
    }

    pub fn brightness(&self) -> i32 {
        self.lock().brightness
    }

    pub fn set_brightness(&self, setting: Setting<'_, i32>) -> i32 {
        let mut mood = self.lock();
        mood.brightness = match setting {
            Setting::Clear => 0,
            Setting::Value(v) => clamp_brightness(v),
            Setting::Named(name) => self
                .brightness_names
                .get(name)
                .copied()
                .unwrap_or(mood.brightness),
        };
        log::debug!("Brightness: {}", mood.brightness);
        mood.brightness
    }

    pub fn adjust_brightness(&self, delta: i32) -> i32 {
        let mut mood = self.lock();
        mood.brightness = clamp_brightness(mood.brightness.saturating_add(delta));
        log::debug!("Brightness: {}", mood.brightness);
        mood.brightness
    }

    /// Brightness as an HSV value, `0.0..=1.0`.
    pub fn brightness_intensity(&self) -> f64 {
        lerp(
            self.brightness() as f64,
            BRIGHTNESS_MIN as f64,
            BRIGHTNESS_MAX as f64,
            0.0,
            1.0,
        )
    }

    pub fn hue(&self) -> f64 {
        self.lock().hue
    }

    pub fn set_hue(&self, setting: Setting<'_, f64>) -> f64 {
        let mut mood = self.lock();
        mood.hue = match setting {
            Setting::Clear => 0.0,
            Setting::Value(v) => wrap_hue(v),
            Setting::Named(name) => self
                .hue_names
                .get(name)
                .map(|h| wrap_hue(*h))
                .unwrap_or(mood.hue),
        };
        log::trace!("Hue: {:.1}", mood.hue);
        mood.hue
    }

    /// Rotate the hue by `delta` degrees atomically.
    pub fn advance_hue(&self, delta: f64) -> f64 {
        let mut mood = self.lock();
        mood.hue = wrap_hue(mood.hue + delta);
        mood.hue
    }
}
