use super::{Animation, FrameCursor, Stage};
use crate::color::{hsv_to_rgb, Color};
use crate::constants::{HUE_DEGREES, SPECTRUM_MAX_DB};
use crate::utils::{clamp, lerp};
use rustfft::num_complex::Complex32;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Audio spectrum: light `i` shows frequency bin `i + 1` of the latest
/// microphone buffer, hue spread across the strip, brightness from the bin's
/// level in decibels.
pub struct Spectrum {
    stage: Stage,
    cursor: FrameCursor,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex32>,
    frame: Vec<Color>,
}

impl Spectrum {
    pub fn new(stage: Stage) -> Self {
        let cursor = FrameCursor::new(stage.pixels);
        let n = cursor.pixels();
        let fft = FftPlanner::<f32>::new().plan_fft_forward(2 * n);
        Self {
            stage,
            cursor,
            fft,
            scratch: vec![Complex32::default(); 2 * n],
            frame: vec![Color::BLACK; n],
        }
    }

    /// Recompute the frame from `samples`. Returns false (frame untouched) when
    /// there are not enough samples to fill every bin.
    pub fn analyze(&mut self, samples: &[i16]) -> bool {
        let n = self.frame.len();
        if samples.len() < 2 * n {
            return false;
        }
        for (slot, s) in self.scratch.iter_mut().zip(samples) {
            *slot = Complex32::new(*s as f32, 0.0);
        }
        self.fft.process(&mut self.scratch);
        let max_value = self.stage.mood.brightness_intensity();
        for (i, color) in self.frame.iter_mut().enumerate() {
            let level_db = 10.0 * (self.scratch[i + 1].norm() as f64).log10();
            let hue = lerp(i as f64, 0.0, n as f64, 0.0, HUE_DEGREES);
            let value = lerp(level_db, 0.0, SPECTRUM_MAX_DB, 0.0, max_value);
            *color = hsv_to_rgb(hue, 1.0, clamp(value, 0.0, max_value));
        }
        true
    }
}

impl Iterator for Spectrum {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        let i = self.cursor.step();
        if i == 0 {
            // No usable buffer: repeat the previous frame rather than stall.
            let samples = self.stage.audio.as_ref().and_then(|a| a.last_read());
            if let Some(samples) = samples {
                self.analyze(&samples);
            }
        }
        Some(self.frame[i])
    }
}

impl Animation for Spectrum {
    fn name(&self) -> &'static str {
        "spectrum"
    }
}
