//! Lazy color streams.
//!
//! An animation is an iterator of colors pulled one pixel at a time; a full
//! frame is one pull per light. Infinite animations never return `None`.
//! Finite ones (`Duration`, `Crossfade`) return `None` once their deadline,
//! fixed when they are built, has passed, and keep returning it afterwards.

mod base;
mod combinators;
mod spectrum;

pub use base::{Idle, Pulse, Solid, Sparkle, Sweep, Wink};
pub use combinators::{Crossfade, Duration};
pub use spectrum::Spectrum;

use crate::clock::Clock;
use crate::color::Color;
use crate::devices::AudioSource;
use crate::state::MoodState;
use rand::Rng;
use std::sync::Arc;

pub trait Animation: Iterator<Item = Color> + Send {
    fn name(&self) -> &'static str;
}

pub type BoxedAnimation = Box<dyn Animation>;

impl<A: Animation + ?Sized> Animation for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Tracks which pixel of the current frame is produced next.
#[derive(Clone, Debug)]
pub(crate) struct FrameCursor {
    pixels: usize,
    next: usize,
}

impl FrameCursor {
    pub(crate) fn new(pixels: usize) -> Self {
        Self {
            pixels: pixels.max(1),
            next: 0,
        }
    }

    /// Index of the pixel being produced; 0 marks the start of a frame.
    #[inline]
    pub(crate) fn step(&mut self) -> usize {
        let i = self.next;
        self.next = (i + 1) % self.pixels;
        i
    }

    #[inline]
    pub(crate) fn pixels(&self) -> usize {
        self.pixels
    }
}

/// Everything an animation reads while running: the live mood, the clock,
/// the microphone and the strip length.
#[derive(Clone)]
pub struct Stage {
    pub mood: Arc<MoodState>,
    pub clock: Arc<dyn Clock>,
    pub audio: Option<Arc<dyn AudioSource>>,
    pub pixels: usize,
}

impl Stage {
    pub fn new(
        mood: Arc<MoodState>,
        clock: Arc<dyn Clock>,
        audio: Option<Arc<dyn AudioSource>>,
        pixels: usize,
    ) -> Self {
        Self {
            mood,
            clock,
            audio,
            pixels,
        }
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn idle(&self) -> Idle {
        Idle::new(self.clone())
    }

    pub fn pulse(&self, hue: f64, freq_hz: f64) -> Pulse {
        Pulse::new(self.clone(), hue, freq_hz)
    }

    pub fn solid(&self, color: Color) -> Solid {
        Solid::new(color)
    }

    pub fn sparkle<R: Rng + ?Sized>(&self, rng: &mut R) -> Sparkle {
        Sparkle::new(self.clone(), rng)
    }

    pub fn sweep(&self) -> Sweep {
        Sweep::new(self.clone())
    }

    pub fn spectrum(&self) -> Spectrum {
        Spectrum::new(self.clone())
    }

    pub fn wink<R: Rng + ?Sized>(&self, rng: &mut R) -> Wink {
        Wink::new(self.clone(), rng)
    }

    /// Play `inner` for `seconds`, then end.
    pub fn duration<A: Animation>(&self, seconds: f64, inner: A) -> Duration<A> {
        Duration::new(self.clock.clone(), seconds, inner)
    }

    /// Show `first` for `hold_s`, blend into `second` over `fade_s`, then end.
    pub fn crossfade<A: Animation, B: Animation>(
        &self,
        hold_s: f64,
        fade_s: f64,
        first: A,
        second: B,
    ) -> Crossfade<A, B> {
        Crossfade::new(self.clock.clone(), self.pixels, hold_s, fade_s, first, second)
    }
}
