use super::{Animation, FrameCursor};
use crate::clock::Clock;
use crate::color::{lerp_color, Color};
use std::sync::Arc;

/// Delegates to `inner` until a deadline set at construction, then ends.
pub struct Duration<A> {
    clock: Arc<dyn Clock>,
    deadline: f64,
    inner: A,
    done: bool,
}

impl<A: Animation> Duration<A> {
    pub fn new(clock: Arc<dyn Clock>, seconds: f64, inner: A) -> Self {
        let deadline = clock.now() + seconds;
        Self {
            clock,
            deadline,
            inner,
            done: false,
        }
    }

    pub fn deadline(&self) -> f64 {
        self.deadline
    }
}

impl<A: Animation> Iterator for Duration<A> {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        if self.done || self.clock.now() >= self.deadline {
            self.done = true;
            return None;
        }
        let color = self.inner.next();
        self.done = color.is_none();
        color
    }
}

impl<A: Animation> Animation for Duration<A> {
    fn name(&self) -> &'static str {
        "duration"
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Hold,
    Fade(f64),
    Done,
}

/// Plays `first`, then blends it into `second`, then ends.
///
/// The phase is decided once per frame so a frame is never split between
/// holding and fading.
pub struct Crossfade<A, B> {
    clock: Arc<dyn Clock>,
    cursor: FrameCursor,
    fade_start: f64,
    end: f64,
    first: A,
    second: B,
    phase: Phase,
}

impl<A: Animation, B: Animation> Crossfade<A, B> {
    pub fn new(
        clock: Arc<dyn Clock>,
        pixels: usize,
        hold_s: f64,
        fade_s: f64,
        first: A,
        second: B,
    ) -> Self {
        let fade_start = clock.now() + hold_s;
        let end = fade_start + fade_s;
        Self {
            clock,
            cursor: FrameCursor::new(pixels),
            fade_start,
            end,
            first,
            second,
            phase: Phase::Hold,
        }
    }

    pub fn fade_start(&self) -> f64 {
        self.fade_start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    fn pull(&mut self) -> Option<Color> {
        match self.phase {
            Phase::Hold => self.first.next(),
            Phase::Fade(t) => {
                let a = self.first.next()?;
                let b = self.second.next()?;
                Some(lerp_color(t, self.fade_start, self.end, a, b))
            }
            Phase::Done => None,
        }
    }
}

impl<A: Animation, B: Animation> Iterator for Crossfade<A, B> {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        if self.phase == Phase::Done {
            return None;
        }
        if self.cursor.step() == 0 {
            let t = self.clock.now();
            self.phase = if t < self.fade_start {
                Phase::Hold
            } else if t < self.end {
                Phase::Fade(t)
            } else {
                Phase::Done
            };
        }
        let color = self.pull();
        if color.is_none() {
            self.phase = Phase::Done;
        }
        color
    }
}

impl<A: Animation, B: Animation> Animation for Crossfade<A, B> {
    fn name(&self) -> &'static str {
        "crossfade"
    }
}
