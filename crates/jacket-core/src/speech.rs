/// Timing rule for a bounded command listen: give up if nobody has started
/// speaking after `min_s`, and stop recording after `max_s` no matter what.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ListenWindow {
    pub start: f64,
    pub min_s: f64,
    pub max_s: f64,
}

impl ListenWindow {
    pub fn new(start: f64, min_s: f64, max_s: f64) -> Self {
        Self { start, min_s, max_s }
    }

    pub fn is_over(&self, now: f64, in_speech: bool) -> bool {
        let elapsed = now - self.start;
        (!in_speech && elapsed > self.min_s) || elapsed > self.max_s
    }

    /// Seconds left before the window closes for the given speech state.
    pub fn remaining(&self, now: f64, in_speech: bool) -> f64 {
        let limit = if in_speech { self.max_s } else { self.min_s.min(self.max_s) };
        (self.start + limit - now).max(0.0)
    }
}
