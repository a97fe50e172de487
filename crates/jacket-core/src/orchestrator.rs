//! Ties speech, mood state and animations together and runs the three
//! long-lived loops: keyword listening, rendering and hue drift.

use crate::animation::{Animation, BoxedAnimation, Solid, Stage};
use crate::clock::Clock;
use crate::color::Color;
use crate::commands::Dispatcher;
use crate::config::Config;
use crate::constants::*;
use crate::devices::{AudioSource, LightSink, SpeechSource};
use crate::error::{Error, Result};
use crate::state::{MoodState, Setting};
use instant::Instant;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

/// Keyword handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    Wake,
    /// Nudge happiness by the bound amount.
    Happiness(i32),
}

/// Command handlers, with their bound arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Wink,
    Spectrum,
    Sparkle,
    KnightRider,
    Brightness(i32),
    /// "show me <command>": run the rest of the utterance as a command.
    ShowMe,
    /// "light up <color>"
    LightUp,
    /// "change|set|update|modify|make <state> <value>"
    Change,
}

type Outcome = (&'static str, Result<()>);

pub struct Jacket {
    mood: Arc<MoodState>,
    stage: Stage,
    active: Mutex<BoxedAnimation>,
    keywords: Dispatcher<Keyword>,
    commands: Dispatcher<Command>,
    transient_s: f64,
    flow_hue_period_s: f64,
    min_command_score: Option<i32>,
}

impl Jacket {
    pub fn new(
        config: &Config,
        pixels: usize,
        clock: Arc<dyn Clock>,
        audio: Option<Arc<dyn AudioSource>>,
    ) -> Self {
        let mood = Arc::new(MoodState::new(&config.names));
        let stage = Stage::new(mood.clone(), clock, audio, pixels);
        let active: BoxedAnimation = Box::new(stage.idle());

        let mut keywords = Dispatcher::new();
        for phrase in config.speech.wake_words.keys() {
            keywords.register(phrase, Keyword::Wake);
        }
        for phrase in config.speech.happy_words.keys() {
            keywords.register(phrase, Keyword::Happiness(1));
        }
        for phrase in config.speech.sad_words.keys() {
            keywords.register(phrase, Keyword::Happiness(-1));
        }

        let mut commands = Dispatcher::with_junk(config.speech.junk.iter().cloned());
        commands.register("wink", Command::Wink);
        commands.register("spectrum", Command::Spectrum);
        commands.register("sparkle", Command::Sparkle);
        commands.register("knight rider", Command::KnightRider);
        commands.register("brighter", Command::Brightness(1));
        commands.register("dimmer", Command::Brightness(-1));
        commands.register_starts_with("show me", Command::ShowMe);
        commands.register_starts_with("light up", Command::LightUp);
        for verb in ["change", "set", "update", "modify", "make"] {
            commands.register_starts_with(verb, Command::Change);
        }

        Self {
            mood,
            stage,
            active: Mutex::new(active),
            keywords,
            commands,
            transient_s: config.animation.animation_duration_s,
            flow_hue_period_s: config.animation.flow_hue_period_s,
            min_command_score: config.speech.min_command_score,
        }
    }

    pub fn mood(&self) -> &Arc<MoodState> {
        &self.mood
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    fn lock_active(&self) -> MutexGuard<'_, BoxedAnimation> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn active_name(&self) -> &'static str {
        self.lock_active().name()
    }

    /// Make `animation` the active one; the render loop picks it up on its next tick.
    pub fn animate<A: Animation + 'static>(&self, animation: A) {
        log::debug!("Animation: {}", animation.name());
        *self.lock_active() = Box::new(animation);
    }

    /// Build the next active animation from the current one, atomically.
    pub fn replace_active<F>(&self, build: F)
    where
        F: FnOnce(BoxedAnimation) -> BoxedAnimation,
    {
        let mut active = self.lock_active();
        let previous = std::mem::replace(&mut *active, Box::new(Solid::new(Color::BLACK)));
        *active = build(previous);
        log::debug!("Animation: {}", active.name());
    }

    // ---------------- Keywords ----------------

    pub fn handle_keyword(
        &self,
        speech: &mut dyn SpeechSource,
        keyword: Option<&str>,
    ) -> Result<()> {
        let Some((action, _)) = self.keywords.resolve(keyword) else {
            log::debug!("Unknown keyword: {keyword:?}");
            return Ok(());
        };
        match *action {
            Keyword::Wake => self.wake(speech),
            Keyword::Happiness(delta) => {
                self.change_happiness(delta);
                Ok(())
            }
        }
    }

    fn wake(&self, speech: &mut dyn SpeechSource) -> Result<()> {
        self.animate(self.stage.pulse(LISTEN_PULSE_HUE, LISTEN_PULSE_HZ));
        let heard = speech.listen_command()?;
        let stage = &self.stage;
        self.replace_active(|listening| {
            Box::new(stage.crossfade(0.0, LISTEN_FADE_S, listening, stage.idle()))
        });
        log::debug!("Detected command: {:?} [score: {:?}]", heard.text, heard.score);
        if let (Some(min), Some(score)) = (self.min_command_score, heard.score) {
            if score < min {
                log::debug!("Ignoring command scored {score} (< {min})");
                return Ok(());
            }
        }
        self.handle_command(heard.text.as_deref());
        Ok(())
    }

    /// Nudge happiness and flash a warm (up) or cool (down) pulse over
    /// whatever was playing.
    pub fn change_happiness(&self, delta: i32) {
        self.mood.adjust_happiness(delta);
        let hue = if delta > 0 { HAPPY_PULSE_HUE } else { SAD_PULSE_HUE };
        let flash = self.stage.pulse(hue, MOOD_PULSE_HZ);
        let stage = &self.stage;
        self.replace_active(|previous| {
            Box::new(stage.crossfade(MOOD_HOLD_S, MOOD_FADE_S, flash, previous))
        });
    }

    // ---------------- Commands ----------------

    /// Dispatch a recognized command utterance. Returns whether it matched.
    pub fn handle_command(&self, text: Option<&str>) -> bool {
        self.commands
            .dispatch(text, |command, tokens| self.run_command(*command, tokens))
    }

    fn run_command(&self, command: Command, tokens: &[String]) {
        match command {
            Command::Wink => {
                let wink = self.stage.wink(&mut rand::thread_rng());
                self.animate(self.stage.duration(WINK_DURATION_S, wink));
            }
            Command::Spectrum => self.play_transient(self.stage.spectrum()),
            Command::Sparkle => {
                let sparkle = self.stage.sparkle(&mut rand::thread_rng());
                self.play_transient(sparkle);
            }
            Command::KnightRider => self.play_transient(self.stage.sweep()),
            Command::Brightness(delta) => {
                self.mood.adjust_brightness(delta);
            }
            Command::ShowMe => {
                if tokens.len() < 3 {
                    return;
                }
                self.handle_command(Some(&tokens[2..].join(" ")));
            }
            Command::LightUp => self.change_color(tokens),
            Command::Change => self.change(tokens),
        }
    }

    /// Play a command animation for the configured time, then fade to idle.
    fn play_transient<A: Animation + 'static>(&self, animation: A) {
        log::debug!("{} animation", animation.name());
        let idle = self.stage.idle();
        self.animate(
            self.stage
                .crossfade(self.transient_s, TRANSIENT_FADE_S, animation, idle),
        );
    }

    fn change(&self, tokens: &[String]) {
        log::debug!("Change command: {tokens:?}");
        if tokens.len() < 3 {
            return;
        }
        match tokens[1].as_str() {
            "color" => self.change_color(tokens),
            "brightness" => {
                self.mood.set_brightness(Setting::Named(&tokens[2]));
            }
            "mood" | "happiness" => {
                self.mood.set_happiness(Setting::Named(&tokens[2]));
            }
            _ => {}
        }
    }

    fn change_color(&self, tokens: &[String]) {
        if tokens.len() < 3 {
            return;
        }
        self.mood.set_hue(Setting::Named(&tokens[2]));
        // Snap straight to the new hue and cancel any fade in progress.
        self.animate(self.stage.idle());
    }

    // ---------------- Loops ----------------

    /// Latch the newest microphone buffer, then pull one frame from the active
    /// animation into `lights` and show it.
    ///
    /// Returns `false` when the animation ended part way through the frame; idle
    /// is installed in its place and nothing is shown for that tick. A failed
    /// audio stream is an error, like a failed `show`.
    pub fn render_tick(&self, lights: &mut dyn LightSink) -> Result<bool> {
        if let Some(audio) = &self.stage.audio {
            audio.read()?;
        }
        {
            let mut active = self.lock_active();
            for i in 0..lights.len() {
                match active.next() {
                    Some(color) => lights.set_pixel(i, color),
                    None => {
                        log::debug!("{} finished, back to idle", active.name());
                        *active = Box::new(self.stage.idle());
                        return Ok(false);
                    }
                }
            }
        }
        lights.show()?;
        Ok(true)
    }

    /// Advance the global hue for `elapsed_s` of flow.
    pub fn drift_hue(&self, elapsed_s: f64) -> f64 {
        let velocity = HUE_DEGREES / self.flow_hue_period_s;
        self.mood.advance_hue(velocity * elapsed_s)
    }

    pub fn listen_loop(&self, speech: &mut dyn SpeechSource) -> Result<()> {
        loop {
            let keyword = speech.listen_keyword()?;
            self.handle_keyword(speech, Some(&keyword))?;
        }
    }

    pub fn render_loop(&self, lights: &mut dyn LightSink) -> Result<()> {
        let period = Duration::from_secs_f64(1.0 / TICK_RATE_HZ);
        loop {
            let started = Instant::now();
            if self.render_tick(lights)? {
                if let Some(rest) = period.checked_sub(started.elapsed()) {
                    thread::sleep(rest);
                }
            }
        }
    }

    pub fn hue_drift_loop(&self) -> Result<()> {
        let period = Duration::from_secs_f64(1.0 / TICK_RATE_HZ);
        let mut last = self.stage.now();
        loop {
            let now = self.stage.now();
            self.drift_hue(now - last);
            last = now;
            thread::sleep(period);
        }
    }

    /// Start the listen, render and hue-drift threads and block until one of
    /// them stops. Only collaborator failures stop a loop, so this normally
    /// returns the error that should end the process.
    pub fn run(
        self: Arc<Self>,
        mut lights: Box<dyn LightSink>,
        mut speech: Box<dyn SpeechSource>,
    ) -> Result<()> {
        let (tx, rx) = mpsc::channel::<Outcome>();
        {
            let jacket = self.clone();
            spawn_worker("listen", &tx, move || jacket.listen_loop(speech.as_mut()))?;
        }
        {
            let jacket = self.clone();
            spawn_worker("render", &tx, move || jacket.render_loop(lights.as_mut()))?;
        }
        {
            let jacket = self.clone();
            spawn_worker("hue-drift", &tx, move || jacket.hue_drift_loop())?;
        }
        drop(tx);
        log::info!("jacket running: {} lights", self.stage.pixels);

        match rx.recv() {
            Ok((name, Ok(()))) => {
                log::warn!("{name} loop exited");
                Ok(())
            }
            Ok((name, Err(e))) => {
                log::error!("{name} loop failed: {e}");
                Err(e)
            }
            Err(_) => Err(Error::Thread {
                name: "jacket".into(),
                reason: "all workers disconnected".into(),
            }),
        }
    }
}

fn spawn_worker<F>(name: &'static str, tx: &Sender<Outcome>, body: F) -> Result<()>
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    let tx = tx.clone();
    thread::Builder::new()
        .name(name.into())
        .spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(body)).unwrap_or_else(|_| {
                Err(Error::Thread {
                    name: name.into(),
                    reason: "panicked".into(),
                })
            });
            let _ = tx.send((name, outcome));
        })
        .map_err(|e| Error::Thread {
            name: name.into(),
            reason: e.to_string(),
        })?;
    Ok(())
}
