//! Startup configuration. `Config::default()` is a complete working setup; a
//! TOML file only needs the keys it overrides.

use crate::error::{Error, Result};
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lights: LightsConfig,
    pub audio: AudioConfig,
    pub animation: AnimationConfig,
    pub speech: SpeechConfig,
    pub names: NamesConfig,
}

/// LED strip layout and driver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    pub count: usize,
    /// Global strip brightness applied by the driver, 0 (dark) to 255.
    pub brightness: u8,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            count: 26,
            brightness: 255,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Input device name; the host default is used when absent or not found.
    pub device: Option<String>,
    pub sample_rate_hz: u32,
    /// Frames per capture buffer.
    pub period_frames: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: None,
            sample_rate_hz: 16_000,
            period_frames: 512,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Seconds for the idle flow to drift through the whole hue circle.
    pub flow_hue_period_s: f64,
    /// How long command animations (sparkle, spectrum, knight rider) play.
    pub animation_duration_s: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            flow_hue_period_s: 45.0,
            animation_duration_s: 10.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Give up on a command if no speech starts within this many seconds.
    pub command_min_s: f64,
    /// Hard cap on command recording time.
    pub command_max_s: f64,
    /// Recognized commands scoring below this are ignored. No threshold when absent.
    pub min_command_score: Option<i32>,
    /// Filler phrases stripped from commands, in removal order.
    pub junk: Vec<String>,
    /// Keyword phrase -> spotting threshold.
    pub wake_words: BTreeMap<String, String>,
    pub happy_words: BTreeMap<String, String>,
    pub sad_words: BTreeMap<String, String>,
}

fn phrases(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command_min_s: 2.0,
            command_max_s: 5.0,
            min_command_score: None,
            junk: ["please", "thank you", "thanks", "the", "your", "to"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            wake_words: phrases(&[("yo jackson", "1e-05")]),
            happy_words: phrases(&[
                ("happiness", "1e-05"),
                ("respect", "1e-05"),
                ("excitement", "1e-05"),
            ]),
            sad_words: phrases(&[
                ("sadness", "1e-05"),
                ("depression", "1e-05"),
                ("anger", "1e-05"),
            ]),
        }
    }
}

impl SpeechConfig {
    /// Every keyword phrase the spotter listens for.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.wake_words
            .keys()
            .chain(self.happy_words.keys())
            .chain(self.sad_words.keys())
            .map(String::as_str)
    }

    /// Keyword list in the `phrase /threshold/` line format keyword spotters read.
    pub fn keyword_list(&self) -> String {
        let mut out = String::new();
        for table in [&self.wake_words, &self.happy_words, &self.sad_words] {
            for (phrase, threshold) in table {
                out.push_str(&format!("{phrase} /{threshold}/\n"));
            }
        }
        out
    }
}

/// Name tables used by the color/brightness/mood commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamesConfig {
    pub hues: FnvHashMap<String, f64>,
    pub brightness: FnvHashMap<String, i32>,
    pub happiness: FnvHashMap<String, i32>,
}

fn table<V: Copy>(entries: &[(&str, V)]) -> FnvHashMap<String, V> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            hues: table(&[
                ("red", 0.0),
                ("orange", 30.0),
                ("yellow", 60.0),
                ("green", 120.0),
                ("turquoise", 150.0),
                ("cyan", 180.0),
                ("blue", 210.0),
                ("violet", 240.0),
                ("purple", 270.0),
                ("magenta", 300.0),
                ("scarlet", 330.0),
            ]),
            brightness: table(&[
                ("zero", 0),
                ("one", 1),
                ("two", 2),
                ("three", 3),
                ("low", 1),
                ("medium", 2),
                ("high", 3),
                ("max", 3),
            ]),
            happiness: table(&[
                ("miserable", -3),
                ("sad", -2),
                ("glum", -1),
                ("neutral", 0),
                ("content", 1),
                ("happy", 2),
                ("ecstatic", 3),
            ]),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lights.count == 0 {
            return Err(Error::Config("lights.count must be at least 1".into()));
        }
        if self.audio.sample_rate_hz == 0 {
            return Err(Error::Config("audio.sample_rate_hz must be positive".into()));
        }
        if !(self.animation.flow_hue_period_s > 0.0) {
            return Err(Error::Config(
                "animation.flow_hue_period_s must be positive".into(),
            ));
        }
        if self.animation.animation_duration_s < 0.0 {
            return Err(Error::Config(
                "animation.animation_duration_s must not be negative".into(),
            ));
        }
        if self.speech.command_min_s < 0.0 || self.speech.command_max_s < self.speech.command_min_s
        {
            return Err(Error::Config(
                "speech.command_min_s must be within 0..=command_max_s".into(),
            ));
        }
        Ok(())
    }
}
