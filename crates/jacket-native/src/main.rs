use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use jacket_core::{AudioSource, Config, Jacket, LightSink, SpeechSource, SystemClock};

mod console_speech;
mod microphone;
mod terminal;

use console_speech::ConsoleSpeech;
use terminal::TerminalStrip;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// Path to config TOML; built-in defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of lights (overrides config)
    #[arg(long)]
    lights: Option<usize>,

    /// Run without the microphone (spectrum stays dark)
    #[arg(long, default_value_t = false)]
    no_audio: bool,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::builder()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(count) = args.lights {
        config.lights.count = count;
        config.validate()?;
    }
    log::debug!("Keywords:\n{}", config.speech.keyword_list());

    // The stream has to outlive the jacket; it stays on this thread.
    let (_stream, audio) = if args.no_audio {
        (None, None)
    } else {
        match microphone::open(&config.audio) {
            Ok((stream, mic)) => (Some(stream), Some(mic as Arc<dyn AudioSource>)),
            Err(e) => {
                log::warn!("Microphone unavailable, continuing without audio: {e:#}");
                (None, None)
            }
        }
    };

    let lights: Box<dyn LightSink> = Box::new(TerminalStrip::new(
        config.lights.count,
        config.lights.brightness,
    ));
    let speech: Box<dyn SpeechSource> =
        Box::new(ConsoleSpeech::spawn(&config.speech).context("starting console input")?);

    let jacket = Arc::new(Jacket::new(
        &config,
        lights.len(),
        Arc::new(SystemClock::new()),
        audio,
    ));
    log::info!(
        "Say (type) one of: {}",
        config.speech.keywords().collect::<Vec<_>>().join(", ")
    );
    jacket.run(lights, speech)?;
    Ok(())
}
