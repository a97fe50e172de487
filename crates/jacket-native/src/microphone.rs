// ---------------- Native microphone (cpal) ----------------

use anyhow::{anyhow, Context};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use jacket_core::config::AudioConfig;
use jacket_core::{AudioSource, Error};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Capture {
    pending: Vec<i16>,
    // Published by the callback; moved to `last` by `read`.
    latest: Option<Vec<i16>>,
    fresh: bool,
    last: Option<Vec<i16>>,
    failure: Option<String>,
}

/// Mono capture buffers handed from the cpal callback to the render loop,
/// which latches one per frame with `read`. The `cpal::Stream` itself stays with the caller of `open`.
pub struct Microphone {
    capture: Arc<Mutex<Capture>>,
}

impl Microphone {
    fn lock(&self) -> MutexGuard<'_, Capture> {
        self.capture.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AudioSource for Microphone {
    fn read(&self) -> jacket_core::Result<Option<Vec<i16>>> {
        let mut capture = self.lock();
        if let Some(reason) = capture.failure.take() {
            return Err(Error::Audio(reason));
        }
        if !capture.fresh {
            return Ok(None);
        }
        capture.fresh = false;
        capture.last = capture.latest.take();
        Ok(capture.last.clone())
    }

    fn last_read(&self) -> Option<Vec<i16>> {
        self.lock().last.clone()
    }
}

/// Open the configured input device (or the host default) and start capturing.
/// The returned stream must be kept alive for as long as capture is wanted.
pub fn open(config: &AudioConfig) -> anyhow::Result<(cpal::Stream, Arc<Microphone>)> {
    let host = cpal::default_host();
    let device = match &config.device {
        Some(name) => host
            .input_devices()
            .context("listing input devices")?
            .find(|d| d.name().map(|n| &n == name).unwrap_or(false))
            .or_else(|| {
                log::warn!("Input device {name:?} not found, using the default");
                host.default_input_device()
            }),
        None => host.default_input_device(),
    }
    .ok_or_else(|| anyhow!("no audio input device"))?;

    let supported = device
        .default_input_config()
        .context("querying input config")?;
    let mut stream_config: cpal::StreamConfig = supported.config();
    stream_config.sample_rate = cpal::SampleRate(config.sample_rate_hz);
    let channels = stream_config.channels.max(1) as usize;
    let period = config.period_frames.max(1) as usize;
    log::info!(
        "Microphone: {} @ {} Hz, {} ch",
        device.name().unwrap_or_else(|_| "?".into()),
        config.sample_rate_hz,
        channels
    );

    let capture = Arc::new(Mutex::new(Capture::default()));
    let err_capture = Arc::clone(&capture);
    let err_fn = move |err: cpal::StreamError| {
        log::error!("audio stream error: {err}");
        let mut capture = err_capture.lock().unwrap_or_else(PoisonError::into_inner);
        capture.failure = Some(err.to_string());
    };

    let stream = match supported.sample_format() {
        cpal::SampleFormat::F32 => build_stream_f32(
            &device,
            &stream_config,
            channels,
            period,
            Arc::clone(&capture),
            err_fn,
        ),
        cpal::SampleFormat::I16 => build_stream_i16(
            &device,
            &stream_config,
            channels,
            period,
            Arc::clone(&capture),
            err_fn,
        ),
        cpal::SampleFormat::U16 => build_stream_u16(
            &device,
            &stream_config,
            channels,
            period,
            Arc::clone(&capture),
            err_fn,
        ),
        other => return Err(anyhow!("unsupported sample format {other:?}")),
    }
    .context("building input stream")?;

    stream.play().context("starting input stream")?;
    Ok((stream, Arc::new(Microphone { capture })))
}

/// Append the first channel of each frame; publish once a full period is in.
fn push_frames<T: Copy>(
    capture: &Mutex<Capture>,
    data: &[T],
    channels: usize,
    period: usize,
    to_i16: impl Fn(T) -> i16,
) {
    let mut capture = capture.lock().unwrap_or_else(PoisonError::into_inner);
    for frame in data.chunks(channels) {
        capture.pending.push(to_i16(frame[0]));
        if capture.pending.len() >= period {
            let buffer = std::mem::take(&mut capture.pending);
            capture.latest = Some(buffer);
            capture.fresh = true;
        }
    }
}

fn build_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    period: usize,
    capture: Arc<Mutex<Capture>>,
    err_fn: impl FnMut(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_input_stream(
        config,
        move |data: &[f32], _| {
            push_frames(&capture, data, channels, period, |s| {
                (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
            })
        },
        err_fn,
        None,
    )
}

fn build_stream_i16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    period: usize,
    capture: Arc<Mutex<Capture>>,
    err_fn: impl FnMut(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_input_stream(
        config,
        move |data: &[i16], _| push_frames(&capture, data, channels, period, |s| s),
        err_fn,
        None,
    )
}

fn build_stream_u16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    period: usize,
    capture: Arc<Mutex<Capture>>,
    err_fn: impl FnMut(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    device.build_input_stream(
        config,
        move |data: &[u16], _| {
            push_frames(&capture, data, channels, period, |s| {
                (s as i32 - 32_768) as i16
            })
        },
        err_fn,
        None,
    )
}
