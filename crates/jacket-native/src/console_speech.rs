use jacket_core::config::SpeechConfig;
use jacket_core::{Error, Heard, ListenWindow, SpeechSource};
use std::collections::HashSet;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Typed stand-in for the keyword spotter and command recognizer: each line
/// on stdin is one utterance.
pub struct ConsoleSpeech {
    lines: Receiver<String>,
    keywords: HashSet<String>,
    command_min_s: f64,
    command_max_s: f64,
}

impl ConsoleSpeech {
    pub fn spawn(config: &SpeechConfig) -> jacket_core::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin".into())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    let Ok(line) = line else { break };
                    let utterance = line.trim().to_lowercase();
                    if utterance.is_empty() {
                        continue;
                    }
                    if tx.send(utterance).is_err() {
                        break;
                    }
                }
            })
            .map_err(|e| Error::Thread {
                name: "stdin".into(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_receiver(rx, config))
    }

    pub fn from_receiver(lines: Receiver<String>, config: &SpeechConfig) -> Self {
        Self {
            lines,
            keywords: config.keywords().map(str::to_string).collect(),
            command_min_s: config.command_min_s,
            command_max_s: config.command_max_s,
        }
    }
}

fn closed() -> Error {
    Error::Speech("input closed".into())
}

impl SpeechSource for ConsoleSpeech {
    fn listen_keyword(&mut self) -> jacket_core::Result<String> {
        loop {
            let line = self.lines.recv().map_err(|_| closed())?;
            if self.keywords.contains(&line) {
                log::debug!("Keyword: {line}");
                return Ok(line);
            }
            log::debug!("Not a keyword: {line:?}");
        }
    }

    fn listen_command(&mut self) -> jacket_core::Result<Heard> {
        let started = Instant::now();
        let window = ListenWindow::new(0.0, self.command_min_s, self.command_max_s);
        // A typed line arrives whole, so the window never sees speech in progress.
        let wait = window.remaining(started.elapsed().as_secs_f64(), false);
        match self.lines.recv_timeout(Duration::from_secs_f64(wait)) {
            Ok(text) => Ok(Heard {
                text: Some(text),
                score: None,
            }),
            Err(RecvTimeoutError::Timeout) => {
                log::debug!("No command within {wait:.1}s");
                Ok(Heard::default())
            }
            Err(RecvTimeoutError::Disconnected) => Err(closed()),
        }
    }
}
