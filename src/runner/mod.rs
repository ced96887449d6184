//! Job execution: spawning FFmpeg and condensing its stderr
//!
//! FFmpeg reports everything on stderr: status lines terminated with `\r`,
//! diagnostics terminated with `\n`, and the interactive overwrite prompt
//! with no terminator at all. The runner splits that stream on both
//! delimiters, redraws status as a single overwritten progress line, and
//! collects diagnostic lines that look like errors for the final report.

use crate::command::CommandLine;
use crate::console::Console;
use colored::Colorize;
use regex::Regex;
use std::io::Read;
use std::process::{Command, Stdio};
use tracing::debug;

/// Seam between the orchestrator and job execution
///
/// A run returns the job's error log as display strings; per-job failures
/// are data for the aggregator, never control-flow errors.
pub trait JobRunner {
    fn run(&mut self, command: &CommandLine, batch_mode: bool) -> Vec<String>;
}

/// Runs one command against the `ffmpeg` executable
pub struct FfmpegRunner {
    console: Console,
    program: String,
    time_pattern: Regex,
    speed_pattern: Regex,
    error_pattern: Regex,
}

/// Per-job progress display state, created fresh for every run so one
/// entry's samples never bleed into the next
#[derive(Default)]
struct ProgressState {
    speed_samples: Vec<f64>,
    drawn: bool,
}

impl ProgressState {
    fn average_speed(&self) -> Option<f64> {
        if self.speed_samples.is_empty() {
            return None;
        }
        Some(self.speed_samples.iter().sum::<f64>() / self.speed_samples.len() as f64)
    }
}

impl FfmpegRunner {
    pub fn new(console: Console) -> Self {
        Self {
            console,
            program: "ffmpeg".to_string(),
            time_pattern: Regex::new(r"time=(\S+)").expect("hard-coded pattern"),
            speed_pattern: Regex::new(r"speed=\s*([0-9.]+)x").expect("hard-coded pattern"),
            error_pattern: Regex::new(
                r"(?i)\b(error|invalid|failed|unable|no such file|not found|permission denied|unsupported|conversion failed|does not contain)\b",
            )
            .expect("hard-coded pattern"),
        }
    }

    fn consume_stderr<R: Read>(
        &self,
        mut stderr: R,
        state: &mut ProgressState,
        errors: &mut Vec<String>,
    ) {
        let mut buf = [0u8; 4096];
        let mut pending: Vec<u8> = Vec::new();

        loop {
            let n = match stderr.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(_) => break,
            };
            for &byte in &buf[..n] {
                if byte == b'\n' || byte == b'\r' {
                    let line = String::from_utf8_lossy(&pending).into_owned();
                    pending.clear();
                    self.observe_line(&line, state, errors);
                } else {
                    pending.push(byte);
                }
            }
            // FFmpeg blocks on stdin after the overwrite prompt without
            // ever terminating the line; pass it through so the inherited
            // stdin can answer
            if pending.ends_with(b"[y/N] ") {
                let prompt = String::from_utf8_lossy(&pending).into_owned();
                pending.clear();
                self.console.write(&format!("\n{}", prompt));
            }
        }

        if !pending.is_empty() {
            let line = String::from_utf8_lossy(&pending).into_owned();
            self.observe_line(&line, state, errors);
        }
    }

    fn observe_line(&self, line: &str, state: &mut ProgressState, errors: &mut Vec<String>) {
        if line.is_empty() {
            return;
        }
        if line.starts_with("frame=") || line.starts_with("size=") {
            self.draw_progress(line, state);
            return;
        }
        if self.error_pattern.is_match(line) {
            debug!(line, "captured error line");
            errors.push(line.to_string());
        }
    }

    fn draw_progress(&self, line: &str, state: &mut ProgressState) {
        let time = self
            .time_pattern
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string());
        let speed = self
            .speed_pattern
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());

        if let Some(speed) = speed {
            state.speed_samples.push(speed);
        }

        let mut rendered = format!("time={}", time.as_deref().unwrap_or("N/A"))
            .cyan()
            .to_string();
        if let Some(speed) = speed {
            rendered.push_str(&format!(" speed={:.2}x", speed));
        }
        if let Some(avg) = state.average_speed() {
            rendered.push_str(&format!(" avg={:.2}x", avg).dimmed().to_string());
        }
        self.console.overwrite(&rendered);
        state.drawn = true;
    }
}

impl JobRunner for FfmpegRunner {
    fn run(&mut self, command: &CommandLine, batch_mode: bool) -> Vec<String> {
        debug!(command = %command, batch_mode, "spawning {}", self.program);

        let mut child = match Command::new(&self.program)
            .args(command.tokens())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return vec![format!("Failed to run {}: {}", self.program, e)],
        };

        let mut errors = Vec::new();
        let mut state = ProgressState::default();
        if let Some(stderr) = child.stderr.take() {
            self.consume_stderr(stderr, &mut state, &mut errors);
        }

        match child.wait() {
            Ok(status) => {
                if state.drawn {
                    self.console.write("\n");
                }
                debug!(%status, "job finished");
                if !status.success() && errors.is_empty() {
                    errors.push(format!("{} exited with {}", self.program, status));
                }
            }
            Err(e) => errors.push(format!("Failed to wait for {}: {}", self.program, e)),
        }
        errors
    }
}
