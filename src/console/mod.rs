//! Console output for interleaved status, progress and error text
//!
//! FFmpeg owns the terminal while a job runs, so everything user-facing
//! goes through this writer instead of `println!`: progress lines are
//! overwritten in place and every write is flushed immediately.

use colored::Colorize;
use std::io::{self, Write};

/// Handle for styled, flushed console output
#[derive(Clone, Debug, Default)]
pub struct Console;

impl Console {
    pub fn new() -> Self {
        Self
    }

    /// Write text to stdout and flush
    pub fn write(&self, text: &str) {
        let mut out = io::stdout();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    /// Overwrite the current line (carriage return + erase)
    pub fn overwrite(&self, text: &str) {
        self.write(&format!("\r\x1b[2K{}", text));
    }

    /// Print an error message with error styling to stderr
    pub fn error(&self, text: &str) {
        eprintln!("{}", text.red().bold());
    }

    /// Banner printed before each batch entry
    pub fn batch_banner(&self, index: usize, total: usize) {
        self.write(&format!(
            "\n{}\n",
            format!("INPUT {} of {}", index, total).on_green().bold()
        ));
    }

    /// Audible completion signal
    pub fn bell(&self) {
        self.write("\x07");
    }
}
