//! Line reader for batch list files

use std::fs;
use std::io;

/// Read a file fully into memory as a list of lines
///
/// Line terminators (`\n` or `\r\n`) are stripped. Empty lines are kept;
/// callers decide whether they are meaningful.
pub fn read_lines(path: &str) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}
