//! Batch resolution and per-entry command construction
//!
//! A `.txt` input stands for a list of media files, one per line. Each
//! line becomes its own FFmpeg job: a fresh copy of the assembled command
//! with the list token swapped for the entry and every bare output path
//! prefixed with the entry's stem, so ten inputs never fight over one
//! output name.

use crate::command::CommandLine;
use crate::error::{FfbatchError, FfbatchResult};
use crate::utils::lines::read_lines;
use crate::utils::path::strip_extension;

/// A batch list read fully into memory before any job is dispatched
#[derive(Debug, Clone)]
pub struct BatchList {
    entries: Vec<String>,
}

impl BatchList {
    /// Load a newline-delimited list, dropping empty lines
    pub fn load(path: &str) -> FfbatchResult<Self> {
        let entries = read_lines(path)
            .map_err(|source| FfbatchError::BatchListRead {
                path: path.to_string(),
                source,
            })?
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect();
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the command variant for one batch entry
///
/// The shared command is never mutated: each variant is a fresh copy, so
/// renaming one entry cannot leak into the next. Two passes:
///
/// 1. rename: a token is prefixed with `<stem>_` when it does not start
///    with `-` and its predecessor either does not start with `-` or is
///    the literal stream-selector `-1`. This renames bare output paths
///    while leaving flags and flag values alone. The heuristic is
///    deliberately literal; FFmpeg's grammar is not interpreted here.
/// 2. substitution: the token at `input_index` is replaced by the entry.
///
/// Deterministic: the same (command, entry) pair always produces the same
/// variant.
pub fn build_variant(command: &CommandLine, input_index: usize, entry: &str) -> CommandLine {
    let stem = strip_extension(entry);
    let mut tokens = command.tokens().to_vec();

    for i in 1..tokens.len() {
        let bare = !tokens[i].starts_with('-');
        let after_bare = !tokens[i - 1].starts_with('-') || tokens[i - 1] == "-1";
        if bare && after_bare {
            tokens[i] = format!("{}_{}", stem, tokens[i]);
        }
    }
    tokens[input_index] = entry.to_string();

    CommandLine::from_tokens(tokens)
}
