//! Command assembly: argument tokenizer/joiner and batch input detection
//!
//! The shell splits a quoted argument like `\"my file.mov\"` into several
//! raw tokens before ffbatch ever sees it. This module reassembles those
//! groups into single indivisible tokens, runs every bare token through the
//! preset expander, and records the `.txt` batch input candidate while
//! scanning.

use crate::error::{FfbatchError, FfbatchResult};
use crate::presets::PresetCatalog;
use std::fmt;
use tracing::debug;

/// Banner-suppression flag every command starts with
const BASELINE_TOKEN: &str = "-hide_banner";

/// An ordered FFmpeg argument list
///
/// Token order is meaningful and preserved verbatim; only the batch
/// variant builder substitutes or renames specific positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// A command containing only the baseline token
    pub fn baseline() -> Self {
        Self {
            tokens: vec![BASELINE_TOKEN.to_string()],
        }
    }

    /// Wrap an existing token sequence
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn push(&mut self, token: String) {
        self.tokens.push(token);
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Position of the first token equal to `token`
    pub fn position_of(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t == token)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

/// Result of scanning the raw argument list
#[derive(Debug)]
pub struct Assembled {
    /// The fully joined and expanded command
    pub command: CommandLine,
    /// The `.txt` token recorded after a `-i` marker, if any
    pub batch_input: Option<String>,
}

/// Assemble the raw shell-split argument list into a command
///
/// Joining rules:
/// - a token starting with `"` but not ending with one opens a group;
///   following tokens are appended space-separated until one ends with `"`;
///   the group is stripped of quote characters and appended as a single
///   token, bypassing preset expansion
/// - a token both starting and ending with `"` (a lone `"` counts: the
///   same character opens and closes) is quote-stripped and expanded as a
///   single unit
/// - every other token goes through the preset expander, which may append
///   several tokens
///
/// The batch candidate scan runs over the raw list, before joining or
/// expansion. A second `-i *.txt` occurrence is a configuration error.
pub fn assemble(raw_args: &[String], presets: &PresetCatalog) -> FfbatchResult<Assembled> {
    let mut command = CommandLine::baseline();
    let mut batch_input: Option<String> = None;
    let mut joined = String::new();
    let mut joining = false;

    for (i, arg) in raw_args.iter().enumerate() {
        if arg == "-i" {
            if let Some(next) = raw_args.get(i + 1) {
                if next.ends_with(".txt") {
                    if batch_input.is_some() {
                        return Err(FfbatchError::DuplicateBatchInput);
                    }
                    batch_input = Some(next.clone());
                }
            }
        }

        if joining {
            joined.push(' ');
            joined.push_str(arg);
            if arg.ends_with('"') {
                command.push(joined.replace('"', ""));
                joined.clear();
                joining = false;
            }
        } else if arg.starts_with('"') && !arg.ends_with('"') {
            joined.clear();
            joined.push_str(arg);
            joining = true;
        } else if arg.starts_with('"') {
            for token in presets.expand(&arg.replace('"', "")) {
                command.push(token);
            }
        } else {
            for token in presets.expand(arg) {
                command.push(token);
            }
        }
    }

    if joining {
        // unbalanced quoting: the original drops the dangling group
        debug!(dangling = %joined, "discarding unterminated quoted group");
    }

    debug!(command = %command, "assembled command");
    Ok(Assembled {
        command,
        batch_input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn assemble_ok(list: &[&str]) -> Assembled {
        assemble(&args(list), &PresetCatalog::builtin()).unwrap()
    }

    #[test]
    fn command_always_starts_with_the_baseline_token() {
        let assembled = assemble_ok(&[]);
        assert_eq!(assembled.command.tokens(), ["-hide_banner"]);
    }

    #[test]
    fn plain_tokens_are_appended_in_order() {
        let assembled = assemble_ok(&["-i", "clip.mov", "-c:v", "libx264", "out.mp4"]);
        assert_eq!(
            assembled.command.tokens(),
            ["-hide_banner", "-i", "clip.mov", "-c:v", "libx264", "out.mp4"]
        );
        assert!(assembled.batch_input.is_none());
    }

    #[test]
    fn quoted_groups_join_into_one_token() {
        let assembled = assemble_ok(&["-i", "\"my", "summer", "clip.mov\"", "out.mp4"]);
        assert_eq!(
            assembled.command.tokens(),
            ["-hide_banner", "-i", "my summer clip.mov", "out.mp4"]
        );
    }

    #[test]
    fn token_count_is_plain_tokens_plus_one_per_group() {
        let assembled = assemble_ok(&["a", "\"b", "c\"", "d", "\"e", "f", "g\""]);
        // 2 plain tokens + 2 groups + baseline
        assert_eq!(assembled.command.len(), 5);
    }

    #[test]
    fn fully_quoted_token_is_stripped() {
        let assembled = assemble_ok(&["-i", "\"clip.mov\""]);
        assert_eq!(assembled.command.tokens(), ["-hide_banner", "-i", "clip.mov"]);
    }

    #[test]
    fn lone_quote_becomes_an_empty_token_without_panicking() {
        let assembled = assemble_ok(&["\""]);
        assert_eq!(assembled.command.tokens(), ["-hide_banner", ""]);
    }

    #[test]
    fn presets_expand_inline() {
        let assembled = assemble_ok(&["-i", "clip.mov", "@copy", "out.mkv"]);
        assert_eq!(
            assembled.command.tokens(),
            ["-hide_banner", "-i", "clip.mov", "-c", "copy", "out.mkv"]
        );
    }

    #[test]
    fn joined_groups_bypass_preset_expansion() {
        let assembled = assemble_ok(&["\"@copy", "notes\""]);
        assert_eq!(assembled.command.tokens(), ["-hide_banner", "@copy notes"]);
    }

    #[test]
    fn quoted_single_tokens_still_expand() {
        let assembled = assemble_ok(&["\"@copy\""]);
        assert_eq!(assembled.command.tokens(), ["-hide_banner", "-c", "copy"]);
    }

    #[test]
    fn txt_after_input_marker_is_the_batch_candidate() {
        let assembled = assemble_ok(&["-i", "list.txt", "out.mp4"]);
        assert_eq!(assembled.batch_input.as_deref(), Some("list.txt"));
    }

    #[test]
    fn txt_without_input_marker_is_not_a_candidate() {
        let assembled = assemble_ok(&["list.txt", "-i", "clip.mov"]);
        assert!(assembled.batch_input.is_none());
    }

    #[test]
    fn second_batch_candidate_is_a_configuration_error() {
        let result = assemble(
            &args(&["-i", "a.txt", "-i", "b.txt"]),
            &PresetCatalog::builtin(),
        );
        assert!(matches!(result, Err(FfbatchError::DuplicateBatchInput)));
    }

    #[test]
    fn repeating_the_same_list_is_also_rejected() {
        let result = assemble(
            &args(&["-i", "a.txt", "-i", "a.txt"]),
            &PresetCatalog::builtin(),
        );
        assert!(matches!(result, Err(FfbatchError::DuplicateBatchInput)));
    }

    #[test]
    fn trailing_input_marker_is_harmless() {
        let assembled = assemble_ok(&["-i"]);
        assert_eq!(assembled.command.tokens(), ["-hide_banner", "-i"]);
        assert!(assembled.batch_input.is_none());
    }

    #[test]
    fn unterminated_group_is_dropped() {
        let assembled = assemble_ok(&["out.mp4", "\"dangling", "group"]);
        assert_eq!(assembled.command.tokens(), ["-hide_banner", "out.mp4"]);
    }
}
