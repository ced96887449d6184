//! Preset expansion for encode shorthands
//!
//! A preset is a single `@name` token that stands for a run of raw FFmpeg
//! arguments, e.g. `@x264` instead of `-c:v libx264 -preset medium -crf 18`.
//! Anything the catalog does not recognize passes through unchanged, so the
//! expander is safe to apply to every bare token on the command line.
//!
//! Users can add or override presets in `<config_dir>/ffbatch/presets.toml`:
//!
//! ```toml
//! [presets]
//! "@webm" = ["-c:v", "libvpx-vp9", "-b:v", "0", "-crf", "30"]
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Mapping from preset tokens to the argument runs they expand to
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets: HashMap<String, Vec<String>>,
}

/// On-disk layout of the user preset file
#[derive(Debug, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: HashMap<String, Vec<String>>,
}

impl PresetCatalog {
    /// Catalog with only the built-in shorthands
    pub fn builtin() -> Self {
        let mut presets = HashMap::new();
        let entries: [(&str, &[&str]); 6] = [
            (
                "@x264",
                &["-c:v", "libx264", "-preset", "medium", "-crf", "18", "-pix_fmt", "yuv420p"],
            ),
            (
                "@x265",
                &["-c:v", "libx265", "-preset", "medium", "-crf", "21"],
            ),
            ("@aac", &["-c:a", "aac", "-b:a", "192k"]),
            ("@copy", &["-c", "copy"]),
            ("@mute", &["-an"]),
            ("@novideo", &["-vn"]),
        ];
        for (name, args) in entries {
            presets.insert(
                name.to_string(),
                args.iter().map(|a| a.to_string()).collect(),
            );
        }
        Self { presets }
    }

    /// Built-ins merged with the user catalog, if one exists
    ///
    /// A missing file is normal. A malformed one is reported and skipped;
    /// preset loading is never fatal.
    pub fn load() -> Self {
        let mut catalog = Self::builtin();
        let Some(path) = Self::user_catalog_path() else {
            return catalog;
        };
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return catalog,
        };
        match toml::from_str::<PresetFile>(&raw) {
            Ok(file) => {
                debug!(path = %path.display(), count = file.presets.len(), "loaded user presets");
                catalog.presets.extend(file.presets);
            }
            Err(e) => warn!(path = %path.display(), "ignoring malformed preset file: {e}"),
        }
        catalog
    }

    /// Expand one token; identity for anything that is not a known preset
    pub fn expand(&self, token: &str) -> Vec<String> {
        match self.presets.get(token) {
            Some(args) => args.clone(),
            None => vec![token.to_string()],
        }
    }

    fn user_catalog_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ffbatch").join("presets.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tokens_expand_to_themselves() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(catalog.expand("clip.mov"), vec!["clip.mov"]);
        assert_eq!(catalog.expand("-map"), vec!["-map"]);
        assert_eq!(catalog.expand(""), vec![""]);
    }

    #[test]
    fn known_presets_expand_to_argument_runs() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(catalog.expand("@copy"), vec!["-c", "copy"]);
        assert_eq!(
            catalog.expand("@aac"),
            vec!["-c:a", "aac", "-b:a", "192k"]
        );
    }

    #[test]
    fn user_entries_override_builtins() {
        let mut catalog = PresetCatalog::builtin();
        let file: PresetFile = toml::from_str(
            r#"
            [presets]
            "@copy" = ["-c:v", "copy"]
            "@gif" = ["-vf", "fps=12", "-loop", "0"]
            "#,
        )
        .unwrap();
        catalog.presets.extend(file.presets);

        assert_eq!(catalog.expand("@copy"), vec!["-c:v", "copy"]);
        assert_eq!(catalog.expand("@gif"), vec!["-vf", "fps=12", "-loop", "0"]);
    }
}
