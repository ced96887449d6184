//! CLI surface for ffbatch
//!
//! ffbatch does not interpret FFmpeg's argument grammar — everything on
//! the command line passes through verbatim, so there is nothing for clap
//! to parse. clap only renders the usage screen shown when the program is
//! invoked without arguments.

use clap::Command;

/// Usage metadata for the zero-argument invocation
pub fn usage() -> Command {
    Command::new("ffbatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            "ffbatch is an FFmpeg wrapper for minimalistic progress visualization \
             while keeping the flexibility of the CLI",
        )
        .override_usage(
            "ffbatch [global_options] {[input_file_options] -i input_file} ... \
             {[output_file_options] output_file} ...",
        )
        .after_help(
            "Arguments are passed to ffmpeg unchanged. To pass an argument containing \
             spaces, surround it with escaped double quotes: \\\"input file.mov\\\".\n\n\
             Passing a .txt file as an input (-i files.txt) starts batch execution: \
             every line of the file becomes its own ffmpeg job, and bare output names \
             are prefixed with each entry's stem.\n\n\
             Preset shorthands such as @x264 or @copy expand to full argument runs; \
             user presets live in <config_dir>/ffbatch/presets.toml.\n\n\
             FFmpeg documentation: https://www.ffmpeg.org/ffmpeg-all.html",
        )
}

/// Print the usage screen to stdout
pub fn print_usage() {
    let _ = usage().print_help();
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_metadata_is_well_formed() {
        // render_help panics on inconsistent builder state
        let help = usage().render_help().to_string();
        assert!(help.contains("ffbatch"));
        assert!(help.contains("-i input_file"));
        assert!(help.contains("batch execution"));
    }
}
