//! ffbatch entry point
//!
//! Usage mirrors FFmpeg itself:
//!
//! ```bash
//! ffbatch -i input.mov @x264 @aac output.mp4
//! ffbatch -i files.txt @x265 out.mkv   # one job per line of files.txt
//! ```
//!
//! Exit codes: 0 on completion, including completion with reported per-job
//! errors; non-zero only for configuration errors that stop the run before
//! any job starts.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use ffbatch::{cancel, cli, App, CancelToken, Console, FfmpegRunner, PresetCatalog};

fn main() {
    // ANSI styling on legacy Windows consoles
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    if raw_args.is_empty() {
        cli::print_usage();
        return;
    }

    let console = Console::new();
    if let Err(e) = run(&raw_args, &console) {
        console.error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(raw_args: &[String], console: &Console) -> Result<()> {
    let cancel_token = CancelToken::new();
    cancel::install_handler(cancel_token.clone())?;

    let presets = PresetCatalog::load();
    let runner = FfmpegRunner::new(console.clone());
    let mut app = App::new(runner, console.clone(), cancel_token);

    app.run(raw_args, &presets)?;
    Ok(())
}
