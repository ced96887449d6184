//! Orchestration of single and batch runs
//!
//! Control flow is deliberately synchronous: assemble the command, decide
//! between single-run and batch-run, and drive one FFmpeg job at a time.
//! The only concurrent actor is the interrupt listener, observed through
//! the cancel token between batch entries.

use crate::batch::{build_variant, BatchList};
use crate::cancel::CancelToken;
use crate::command::{assemble, CommandLine};
use crate::console::Console;
use crate::error::FfbatchResult;
use crate::presets::PresetCatalog;
use crate::report::ErrorReport;
use crate::runner::JobRunner;
use tracing::debug;

/// Wires tokenizer, batch resolver, runner and report together
pub struct App<R: JobRunner> {
    runner: R,
    console: Console,
    cancel: CancelToken,
}

impl<R: JobRunner> App<R> {
    pub fn new(runner: R, console: Console, cancel: CancelToken) -> Self {
        Self {
            runner,
            console,
            cancel,
        }
    }

    /// Execute one invocation and return the consolidated error report
    ///
    /// Prints the report (nothing when empty) and, in batch mode, the
    /// completion bell. Configuration errors (duplicate batch input,
    /// unreadable batch list) propagate; per-job errors only ever land in
    /// the report.
    pub fn run(
        &mut self,
        raw_args: &[String],
        presets: &PresetCatalog,
    ) -> FfbatchResult<ErrorReport> {
        let assembled = assemble(raw_args, presets)?;
        let mut report = ErrorReport::new();
        let mut batch_ran = false;

        match assembled.batch_input {
            Some(batch_input) => {
                batch_ran = self.run_batch(&assembled.command, &batch_input, &mut report)?;
            }
            None => {
                let errors = self.runner.run(&assembled.command, false);
                report.extend_flat(errors);
            }
        }

        report.print(&self.console);
        if batch_ran {
            self.console.bell();
        }
        Ok(report)
    }

    fn run_batch(
        &mut self,
        command: &CommandLine,
        batch_input: &str,
        report: &mut ErrorReport,
    ) -> FfbatchResult<bool> {
        // quoting may have folded the recorded token into a larger one;
        // with no substitution point there is nothing to run
        let Some(input_index) = command.position_of(batch_input) else {
            debug!(batch_input, "batch input not present in assembled command");
            return Ok(false);
        };

        let list = BatchList::load(batch_input)?;
        let total = list.len();
        debug!(total, list = batch_input, "starting batch run");

        for (i, entry) in list.entries().iter().enumerate() {
            if self.cancel.is_cancelled() {
                debug!("cancellation observed, skipping remaining entries");
                break;
            }
            let variant = build_variant(command, input_index, entry);
            self.console.batch_banner(i + 1, total);
            let errors = self.runner.run(&variant, true);
            report.add_batch_entry(i + 1, total, entry, errors);
        }

        Ok(true)
    }
}
