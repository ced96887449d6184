//! Cross-job error aggregation
//!
//! FFmpeg failures are data, not control flow: each job hands back a list
//! of error strings, the report collects them, and the whole run still
//! exits zero. In batch mode every entry's errors sit under a labelled
//! header so one bad file out of fifty is easy to find.

use crate::console::Console;
use colored::Colorize;

/// One rendered line of the final report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    /// Labelled block start: `INPUT <index> of <total>: <entry>`
    Header {
        index: usize,
        total: usize,
        entry: String,
    },
    /// Separator between labelled blocks
    Blank,
    /// Verbatim error text from the job runner
    Error(String),
}

/// Accumulated error log for a whole run
#[derive(Debug, Clone, Default)]
pub struct ErrorReport {
    lines: Vec<ReportLine>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unlabelled errors (single-run mode)
    pub fn extend_flat(&mut self, errors: Vec<String>) {
        self.lines.extend(errors.into_iter().map(ReportLine::Error));
    }

    /// Append one batch entry's errors under a header (batch mode)
    ///
    /// An entry without errors contributes nothing. A blank separator
    /// precedes every labelled block except the first.
    pub fn add_batch_entry(
        &mut self,
        index: usize,
        total: usize,
        entry: &str,
        errors: Vec<String>,
    ) {
        if errors.is_empty() {
            return;
        }
        if !self.lines.is_empty() {
            self.lines.push(ReportLine::Blank);
        }
        self.lines.push(ReportLine::Header {
            index,
            total,
            entry: entry.to_string(),
        });
        self.lines.extend(errors.into_iter().map(ReportLine::Error));
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    /// Print the consolidated report; nothing is emitted when empty
    pub fn print(&self, console: &Console) {
        if self.is_empty() {
            return;
        }
        console.write(&format!("\n{}\n", "ERROR LOG:".on_red().bold()));
        for line in &self.lines {
            match line {
                ReportLine::Header {
                    index,
                    total,
                    entry,
                } => console.write(&format!(
                    "{} {}\n",
                    format!("INPUT {} of {}:", index, total).on_green().bold(),
                    entry.green().bold()
                )),
                ReportLine::Blank => console.write("\n"),
                ReportLine::Error(text) => console.write(&format!("{}\n", text)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_errors_are_kept_verbatim_and_unlabelled() {
        let mut report = ErrorReport::new();
        report.extend_flat(vec!["boom".to_string(), "bang".to_string()]);

        assert_eq!(
            report.lines(),
            [
                ReportLine::Error("boom".to_string()),
                ReportLine::Error("bang".to_string()),
            ]
        );
    }

    #[test]
    fn entries_without_errors_contribute_nothing() {
        let mut report = ErrorReport::new();
        report.add_batch_entry(1, 3, "a.mov", vec![]);
        report.add_batch_entry(2, 3, "b.mov", vec![]);

        assert!(report.is_empty());
    }

    #[test]
    fn labelled_blocks_are_separated_by_blank_lines() {
        let mut report = ErrorReport::new();
        report.add_batch_entry(1, 3, "a.mov", vec!["first".to_string()]);
        report.add_batch_entry(2, 3, "b.mov", vec![]);
        report.add_batch_entry(3, 3, "c.mov", vec!["third".to_string()]);

        assert_eq!(
            report.lines(),
            [
                ReportLine::Header {
                    index: 1,
                    total: 3,
                    entry: "a.mov".to_string()
                },
                ReportLine::Error("first".to_string()),
                ReportLine::Blank,
                ReportLine::Header {
                    index: 3,
                    total: 3,
                    entry: "c.mov".to_string()
                },
                ReportLine::Error("third".to_string()),
            ]
        );
    }

    #[test]
    fn first_labelled_block_has_no_leading_blank() {
        let mut report = ErrorReport::new();
        report.add_batch_entry(2, 5, "b.mov", vec!["oops".to_string()]);

        assert!(matches!(report.lines()[0], ReportLine::Header { .. }));
    }
}
