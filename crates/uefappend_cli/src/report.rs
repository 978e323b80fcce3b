//! Run summary in text or JSON.

use crate::OutputFormat;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use uefappend_core::AppendOutcome;

/// Summary of one run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Container path.
    pub container: String,
    /// Whether the container was created by this run.
    pub created: bool,
    /// Per-input results, in argument order.
    pub inputs: Vec<InputReport>,
    /// Totals over all inputs.
    pub total: Totals,
}

/// Result for a single input file.
#[derive(Debug, Serialize)]
pub struct InputReport {
    /// Input path.
    pub path: String,
    /// `appended`, `truncated` or `skipped`.
    pub status: &'static str,
    /// Records written.
    pub records: usize,
    /// Tape blocks written.
    pub blocks: usize,
    /// Payload bytes written.
    pub bytes: u64,
    /// Why the input was skipped or cut short.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Totals over a run.
#[derive(Debug, Default, Serialize)]
pub struct Totals {
    /// Records written.
    pub records: usize,
    /// Tape blocks written.
    pub blocks: usize,
    /// Payload bytes written.
    pub bytes: u64,
    /// Inputs skipped or cut short.
    pub skipped: usize,
}

impl RunReport {
    /// Starts an empty report for `container`.
    pub fn new(container: &Path, created: bool) -> Self {
        Self {
            container: container.display().to_string(),
            created,
            inputs: Vec::new(),
            total: Totals::default(),
        }
    }

    /// Adds an input's result.
    pub fn push(&mut self, input: InputReport) {
        self.total.records += input.records;
        self.total.blocks += input.blocks;
        self.total.bytes += input.bytes;
        if input.status != "appended" {
            self.total.skipped += 1;
        }
        self.inputs.push(input);
    }
}

impl InputReport {
    /// Describes the outcome of appending `path`.
    pub fn new(path: &Path, outcome: &AppendOutcome) -> Self {
        let summary = outcome.summary();
        let (status, reason) = match outcome {
            AppendOutcome::Appended(_) => ("appended", None),
            AppendOutcome::Truncated { reason, .. } => ("truncated", Some(reason.clone())),
            AppendOutcome::Skipped { reason } => ("skipped", Some(reason.clone())),
        };
        Self {
            path: path.display().to_string(),
            status,
            records: summary.records,
            blocks: summary.blocks,
            bytes: summary.bytes,
            reason,
        }
    }
}

/// Prints the report to stdout.
pub fn print(report: &RunReport, format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text => print!("{report}"),
    }
    Ok(())
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for input in &self.inputs {
            write!(
                f,
                "{:<9} {}: {} record(s), {} block(s), {} byte(s)",
                input.status, input.path, input.records, input.blocks, input.bytes
            )?;
            if let Some(reason) = &input.reason {
                write!(f, " ({reason})")?;
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "{} {}: {} record(s) in {} block(s)",
            if self.created { "created" } else { "updated" },
            self.container,
            self.total.records,
            self.total.blocks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uefappend_core::TranscodeSummary;

    fn sample() -> RunReport {
        let mut report = RunReport::new(Path::new("games.uef"), true);
        report.push(InputReport::new(
            Path::new("a.atm"),
            &AppendOutcome::Appended(TranscodeSummary {
                records: 2,
                blocks: 5,
                bytes: 1000,
            }),
        ));
        report.push(InputReport::new(
            Path::new("b.atm"),
            &AppendOutcome::Skipped {
                reason: "No such file or directory".into(),
            },
        ));
        report
    }

    #[test]
    fn totals_accumulate() {
        let report = sample();
        assert_eq!(report.total.records, 2);
        assert_eq!(report.total.blocks, 5);
        assert_eq!(report.total.bytes, 1000);
        assert_eq!(report.total.skipped, 1);
    }

    #[test]
    fn text_lists_each_input() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("appended  a.atm: 2 record(s)"));
        assert!(lines[1].ends_with("(No such file or directory)"));
        assert_eq!(lines[2], "created games.uef: 2 record(s) in 5 block(s)");
    }

    #[test]
    fn json_omits_missing_reason() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json["inputs"][0].get("reason").is_none());
        assert_eq!(json["inputs"][1]["status"], "skipped");
        assert_eq!(json["total"]["records"], 2);
    }
}
