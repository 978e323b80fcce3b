//! The append run: open the container, then each input in turn.

use crate::report::{InputReport, RunReport};
use std::path::{Path, PathBuf};
use tracing::info;
use uefappend_core::{Config, ContainerSession, CoreResult};

/// Appends `inputs` to the container at `target`.
///
/// Inputs that cannot be opened or read, or that end inside a record,
/// are reported and skipped; a container failure aborts the run.
pub fn run(target: &Path, inputs: &[PathBuf], config: Config) -> CoreResult<RunReport> {
    let mut session = ContainerSession::open(target, config)?;
    session.ensure_header()?;

    let mut report = RunReport::new(target, session.is_new());
    for input in inputs {
        let outcome = session.append_file(input)?;
        report.push(InputReport::new(input, &outcome));
    }
    session.finish()?;

    info!(
        container = %target.display(),
        records = report.total.records,
        blocks = report.total.blocks,
        skipped = report.total.skipped,
        "append complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uefappend_core::CoreError;
    use uefappend_testkit::prelude::*;

    #[test]
    fn run_creates_container_and_reports() {
        let ws = TempWorkspace::new();
        let hello = ws.write_input("hello.atm", &hello_vector().input);
        let missing = ws.path().join("missing.atm");

        let report = run(&ws.container_path(), &[missing, hello], Config::default()).unwrap();
        assert!(report.created);
        assert_eq!(report.inputs.len(), 2);
        assert_eq!(report.inputs[0].status, "skipped");
        assert_eq!(report.inputs[1].status, "appended");
        assert_eq!(report.total.records, 1);
        assert_eq!(report.total.skipped, 1);

        assert_bytes_eq(&ws.read_container(), &hello_vector().expected);
    }

    #[test]
    fn run_continues_past_unreadable_input() {
        let ws = TempWorkspace::new();
        let folder = ws.path().join("folder.atm");
        std::fs::create_dir(&folder).unwrap();
        let hello = ws.write_input("hello.atm", &hello_vector().input);

        let report = run(&ws.container_path(), &[folder, hello], Config::default()).unwrap();
        assert_eq!(report.inputs[0].status, "skipped");
        assert_eq!(report.inputs[1].status, "appended");
        assert_eq!(report.total.skipped, 1);

        assert_bytes_eq(&ws.read_container(), &hello_vector().expected);
    }

    #[test]
    fn run_rejects_foreign_target() {
        let ws = TempWorkspace::new();
        std::fs::write(ws.container_path(), b"GIF89a").unwrap();
        let hello = ws.write_input("hello.atm", &hello_vector().input);

        let result = run(&ws.container_path(), &[hello], Config::default());
        assert!(matches!(result, Err(CoreError::WrongFileType)));
        assert_eq!(ws.read_container(), b"GIF89a");
    }
}
