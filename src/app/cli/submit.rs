use std::path::Path;

use crate::app::api;
use crate::domain::{AppError, FormKind, SubmissionOutcome};

use super::draft::{print_errors, print_preview};

pub fn run_submit(
    kind: FormKind,
    draft: &Path,
    dry_run: bool,
    config: Option<&Path>,
) -> Result<i32, AppError> {
    if dry_run {
        let outcome = api::preview(kind, draft, config)?;
        print_preview(&outcome)?;
        println!();
        println!("Dry run: nothing was uploaded or sent");
        return Ok(0);
    }

    let report = api::submit(kind, draft, config)?;
    match &report.outcome {
        SubmissionOutcome::Succeeded { tx_hash, destination } => {
            println!("✅ Created {} in transaction {}", kind, tx_hash);
            println!("  View it at {}", destination);
        }
        SubmissionOutcome::Failed { message } => {
            if !report.errors.is_valid() {
                print_errors(&report.errors);
            }
            eprintln!("❌ Submission failed: {}", message);
        }
        SubmissionOutcome::Abandoned => eprintln!("Submission abandoned"),
    }
    Ok(report.exit_code())
}
