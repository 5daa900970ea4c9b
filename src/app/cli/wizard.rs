use std::path::{Path, PathBuf};

use crate::app::api;
use crate::app::commands::init::default_draft_path;
use crate::domain::{AppError, FormKind};

use super::prompter::DialoguerPrompter;

pub fn run_wizard(
    kind: FormKind,
    output: Option<PathBuf>,
    from: Option<&Path>,
) -> Result<(), AppError> {
    let output = output.unwrap_or_else(|| default_draft_path(kind));
    let mut prompter = DialoguerPrompter::new(kind);

    let outcome = api::wizard(kind, &output, from, &mut prompter)?;
    match outcome.saved {
        Some(path) => {
            println!("✅ Saved {} draft to {}", kind, path.display());
            println!("  Next: sovseas submit {} {}", kind, path.display());
        }
        None => println!("Wizard closed without saving"),
    }
    Ok(())
}
