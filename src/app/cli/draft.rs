//! Draft commands: init, schema, validate, preview.

use std::path::{Path, PathBuf};

use crate::app::api::{self, PreviewOutcome};
use crate::domain::{AppError, FormKind, ValidationErrors};

pub fn run_init(
    kind: FormKind,
    output: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<(), AppError> {
    let path = api::init(kind, output.as_deref(), config)?;
    println!("✅ Created {} draft at {}", kind, path.display());
    println!("  Next: sovseas validate {} {}", kind, path.display());
    Ok(())
}

pub fn run_schema(kind: FormKind) {
    for section in api::schema(kind) {
        println!("{} [{}]", section.title, section.id);
        for field in section.fields {
            let marker = if field.required { "*" } else { " " };
            print!("  {}{:<26} {:<28} {}", marker, field.key, field.kind, field.label);
            if let Some(default) = field.default {
                print!(" (default: {})", default);
            }
            println!();
        }
    }
    println!();
    println!("* required");
}

pub fn run_validate(kind: FormKind, draft: &Path, section: Option<&str>) -> Result<i32, AppError> {
    let outcome = api::validate(kind, draft, section)?;

    if outcome.errors.is_valid() {
        match section {
            Some(section) => println!("✅ Section '{}' of {} is valid", section, draft.display()),
            None => println!("✅ {} is a valid {} draft", draft.display(), kind),
        }
    } else {
        print_errors(&outcome.errors);
    }
    if let Some(days) = outcome.duration_days {
        println!("  Duration: {} day(s)", days);
    }
    Ok(outcome.exit_code)
}

pub fn run_preview(kind: FormKind, draft: &Path, config: Option<&Path>) -> Result<(), AppError> {
    let outcome = api::preview(kind, draft, config)?;
    print_preview(&outcome)
}

pub(super) fn print_preview(outcome: &PreviewOutcome) -> Result<(), AppError> {
    println!("Function: {}", outcome.signature);
    println!("Value: {} wei", outcome.plan.call.value);
    for (index, arg) in outcome.plan.call.args.iter().enumerate() {
        println!("  arg[{}] {}: {}", index, arg.type_name(), arg);
    }
    for (name, metadata) in &outcome.plan.metadata {
        println!();
        println!("{}:", name);
        println!("{}", serde_json::to_string_pretty(metadata)?);
    }
    if let Some(days) = outcome.duration_days {
        println!();
        println!("Duration: {} day(s)", days);
    }
    println!();
    println!("Calldata: {}", outcome.calldata_hex);
    Ok(())
}

pub(super) fn print_errors(errors: &ValidationErrors) {
    println!("❌ {} invalid field(s):", errors.invalid_count());
    for (key, message) in errors.invalid() {
        println!("  • {}: {}", key, message);
    }
}
