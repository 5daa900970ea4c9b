//! Interactive wizard: one section per step, list fields edited in place.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::form::{Entry, FieldKind, FieldSpec, FormSchema, SubFormat, SubfieldSpec, validate};
use crate::domain::{AppError, FormKind, FormRecord, Scope, ValidationErrors, WizardNavigator};
use crate::ports::{DraftStore, FieldPrompt, ListAction, WizardAction, WizardPrompter};

/// Label shown for the blank choice of an optional select.
const NONE_OPTION: &str = "(none)";

#[derive(Debug, Clone, PartialEq)]
pub struct WizardOutcome {
    pub record: FormRecord,
    /// Where the record was written; `None` when the user quit.
    pub saved: Option<PathBuf>,
}

pub struct WizardOptions<'a> {
    pub kind: FormKind,
    pub output: &'a Path,
    /// Existing draft to start from.
    pub from: Option<&'a Path>,
    pub now: DateTime<Utc>,
}

/// Run the wizard until the user finishes with a valid record or quits.
pub fn execute(
    store: &impl DraftStore,
    prompter: &mut dyn WizardPrompter,
    options: WizardOptions<'_>,
) -> Result<WizardOutcome, AppError> {
    let mut record = match options.from {
        Some(path) => store.load(options.kind, path)?,
        None => FormRecord::new(options.kind),
    };
    let schema = options.kind.schema();
    let mut navigator = WizardNavigator::new(schema)?;

    loop {
        let section = navigator.current();
        if !edit_section(prompter, &mut record, schema, section)? {
            return Ok(WizardOutcome { record, saved: None });
        }

        let action = prompter.step_action(
            navigator.sections(),
            navigator.index(),
            navigator.is_last(),
        )?;
        match action.unwrap_or(WizardAction::Quit) {
            WizardAction::Next => {
                let errors = validate(&record, Scope::Section(section), options.now)?;
                if !errors.is_valid() {
                    prompter.show_errors(&errors);
                }
                navigator.next(|_| errors.is_valid());
            }
            WizardAction::Previous => {
                navigator.previous();
            }
            WizardAction::Jump(index) => navigator.go_to(index)?,
            WizardAction::Finish => {
                let errors = validate(&record, Scope::All, options.now)?;
                if errors.is_valid() {
                    store.save(options.output, &record)?;
                    log::info!("Saved {} draft to {}", options.kind, options.output.display());
                    return Ok(WizardOutcome { record, saved: Some(options.output.to_path_buf()) });
                }
                prompter.show_errors(&errors);
                if let Some(index) = first_invalid_section(schema, &errors) {
                    navigator.go_to(index)?;
                }
            }
            WizardAction::Quit => return Ok(WizardOutcome { record, saved: None }),
        }
    }
}

/// Prompt every field of `section`. Returns `false` when a prompt was cancelled.
fn edit_section(
    prompter: &mut dyn WizardPrompter,
    record: &mut FormRecord,
    schema: &FormSchema,
    section: &str,
) -> Result<bool, AppError> {
    for field in schema.fields_in(section) {
        let answered = match field.kind {
            FieldKind::Flag => match prompter.confirm(field.label, record.flag(field.key))? {
                Some(value) => {
                    record.set_flag(field.key, value)?;
                    true
                }
                None => false,
            },
            FieldKind::Choice(options) => {
                let current = record.text(field.key).to_string();
                match select_choice(prompter, field.label, options, field.required, &current)? {
                    Some(value) => {
                        record.set_text(field.key, value)?;
                        true
                    }
                    None => false,
                }
            }
            FieldKind::List(_) => edit_list(prompter, record, field)?,
            FieldKind::Entries(subfields) => edit_entries(prompter, record, field, subfields)?,
            _ => {
                let current = record.text(field.key).to_string();
                let prompt = FieldPrompt { label: field.label, help: field.help, current: &current };
                match prompter.input(prompt)? {
                    Some(value) => {
                        record.set_text(field.key, value.trim())?;
                        true
                    }
                    None => false,
                }
            }
        };
        if !answered {
            return Ok(false);
        }
    }
    Ok(true)
}

fn edit_list(
    prompter: &mut dyn WizardPrompter,
    record: &mut FormRecord,
    field: &FieldSpec,
) -> Result<bool, AppError> {
    loop {
        let items = record.list(field.key).to_vec();
        let Some(action) = prompter.list_action(field.label, &items)? else {
            return Ok(false);
        };
        let index = match action {
            ListAction::Done => return Ok(true),
            ListAction::Remove(index) => {
                record.remove_item(field.key, index)?;
                continue;
            }
            ListAction::Add => record.add_item(field.key, "")? - 1,
            ListAction::Edit(index) => index,
        };
        let label = item_label(field.label, index);
        let current = record.list(field.key).get(index).cloned().unwrap_or_default();
        let prompt = FieldPrompt { label: &label, help: field.help, current: &current };
        match prompter.input(prompt)? {
            Some(value) => record.update_item(field.key, index, value.trim())?,
            None => return Ok(false),
        }
    }
}

fn edit_entries(
    prompter: &mut dyn WizardPrompter,
    record: &mut FormRecord,
    field: &FieldSpec,
    subfields: &[SubfieldSpec],
) -> Result<bool, AppError> {
    loop {
        let summaries: Vec<String> =
            record.entries(field.key).iter().map(|entry| summarize_entry(entry, subfields)).collect();
        let Some(action) = prompter.list_action(field.label, &summaries)? else {
            return Ok(false);
        };
        let index = match action {
            ListAction::Done => return Ok(true),
            ListAction::Remove(index) => {
                record.remove_item(field.key, index)?;
                continue;
            }
            ListAction::Add => record.add_entry(field.key)? - 1,
            ListAction::Edit(index) => index,
        };
        if record.entries(field.key).get(index).is_none() {
            return Err(AppError::IndexOutOfRange {
                field: field.key.to_string(),
                index,
                len: record.entries(field.key).len(),
            });
        }

        for sub in subfields {
            let label = format!("{} {}", item_label(field.label, index), sub.label);
            let current = record.entries(field.key)[index].get(sub.key).cloned().unwrap_or_default();
            let answer = match sub.format {
                SubFormat::Choice(options) => {
                    select_choice(prompter, &label, options, sub.required, &current)?
                }
                _ => prompter
                    .input(FieldPrompt { label: &label, help: None, current: &current })?
                    .map(|value| value.trim().to_string()),
            };
            match answer {
                Some(value) => record.update_entry(field.key, index, sub.key, &value)?,
                None => return Ok(false),
            }
        }
    }
}

/// Select among `options`; optional choices get a leading blank option.
fn select_choice(
    prompter: &mut dyn WizardPrompter,
    label: &str,
    options: &[&'static str],
    required: bool,
    current: &str,
) -> Result<Option<String>, AppError> {
    let mut items: Vec<&str> = Vec::with_capacity(options.len() + 1);
    if !required {
        items.push(NONE_OPTION);
    }
    items.extend_from_slice(options);

    let offset = usize::from(!required);
    let selected = options.iter().position(|option| *option == current.trim()).map(|i| i + offset);
    let Some(index) = prompter.select(label, &items, selected.unwrap_or(0))? else {
        return Ok(None);
    };
    let value = match items.get(index) {
        Some(&NONE_OPTION) | None => "",
        Some(option) => *option,
    };
    Ok(Some(value.to_string()))
}

fn item_label(label: &str, index: usize) -> String {
    format!("{} #{}", label, index + 1)
}

fn summarize_entry(entry: &Entry, subfields: &[SubfieldSpec]) -> String {
    subfields
        .first()
        .and_then(|sub| entry.get(sub.key))
        .filter(|value| !value.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| "(empty)".to_string())
}

/// Wizard index of the earliest section holding an error.
fn first_invalid_section(schema: &FormSchema, errors: &ValidationErrors) -> Option<usize> {
    errors
        .invalid()
        .filter_map(|(key, _)| {
            let field = key.split('[').next().unwrap_or(key);
            let section = schema.field(field)?.section;
            schema.sections.iter().position(|spec| spec.id == section)
        })
        .min()
}
