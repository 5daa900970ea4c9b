//! Terminal prompts for the wizard.

use std::io::ErrorKind;

use dialoguer::{Confirm, Error as DialoguerError, Input, Select};

use crate::domain::{AppError, FormKind, ValidationErrors};
use crate::ports::{FieldPrompt, ListAction, WizardAction, WizardPrompter};

const MENU_ADD: &str = "[add]";
const MENU_REMOVE: &str = "[remove]";
const MENU_DONE: &str = "[done]";

pub struct DialoguerPrompter {
    kind: FormKind,
}

impl DialoguerPrompter {
    pub fn new(kind: FormKind) -> Self {
        Self { kind }
    }
}

fn select_index(
    prompt: &str,
    items: &[String],
    default: usize,
) -> Result<Option<usize>, AppError> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default.min(items.len().saturating_sub(1)))
        .interact_opt()
        .map_err(|err| AppError::Validation(format!("Failed to read '{}': {}", prompt, err)))
}

impl WizardPrompter for DialoguerPrompter {
    fn input(&mut self, prompt: FieldPrompt<'_>) -> Result<Option<String>, AppError> {
        let label = match prompt.help {
            Some(help) => format!("{} ({})", prompt.label, help),
            None => prompt.label.to_string(),
        };
        let result = Input::<String>::new()
            .with_prompt(label)
            .with_initial_text(prompt.current)
            .allow_empty(true)
            .interact_text();
        match result {
            Ok(value) => Ok(Some(value)),
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
            Err(err) => {
                Err(AppError::Validation(format!("Failed to read '{}': {}", prompt.label, err)))
            }
        }
    }

    fn confirm(&mut self, label: &str, current: bool) -> Result<Option<bool>, AppError> {
        Confirm::new()
            .with_prompt(label)
            .default(current)
            .interact_opt()
            .map_err(|err| AppError::Validation(format!("Failed to read '{}': {}", label, err)))
    }

    fn select(
        &mut self,
        label: &str,
        options: &[&str],
        current: usize,
    ) -> Result<Option<usize>, AppError> {
        let items: Vec<String> = options.iter().map(|option| option.to_string()).collect();
        select_index(label, &items, current)
    }

    fn list_action(&mut self, label: &str, items: &[String]) -> Result<Option<ListAction>, AppError> {
        let mut menu: Vec<String> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let shown = if item.trim().is_empty() { "(empty)" } else { item.as_str() };
                format!("#{} {}", index + 1, shown)
            })
            .collect();
        menu.push(MENU_ADD.to_string());
        let can_remove = items.len() > 1;
        if can_remove {
            menu.push(MENU_REMOVE.to_string());
        }
        menu.push(MENU_DONE.to_string());

        let Some(choice) = select_index(label, &menu, menu.len() - 1)? else {
            return Ok(None);
        };
        if choice < items.len() {
            return Ok(Some(ListAction::Edit(choice)));
        }
        match menu[choice].as_str() {
            MENU_ADD => Ok(Some(ListAction::Add)),
            MENU_REMOVE => {
                let Some(index) =
                    select_index(&format!("Remove from {}", label), &menu[..items.len()], 0)?
                else {
                    return Ok(None);
                };
                Ok(Some(ListAction::Remove(index)))
            }
            _ => Ok(Some(ListAction::Done)),
        }
    }

    fn step_action(
        &mut self,
        sections: &[&str],
        current: usize,
        is_last: bool,
    ) -> Result<Option<WizardAction>, AppError> {
        let forward = if is_last { "Finish and save" } else { "Next section" };
        let items: Vec<String> =
            [forward, "Previous section", "Jump to section", "Quit without saving"]
                .iter()
                .map(|item| item.to_string())
                .collect();
        let prompt = format!("{} {} ({}/{})", self.kind, sections[current], current + 1, sections.len());

        let Some(choice) = select_index(&prompt, &items, 0)? else {
            return Ok(None);
        };
        let action = match choice {
            0 if is_last => WizardAction::Finish,
            0 => WizardAction::Next,
            1 => WizardAction::Previous,
            2 => {
                let names: Vec<String> = sections.iter().map(|name| name.to_string()).collect();
                match select_index("Jump to", &names, current)? {
                    Some(index) => WizardAction::Jump(index),
                    None => return Ok(None),
                }
            }
            _ => WizardAction::Quit,
        };
        Ok(Some(action))
    }

    fn show_errors(&mut self, errors: &ValidationErrors) {
        eprintln!("❌ {} invalid field(s):", errors.invalid_count());
        for (key, message) in errors.invalid() {
            eprintln!("  • {}: {}", key, message);
        }
    }
}
