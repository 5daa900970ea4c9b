//! Interactive prompt port used by the wizard command.

use crate::domain::{AppError, ValidationErrors};

/// One value to ask the user for.
#[derive(Debug, Clone, Copy)]
pub struct FieldPrompt<'a> {
    pub label: &'a str,
    pub help: Option<&'a str>,
    pub current: &'a str,
}

/// Edit requested on a list field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    Add,
    Edit(usize),
    Remove(usize),
    Done,
}

/// Step-level choice after a section has been edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Next,
    Previous,
    Jump(usize),
    /// Validate everything and save; only offered on the last step.
    Finish,
    Quit,
}

/// Port for the prompts the wizard issues.
///
/// Every method returns `Ok(None)` when the user cancels the prompt.
pub trait WizardPrompter {
    fn input(&mut self, prompt: FieldPrompt<'_>) -> Result<Option<String>, AppError>;

    fn confirm(&mut self, label: &str, current: bool) -> Result<Option<bool>, AppError>;

    fn select(
        &mut self,
        label: &str,
        options: &[&str],
        current: usize,
    ) -> Result<Option<usize>, AppError>;

    fn list_action(&mut self, label: &str, items: &[String]) -> Result<Option<ListAction>, AppError>;

    fn step_action(
        &mut self,
        sections: &[&str],
        current: usize,
        is_last: bool,
    ) -> Result<Option<WizardAction>, AppError>;

    fn show_errors(&mut self, errors: &ValidationErrors);
}
