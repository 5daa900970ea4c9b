use std::collections::{HashMap, VecDeque};

use crate::domain::{AppError, ValidationErrors};
use crate::ports::{FieldPrompt, ListAction, WizardAction, WizardPrompter};

/// Scripted answer to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Flag(bool),
    Choice(usize),
    List(ListAction),
    Cancel,
}

/// Prompter answering by prompt label; unscripted prompts keep the current value.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: HashMap<String, VecDeque<Reply>>,
    steps: VecDeque<WizardAction>,
    pub errors_shown: Vec<ValidationErrors>,
    pub steps_seen: Vec<usize>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, label: &str, reply: Reply) -> Self {
        self.answers.entry(label.to_string()).or_default().push_back(reply);
        self
    }

    pub fn text(self, label: &str, value: &str) -> Self {
        self.answer(label, Reply::Text(value.to_string()))
    }

    /// Queue a step action; once exhausted the wizard is told to quit.
    pub fn step(mut self, action: WizardAction) -> Self {
        self.steps.push_back(action);
        self
    }

    fn next(&mut self, label: &str) -> Option<Reply> {
        self.answers.get_mut(label).and_then(VecDeque::pop_front)
    }
}

impl WizardPrompter for ScriptedPrompter {
    fn input(&mut self, prompt: FieldPrompt<'_>) -> Result<Option<String>, AppError> {
        match self.next(prompt.label) {
            None => Ok(Some(prompt.current.to_string())),
            Some(Reply::Text(value)) => Ok(Some(value)),
            Some(Reply::Cancel) => Ok(None),
            Some(other) => panic!("unexpected reply {:?} for input '{}'", other, prompt.label),
        }
    }

    fn confirm(&mut self, label: &str, current: bool) -> Result<Option<bool>, AppError> {
        match self.next(label) {
            None => Ok(Some(current)),
            Some(Reply::Flag(value)) => Ok(Some(value)),
            Some(Reply::Cancel) => Ok(None),
            Some(other) => panic!("unexpected reply {:?} for confirm '{}'", other, label),
        }
    }

    fn select(
        &mut self,
        label: &str,
        _options: &[&str],
        current: usize,
    ) -> Result<Option<usize>, AppError> {
        match self.next(label) {
            None => Ok(Some(current)),
            Some(Reply::Choice(index)) => Ok(Some(index)),
            Some(Reply::Cancel) => Ok(None),
            Some(other) => panic!("unexpected reply {:?} for select '{}'", other, label),
        }
    }

    fn list_action(&mut self, label: &str, _items: &[String]) -> Result<Option<ListAction>, AppError> {
        match self.next(label) {
            None => Ok(Some(ListAction::Done)),
            Some(Reply::List(action)) => Ok(Some(action)),
            Some(Reply::Cancel) => Ok(None),
            Some(other) => panic!("unexpected reply {:?} for list '{}'", other, label),
        }
    }

    fn step_action(
        &mut self,
        _sections: &[&str],
        current: usize,
        _is_last: bool,
    ) -> Result<Option<WizardAction>, AppError> {
        self.steps_seen.push(current);
        Ok(Some(self.steps.pop_front().unwrap_or(WizardAction::Quit)))
    }

    fn show_errors(&mut self, errors: &ValidationErrors) {
        self.errors_shown.push(errors.clone());
    }
}
