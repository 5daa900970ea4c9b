//! Wizard navigation over the ordered sections of a form.

use super::schema::FormSchema;
use crate::domain::AppError;

/// Current step of a multi-section form.
///
/// The index always points inside the section list. `expanded` tracks the
/// open panel for the collapsible-panel presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardNavigator {
    sections: Vec<&'static str>,
    index: usize,
    expanded: Option<&'static str>,
}

impl WizardNavigator {
    pub fn new(schema: &FormSchema) -> Result<Self, AppError> {
        Self::from_sections(schema.section_ids())
    }

    pub fn from_sections(sections: Vec<&'static str>) -> Result<Self, AppError> {
        let first = *sections.first().ok_or(AppError::InvalidStep { index: 0, len: 0 })?;
        Ok(Self { sections, index: 0, expanded: Some(first) })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn current(&self) -> &'static str {
        self.sections[self.index]
    }

    pub fn sections(&self) -> &[&'static str] {
        &self.sections
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// On the last step submit replaces next.
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.sections.len()
    }

    /// Advance one step when the current section validates.
    ///
    /// `section_is_valid` is evaluated for the current section even on the
    /// last step, so callers can refresh their error display.
    pub fn next(&mut self, section_is_valid: impl FnOnce(&'static str) -> bool) -> bool {
        if !section_is_valid(self.current()) || self.is_last() {
            return false;
        }
        self.index += 1;
        self.expanded = Some(self.current());
        true
    }

    /// Step back without validation.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.expanded = Some(self.current());
        true
    }

    /// Jump to any step, as progress-dot clicks do.
    pub fn go_to(&mut self, index: usize) -> Result<(), AppError> {
        if index >= self.sections.len() {
            return Err(AppError::InvalidStep { index, len: self.sections.len() });
        }
        self.index = index;
        self.expanded = Some(self.current());
        Ok(())
    }

    pub fn go_to_section(&mut self, id: &str) -> Result<(), AppError> {
        let index = self.position(id)?;
        self.go_to(index)
    }

    /// Open or close a collapsible panel without moving the step index.
    pub fn toggle(&mut self, id: &str) -> Result<(), AppError> {
        let index = self.position(id)?;
        let section = self.sections[index];
        self.expanded = if self.expanded == Some(section) { None } else { Some(section) };
        Ok(())
    }

    pub fn expanded(&self) -> Option<&'static str> {
        self.expanded
    }

    /// Whether a section should be shown: the current step, or the open panel.
    pub fn is_visible(&self, id: &str) -> bool {
        self.current() == id || self.expanded == Some(id)
    }

    fn position(&self, id: &str) -> Result<usize, AppError> {
        self.sections
            .iter()
            .position(|section| *section == id)
            .ok_or_else(|| AppError::UnknownSection(id.to_string()))
    }
}
