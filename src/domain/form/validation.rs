//! Whole-scope validation of a form record.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::record::FormRecord;
use super::rules;
use super::schema::{DateConstraint, FieldKind, FieldSpec, ItemFormat, SubFormat, SubfieldSpec};
use super::value::entry_is_blank;
use crate::domain::AppError;

/// Portion of the form a validation pass covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    Section(&'a str),
    All,
}

/// Per-field messages from one validation pass.
///
/// Every field in scope has an entry; an empty message means valid. List
/// items are keyed `field[i]`, entry sub-fields `field[i].sub`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.messages.values().all(String::is_empty)
    }

    /// Message for `key`; empty when valid or not in scope.
    pub fn message(&self, key: &str) -> &str {
        self.messages.get(key).map(String::as_str).unwrap_or_default()
    }

    /// Offending keys with their messages, in key order.
    pub fn invalid(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(key, message)| (key.as_str(), message.as_str()))
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid().count()
    }

    fn record(&mut self, key: impl Into<String>, message: Option<String>) {
        self.messages.insert(key.into(), message.unwrap_or_default());
    }
}

/// Validate every field of `scope`, recomputing the whole error set.
pub fn validate(
    record: &FormRecord,
    scope: Scope<'_>,
    now: DateTime<Utc>,
) -> Result<ValidationErrors, AppError> {
    let schema = record.kind().schema();
    if let Scope::Section(id) = scope
        && schema.section(id).is_none()
    {
        return Err(AppError::UnknownSection(id.to_string()));
    }

    let mut errors = ValidationErrors::default();
    for field in &schema.fields {
        if let Scope::Section(id) = scope
            && field.section != id
        {
            continue;
        }
        check_field(record, field, now, &mut errors);
    }
    Ok(errors)
}

fn check_field(
    record: &FormRecord,
    field: &FieldSpec,
    now: DateTime<Utc>,
    errors: &mut ValidationErrors,
) {
    match field.kind {
        FieldKind::Flag => errors.record(field.key, None),
        FieldKind::List(format) => {
            let items = record.list(field.key);
            let filled = items.iter().any(|item| !rules::is_blank(item));
            let message = (field.required && !filled)
                .then(|| format!("Add at least one {}", field.label.to_lowercase()));
            errors.record(field.key, message);
            for (index, item) in items.iter().enumerate() {
                if rules::is_blank(item) {
                    continue;
                }
                let message = match format {
                    ItemFormat::Text => None,
                    ItemFormat::Url => {
                        (!rules::is_valid_url(item)).then(|| "Please enter a valid URL".to_string())
                    }
                    ItemFormat::Address => (!rules::is_valid_address(item))
                        .then(|| "Must be a valid address (0x followed by 40 hex characters)".into()),
                };
                if message.is_some() {
                    errors.record(format!("{}[{}]", field.key, index), message);
                }
            }
        }
        FieldKind::Entries(subfields) => {
            let entries = record.entries(field.key);
            let filled = entries.iter().any(|entry| !entry_is_blank(entry));
            let message = (field.required && !filled)
                .then(|| format!("Add at least one {}", field.label.to_lowercase()));
            errors.record(field.key, message);
            for (index, entry) in entries.iter().enumerate() {
                if entry_is_blank(entry) {
                    continue;
                }
                for sub in subfields {
                    let value = entry.get(sub.key).map(String::as_str).unwrap_or_default();
                    if let Some(message) = check_subfield(sub, value) {
                        errors.record(format!("{}[{}].{}", field.key, index, sub.key), Some(message));
                    }
                }
            }
        }
        _ => {
            let message = check_scalar(record, field, now);
            errors.record(field.key, message);
        }
    }
}

fn check_scalar(record: &FormRecord, field: &FieldSpec, now: DateTime<Utc>) -> Option<String> {
    let value = record.text(field.key);
    let label = field.label;

    if rules::is_blank(value) {
        return field.required.then(|| format!("{} is required", label));
    }

    if let Some(min) = field.min_len
        && rules::trimmed_len(value) < min
    {
        return Some(format!("{} must be at least {} characters", label, min));
    }

    match field.kind {
        FieldKind::Email if !rules::is_valid_email(value) => {
            Some("Please enter a valid email address".to_string())
        }
        FieldKind::Url if !rules::is_valid_url(value) => Some("Please enter a valid URL".to_string()),
        FieldKind::Address if !rules::is_valid_address(value) => {
            Some(format!("{} must be a valid address (0x followed by 40 hex characters)", label))
        }
        FieldKind::Amount => match rules::parse_amount(value) {
            None => Some(format!("{} must be a valid number", label)),
            Some(amount) if amount <= 0.0 => Some(format!("{} must be greater than 0", label)),
            Some(_) => None,
        },
        FieldKind::WholeNumber { max } => match rules::parse_whole_number(value) {
            None => Some(format!("{} must be a whole number", label)),
            Some(number) => match max {
                Some(max) if number > max => Some(format!("{} must be at most {}", label, max)),
                _ => None,
            },
        },
        FieldKind::Choice(options) if !options.contains(&value.trim()) => {
            Some(format!("{} must be one of: {}", label, options.join(", ")))
        }
        FieldKind::DateTime => check_date(record, field, value, now),
        _ => None,
    }
}

fn check_date(
    record: &FormRecord,
    field: &FieldSpec,
    value: &str,
    now: DateTime<Utc>,
) -> Option<String> {
    let Some(date) = rules::parse_datetime(value) else {
        return Some(format!("{} must be a valid date", field.label));
    };
    match field.constraint {
        Some(DateConstraint::Future) if date <= now => {
            Some(format!("{} must be in the future", field.label))
        }
        Some(DateConstraint::After(other)) => {
            let other_label =
                record.kind().schema().field(other).map(|spec| spec.label).unwrap_or(other);
            // An unparseable reference date is reported on its own field.
            let reference = rules::parse_datetime(record.text(other))?;
            (date <= reference).then(|| format!("{} must be after {}", field.label, other_label))
        }
        _ => None,
    }
}

fn check_subfield(sub: &SubfieldSpec, value: &str) -> Option<String> {
    if rules::is_blank(value) {
        return sub.required.then(|| format!("{} is required", sub.label));
    }
    match sub.format {
        SubFormat::Text => None,
        SubFormat::Email => {
            (!rules::is_valid_email(value)).then(|| "Please enter a valid email address".into())
        }
        SubFormat::Url => (!rules::is_valid_url(value)).then(|| "Please enter a valid URL".into()),
        SubFormat::Date => rules::parse_datetime(value)
            .is_none()
            .then(|| format!("{} must be a valid date", sub.label)),
        SubFormat::Choice(options) => (!options.contains(&value.trim()))
            .then(|| format!("{} must be one of: {}", sub.label, options.join(", "))),
    }
}
