//! Declarative form schemas.
//!
//! A schema lists the ordered wizard sections of a form and every field with
//! its kind and rules. The campaign and project forms are both instances of
//! [`FormSchema`]; the record, validator, and wizard are driven from it.

use super::value::{Entry, FieldValue};

/// Text format of a string list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFormat {
    Text,
    Url,
    Address,
}

/// Text format of a struct-list sub-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubFormat {
    Text,
    Email,
    Url,
    Date,
    Choice(&'static [&'static str]),
}

/// One sub-field of a struct list item.
#[derive(Debug, Clone, Copy)]
pub struct SubfieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub format: SubFormat,
    pub required: bool,
}

impl SubfieldSpec {
    pub const fn new(key: &'static str, label: &'static str, format: SubFormat) -> Self {
        Self { key, label, format, required: false }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Supported kinds of form fields.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Url,
    Address,
    /// Monetary amount; must parse and be greater than zero.
    Amount,
    /// Non-negative whole number with an optional inclusive maximum.
    WholeNumber { max: Option<u64> },
    DateTime,
    Flag,
    Choice(&'static [&'static str]),
    /// Local media file path or an already-uploaded URL.
    Media,
    List(ItemFormat),
    Entries(&'static [SubfieldSpec]),
}

impl FieldKind {
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::LongText => "long text",
            FieldKind::Email => "email",
            FieldKind::Url => "url",
            FieldKind::Address => "address",
            FieldKind::Amount => "amount",
            FieldKind::WholeNumber { .. } => "whole number",
            FieldKind::DateTime => "date",
            FieldKind::Flag => "flag",
            FieldKind::Choice(_) => "choice",
            FieldKind::Media => "media",
            FieldKind::List(_) => "list",
            FieldKind::Entries(_) => "entries",
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldKind::List(_) | FieldKind::Entries(_))
    }
}

/// Cross-field or time-relative constraint on a date field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateConstraint {
    /// Strictly later than the validation clock.
    Future,
    /// Strictly later than the named date field.
    After(&'static str),
}

/// Declarative description of a single form field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub section: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min_len: Option<usize>,
    pub constraint: Option<DateConstraint>,
    pub default: Option<&'static str>,
    pub help: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        section: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            key,
            label,
            section,
            kind,
            required: false,
            min_len: None,
            constraint: None,
            default: None,
            help: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn min_len(mut self, min: usize) -> Self {
        self.min_len = Some(min);
        self
    }

    pub const fn future(mut self) -> Self {
        self.constraint = Some(DateConstraint::Future);
        self
    }

    pub const fn after(mut self, other: &'static str) -> Self {
        self.constraint = Some(DateConstraint::After(other));
        self
    }

    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub const fn help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    /// Initial value seeded into a fresh record. Lists hold one placeholder.
    pub fn initial_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Flag => FieldValue::Flag(self.default == Some("true")),
            FieldKind::List(_) => FieldValue::List(vec![String::new()]),
            FieldKind::Entries(subfields) => FieldValue::Entries(vec![blank_entry(subfields)]),
            _ => FieldValue::Text(self.default.unwrap_or_default().to_string()),
        }
    }
}

/// Entry with every declared sub-field present and empty.
pub fn blank_entry(subfields: &[SubfieldSpec]) -> Entry {
    subfields.iter().map(|sub| (sub.key.to_string(), String::new())).collect()
}

/// One wizard section.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    pub id: &'static str,
    pub title: &'static str,
}

/// Ordered sections plus field list for one form.
#[derive(Debug, Clone)]
pub struct FormSchema {
    pub name: &'static str,
    pub sections: Vec<SectionSpec>,
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(name: &'static str, sections: Vec<SectionSpec>, fields: Vec<FieldSpec>) -> Self {
        Self { name, sections, fields }
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn section(&self, id: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn section_ids(&self) -> Vec<&'static str> {
        self.sections.iter().map(|section| section.id).collect()
    }

    pub fn fields_in<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a FieldSpec> + 'a {
        self.fields.iter().filter(move |field| field.section == section)
    }

    /// First field holding a media reference, if the form has one.
    pub fn media_field(&self) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| matches!(field.kind, FieldKind::Media))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMBER: &[SubfieldSpec] = &[
        SubfieldSpec::new("name", "Name", SubFormat::Text).required(),
        SubfieldSpec::new("email", "Email", SubFormat::Email),
    ];

    #[test]
    fn initial_values_seed_list_placeholders() {
        let tags = FieldSpec::new("tags", "Tags", "basics", FieldKind::List(ItemFormat::Text));
        assert_eq!(tags.initial_value(), FieldValue::List(vec![String::new()]));

        let team = FieldSpec::new("team", "Team", "team", FieldKind::Entries(MEMBER));
        let FieldValue::Entries(entries) = team.initial_value() else {
            panic!("expected entries");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].len(), 2);
    }

    #[test]
    fn defaults_apply_to_text_and_flags() {
        let fee = FieldSpec::new("fee", "Fee", "funding", FieldKind::WholeNumber { max: Some(30) })
            .default_value("5");
        assert_eq!(fee.initial_value(), FieldValue::Text("5".into()));

        let flag = FieldSpec::new("on", "On", "funding", FieldKind::Flag).default_value("true");
        assert_eq!(flag.initial_value(), FieldValue::Flag(true));
    }
}
