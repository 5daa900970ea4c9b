use crate::domain::FormKind;
use crate::domain::form::{FieldKind, FieldSpec};

/// One field as listed by `sovseas schema`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSummary {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: String,
    pub required: bool,
    pub default: Option<&'static str>,
    pub help: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldSummary>,
}

/// Sections of `kind` in wizard order, each with its fields.
pub fn execute(kind: FormKind) -> Vec<SectionSummary> {
    let schema = kind.schema();
    schema
        .sections
        .iter()
        .map(|section| SectionSummary {
            id: section.id,
            title: section.title,
            fields: schema.fields_in(section.id).map(summarize).collect(),
        })
        .collect()
}

fn summarize(field: &FieldSpec) -> FieldSummary {
    let kind = match field.kind {
        FieldKind::Choice(options) => format!("one of {}", options.join("|")),
        FieldKind::WholeNumber { max: Some(max) } => format!("whole number <= {}", max),
        FieldKind::Entries(subfields) => {
            let keys: Vec<&str> = subfields.iter().map(|sub| sub.key).collect();
            format!("entries of {{{}}}", keys.join(", "))
        }
        other => other.label().to_string(),
    };
    FieldSummary {
        key: field.key,
        label: field.label,
        kind,
        required: field.required,
        default: field.default,
        help: field.help,
    }
}
