//! Schema-driven form engine: values, record, rules, validation, wizard.

pub mod record;
pub mod rules;
pub mod schema;
pub mod validation;
pub mod value;
pub mod wizard;

pub use record::FormRecord;
pub use schema::{
    DateConstraint, FieldKind, FieldSpec, FormSchema, ItemFormat, SectionSpec, SubFormat,
    SubfieldSpec,
};
pub use validation::{Scope, ValidationErrors, validate};
pub use value::{Entry, FieldValue};
pub use wizard::WizardNavigator;
