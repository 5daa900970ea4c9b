use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::domain::form::FormSchema;
use crate::domain::submission::{MappingInput, SubmissionPlan};
use crate::domain::{AppError, campaign, project};

static CAMPAIGN_SCHEMA: LazyLock<FormSchema> = LazyLock::new(campaign::schema);
static PROJECT_SCHEMA: LazyLock<FormSchema> = LazyLock::new(project::schema);

/// The two forms the platform accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Campaign,
    Project,
}

impl FormKind {
    pub const ALL: [FormKind; 2] = [FormKind::Campaign, FormKind::Project];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Campaign => "campaign",
            FormKind::Project => "project",
        }
    }

    pub fn schema(&self) -> &'static FormSchema {
        match self {
            FormKind::Campaign => &CAMPAIGN_SCHEMA,
            FormKind::Project => &PROJECT_SCHEMA,
        }
    }

    /// Metadata blobs and contract call for a validated record.
    pub fn build_plan(&self, input: &MappingInput<'_>) -> Result<SubmissionPlan, AppError> {
        if input.record.kind() != *self {
            return Err(AppError::Internal(format!(
                "{} record passed to the {} mapping",
                input.record.kind(),
                self
            )));
        }
        match self {
            FormKind::Campaign => campaign::build_plan(input),
            FormKind::Project => project::build_plan(input),
        }
    }

    /// Read-only contract function returning how many items exist.
    pub fn count_function(&self) -> &'static str {
        match self {
            FormKind::Campaign => campaign::COUNT_FUNCTION,
            FormKind::Project => project::COUNT_FUNCTION,
        }
    }

    pub fn detail_route(&self, id: u128) -> String {
        format!("/explorer/{}/{}", self.as_str(), id)
    }

    /// Fallback destination when the new item's id cannot be determined.
    pub fn listing_route(&self) -> &'static str {
        match self {
            FormKind::Campaign => "/campaigns",
            FormKind::Project => "/projects",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "campaign" | "campaigns" => Ok(FormKind::Campaign),
            "project" | "projects" => Ok(FormKind::Project),
            _ => Err(AppError::InvalidFormKind(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("Campaign".parse::<FormKind>().unwrap(), FormKind::Campaign);
        assert_eq!("projects".parse::<FormKind>().unwrap(), FormKind::Project);
        assert!(matches!("grant".parse::<FormKind>(), Err(AppError::InvalidFormKind(_))));
    }

    #[test]
    fn routes() {
        assert_eq!(FormKind::Campaign.detail_route(4), "/explorer/campaign/4");
        assert_eq!(FormKind::Project.detail_route(0), "/explorer/project/0");
        assert_eq!(FormKind::Project.listing_route(), "/projects");
    }

    #[test]
    fn schemas_are_well_formed() {
        for kind in FormKind::ALL {
            let schema = kind.schema();
            let mut keys = HashSet::new();
            for field in &schema.fields {
                assert!(keys.insert(field.key), "duplicate field {}", field.key);
                assert!(
                    schema.section(field.section).is_some(),
                    "{} references unknown section {}",
                    field.key,
                    field.section
                );
            }
            for section in &schema.sections {
                assert!(schema.fields_in(section.id).next().is_some(), "empty section {}", section.id);
            }
            assert!(schema.media_field().is_some());
        }
    }
}
