//! Project form: schema and submission mapping.

use crate::domain::AppError;
use crate::domain::contract::{AbiValue, Address, ContractCall};
use crate::domain::form::{
    FieldKind, FieldSpec, FormSchema, ItemFormat, SectionSpec, SubFormat, SubfieldSpec,
};
use crate::domain::submission::{METADATA_VERSION, MappingInput, MetadataObject, SubmissionPlan};

pub const CREATE_FUNCTION: &str = "createProject";
pub const COUNT_FUNCTION: &str = "getProjectCount";

pub const MIN_DESCRIPTION_LEN: usize = 50;

const PROJECT_TYPES: &[&str] = &[
    "dapp",
    "protocol",
    "infrastructure",
    "tooling",
    "defi",
    "nft",
    "gaming",
    "dao",
    "other",
];
const MATURITY_LEVELS: &[&str] = &["concept", "prototype", "mvp", "production"];
const PROJECT_STATUSES: &[&str] = &["active", "paused", "completed"];
const MILESTONE_STATUSES: &[&str] = &["planned", "in-progress", "completed"];

const TEAM_MEMBER: &[SubfieldSpec] = &[
    SubfieldSpec::new("name", "Name", SubFormat::Text).required(),
    SubfieldSpec::new("role", "Role", SubFormat::Text),
    SubfieldSpec::new("email", "Email", SubFormat::Email),
    SubfieldSpec::new("linkedin", "LinkedIn", SubFormat::Url),
    SubfieldSpec::new("twitter", "Twitter", SubFormat::Text),
];

const MILESTONE: &[SubfieldSpec] = &[
    SubfieldSpec::new("title", "Title", SubFormat::Text).required(),
    SubfieldSpec::new("description", "Description", SubFormat::Text),
    SubfieldSpec::new("targetDate", "Target date", SubFormat::Date),
    SubfieldSpec::new("status", "Status", SubFormat::Choice(MILESTONE_STATUSES)),
];

pub fn schema() -> FormSchema {
    let sections = vec![
        SectionSpec { id: "basics", title: "Basic information" },
        SectionSpec { id: "team", title: "Team" },
        SectionSpec { id: "technical", title: "Technical details" },
        SectionSpec { id: "milestones", title: "Milestones" },
        SectionSpec { id: "media", title: "Media & links" },
    ];

    let fields = vec![
        FieldSpec::new("name", "Project name", "basics", FieldKind::Text).required(),
        FieldSpec::new("tagline", "Tagline", "basics", FieldKind::Text),
        FieldSpec::new("description", "Description", "basics", FieldKind::LongText)
            .required()
            .min_len(MIN_DESCRIPTION_LEN),
        FieldSpec::new("category", "Category", "basics", FieldKind::Text).required(),
        FieldSpec::new("tags", "Tags", "basics", FieldKind::List(ItemFormat::Text)),
        FieldSpec::new("location", "Location", "basics", FieldKind::Text),
        FieldSpec::new("establishedDate", "Established date", "basics", FieldKind::DateTime),
        FieldSpec::new("projectType", "Project type", "basics", FieldKind::Choice(PROJECT_TYPES))
            .default_value("dapp"),
        FieldSpec::new(
            "maturityLevel",
            "Maturity level",
            "basics",
            FieldKind::Choice(MATURITY_LEVELS),
        )
        .default_value("concept"),
        FieldSpec::new("status", "Status", "basics", FieldKind::Choice(PROJECT_STATUSES))
            .default_value("active"),
        FieldSpec::new("teamMembers", "Team members", "team", FieldKind::Entries(TEAM_MEMBER)),
        FieldSpec::new("contactEmail", "Contact email", "team", FieldKind::Email).required(),
        FieldSpec::new("blockchain", "Blockchain", "technical", FieldKind::Text)
            .default_value("Celo"),
        FieldSpec::new("techStack", "Tech stack", "technical", FieldKind::List(ItemFormat::Text)),
        FieldSpec::new(
            "smartContracts",
            "Smart contracts",
            "technical",
            FieldKind::List(ItemFormat::Address),
        )
        .help("Deployed contract addresses"),
        FieldSpec::new("githubRepo", "GitHub repository", "technical", FieldKind::Url),
        FieldSpec::new("license", "License", "technical", FieldKind::Text),
        FieldSpec::new("developmentStage", "Development stage", "technical", FieldKind::Text),
        FieldSpec::new(
            "keyFeatures",
            "Key features",
            "technical",
            FieldKind::List(ItemFormat::Text),
        ),
        FieldSpec::new("transferrable", "Transferrable ownership", "technical", FieldKind::Flag)
            .default_value("true"),
        FieldSpec::new("milestones", "Milestones", "milestones", FieldKind::Entries(MILESTONE)),
        FieldSpec::new("logo", "Logo", "media", FieldKind::Media)
            .help("Local image path or an existing URL"),
        FieldSpec::new("demoVideo", "Demo video", "media", FieldKind::Url),
        FieldSpec::new("demoUrl", "Demo URL", "media", FieldKind::Url),
        FieldSpec::new("website", "Website", "media", FieldKind::Url),
        FieldSpec::new("karmaGapProfile", "Karma GAP profile", "media", FieldKind::Url),
        FieldSpec::new("documentation", "Documentation", "media", FieldKind::Url),
        FieldSpec::new("twitter", "Twitter", "media", FieldKind::Text),
        FieldSpec::new("discord", "Discord", "media", FieldKind::Text),
        FieldSpec::new("telegram", "Telegram", "media", FieldKind::Text),
    ];

    FormSchema::new("project", sections, fields)
}

pub fn build_plan(input: &MappingInput<'_>) -> Result<SubmissionPlan, AppError> {
    let record = input.record;
    let contracts = record
        .filled_items("smartContracts")
        .iter()
        .map(|item| item.parse::<Address>())
        .collect::<Result<Vec<_>, _>>()?;

    let bio_part = MetadataObject::new()
        .text("tagline", record.text_opt("tagline"))
        .text("category", record.text_opt("category"))
        .list("tags", record.filled_items("tags"))
        .text("location", record.text_opt("location"))
        .text("establishedDate", record.text_opt("establishedDate"))
        .text("projectType", record.text_opt("projectType"))
        .text("maturityLevel", record.text_opt("maturityLevel"))
        .text("status", record.text_opt("status"))
        .entries("teamMembers", record.entries("teamMembers"))
        .text("contactEmail", record.text_opt("contactEmail"))
        .build();

    let contract_info = MetadataObject::new()
        .text("blockchain", record.text_opt("blockchain"))
        .list("techStack", record.filled_items("techStack"))
        .list("smartContracts", contracts.iter().map(Address::to_string).collect())
        .text("githubRepo", record.text_opt("githubRepo"))
        .text("license", record.text_opt("license"))
        .text("developmentStage", record.text_opt("developmentStage"))
        .list("keyFeatures", record.filled_items("keyFeatures"))
        .build();

    let additional_data = MetadataObject::new()
        .value("version", METADATA_VERSION)
        .value("timestamp", input.timestamp)
        .value("creator", input.creator.to_string())
        .text("logo", input.media_url.or(record.text_opt("logo")))
        .text("demoVideo", record.text_opt("demoVideo"))
        .text("demoUrl", record.text_opt("demoUrl"))
        .text("website", record.text_opt("website"))
        .text("karmaGapProfile", record.text_opt("karmaGapProfile"))
        .text("documentation", record.text_opt("documentation"))
        .entries("milestones", record.entries("milestones"))
        .object(
            "socialLinks",
            MetadataObject::new()
                .text("twitter", record.text_opt("twitter"))
                .text("discord", record.text_opt("discord"))
                .text("telegram", record.text_opt("telegram")),
        )
        .build();

    let call = ContractCall::new(
        CREATE_FUNCTION,
        vec![
            AbiValue::String(record.text("name").trim().to_string()),
            AbiValue::String(record.text("description").trim().to_string()),
            AbiValue::String(bio_part.to_string()),
            AbiValue::String(contract_info.to_string()),
            AbiValue::String(additional_data.to_string()),
            AbiValue::AddressArray(contracts),
            AbiValue::Bool(record.flag("transferrable")),
        ],
    )
    .with_value(input.creation_fee_wei);

    Ok(SubmissionPlan {
        metadata: [
            ("bioPart", bio_part),
            ("contractInfo", contract_info),
            ("additionalData", additional_data),
        ]
        .into(),
        call,
    })
}
