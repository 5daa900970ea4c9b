//! Campaign form: schema, duration rule, and submission mapping.

use chrono::{DateTime, Utc};

use crate::domain::AppError;
use crate::domain::contract::{AbiValue, Address, ContractCall};
use crate::domain::form::{
    FieldKind, FieldSpec, FormRecord, FormSchema, ItemFormat, SectionSpec, rules,
};
use crate::domain::submission::{METADATA_VERSION, MappingInput, MetadataObject, SubmissionPlan};

pub const CREATE_FUNCTION: &str = "createCampaign";
pub const COUNT_FUNCTION: &str = "getCampaignCount";

pub const CAMPAIGN_TYPES: &[&str] = &["hackathon", "grants", "accelerator", "bounty", "other"];

/// Upper bound the contract enforces on the admin fee percentage.
pub const MAX_ADMIN_FEE: u64 = 30;

pub const MIN_DESCRIPTION_LEN: usize = 100;

pub fn schema() -> FormSchema {
    let sections = vec![
        SectionSpec { id: "basics", title: "Basic information" },
        SectionSpec { id: "timeline", title: "Timeline" },
        SectionSpec { id: "funding", title: "Funding & distribution" },
        SectionSpec { id: "details", title: "Requirements & judging" },
        SectionSpec { id: "contact", title: "Media & contact" },
    ];

    let fields = vec![
        FieldSpec::new("name", "Campaign name", "basics", FieldKind::Text).required(),
        FieldSpec::new("description", "Description", "basics", FieldKind::LongText)
            .required()
            .min_len(MIN_DESCRIPTION_LEN),
        FieldSpec::new("campaignType", "Campaign type", "basics", FieldKind::Choice(CAMPAIGN_TYPES))
            .required()
            .default_value("hackathon"),
        FieldSpec::new("category", "Category", "basics", FieldKind::Text).required(),
        FieldSpec::new("tagline", "Tagline", "basics", FieldKind::Text),
        FieldSpec::new("startDate", "Start date", "timeline", FieldKind::DateTime)
            .required()
            .future()
            .help("YYYY-MM-DDTHH:MM, interpreted as UTC"),
        FieldSpec::new("endDate", "End date", "timeline", FieldKind::DateTime)
            .required()
            .after("startDate")
            .help("YYYY-MM-DDTHH:MM, interpreted as UTC"),
        FieldSpec::new("prizePool", "Prize pool", "funding", FieldKind::Amount)
            .required()
            .help("Total amount in the payout token"),
        FieldSpec::new(
            "maxWinners",
            "Maximum winners",
            "funding",
            FieldKind::WholeNumber { max: None },
        )
        .default_value("0")
        .help("0 lets every funded project share the pool"),
        FieldSpec::new(
            "adminFee",
            "Admin fee (%)",
            "funding",
            FieldKind::WholeNumber { max: Some(MAX_ADMIN_FEE) },
        )
        .default_value("5"),
        FieldSpec::new(
            "useQuadraticDistribution",
            "Quadratic distribution",
            "funding",
            FieldKind::Flag,
        ),
        FieldSpec::new("useCustomDistribution", "Custom distribution", "funding", FieldKind::Flag),
        FieldSpec::new(
            "customDistributionNotes",
            "Custom distribution notes",
            "funding",
            FieldKind::LongText,
        ),
        FieldSpec::new("payoutToken", "Payout token", "funding", FieldKind::Address)
            .help("Leave blank to use the configured default token"),
        FieldSpec::new("feeToken", "Fee token", "funding", FieldKind::Address)
            .help("Leave blank to use the configured default token"),
        FieldSpec::new("tags", "Tags", "details", FieldKind::List(ItemFormat::Text)),
        FieldSpec::new("requirements", "Requirements", "details", FieldKind::List(ItemFormat::Text)),
        FieldSpec::new(
            "judgingCriteria",
            "Judging criteria",
            "details",
            FieldKind::List(ItemFormat::Text),
        ),
        FieldSpec::new("eligibility", "Eligibility", "details", FieldKind::LongText),
        FieldSpec::new("prizeDistribution", "Prize distribution", "details", FieldKind::LongText),
        FieldSpec::new("logo", "Logo", "contact", FieldKind::Media)
            .help("Local image path or an existing URL"),
        FieldSpec::new("website", "Website", "contact", FieldKind::Url),
        FieldSpec::new("email", "Contact email", "contact", FieldKind::Email),
        FieldSpec::new("twitter", "Twitter", "contact", FieldKind::Text),
        FieldSpec::new("discord", "Discord", "contact", FieldKind::Text),
        FieldSpec::new("telegram", "Telegram", "contact", FieldKind::Text),
        FieldSpec::new("videoLink", "Video link", "contact", FieldKind::Url),
    ];

    FormSchema::new("campaign", sections, fields)
}

/// Campaign length in whole days, rounding any partial day up.
pub fn duration_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let seconds = (end - start).num_seconds();
    if seconds <= 0 {
        return 0;
    }
    (seconds + 86_399) / 86_400
}

/// Start and end of the campaign, when both parse.
pub fn schedule(record: &FormRecord) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = rules::parse_datetime(record.text("startDate"))?;
    let end = rules::parse_datetime(record.text("endDate"))?;
    Some((start, end))
}

pub fn build_plan(input: &MappingInput<'_>) -> Result<SubmissionPlan, AppError> {
    let record = input.record;
    let (start, end) = schedule(record)
        .ok_or_else(|| AppError::Validation("Start and end dates must be valid dates".into()))?;
    let start_time = unix_seconds(start, "Start date")?;
    let end_time = unix_seconds(end, "End date")?;
    let admin_fee = whole_number(record.text("adminFee"), 0)?;
    let max_winners = whole_number(record.text("maxWinners"), 0)?;
    let payout_token = token(record.text_opt("payoutToken"), input.default_token)?;
    let fee_token = token(record.text_opt("feeToken"), input.default_token)?;
    let use_custom = record.flag("useCustomDistribution");

    let main_info = MetadataObject::new()
        .text("type", record.text_opt("campaignType"))
        .text("category", record.text_opt("category"))
        .text("tagline", record.text_opt("tagline"))
        .text("prizePool", record.text_opt("prizePool"))
        .value("maxWinners", max_winners)
        .value("durationDays", duration_days(start, end))
        .list("tags", record.filled_items("tags"))
        .list("requirements", record.filled_items("requirements"))
        .list("judgingCriteria", record.filled_items("judgingCriteria"))
        .text("eligibility", record.text_opt("eligibility"))
        .text("prizeDistribution", record.text_opt("prizeDistribution"))
        .text("logo", input.media_url.or(record.text_opt("logo")))
        .build();

    let additional_info = MetadataObject::new()
        .value("version", METADATA_VERSION)
        .value("timestamp", input.timestamp)
        .value("creator", input.creator.to_string())
        .text("website", record.text_opt("website"))
        .text("email", record.text_opt("email"))
        .text("videoLink", record.text_opt("videoLink"))
        .object(
            "socialLinks",
            MetadataObject::new()
                .text("twitter", record.text_opt("twitter"))
                .text("discord", record.text_opt("discord"))
                .text("telegram", record.text_opt("telegram")),
        )
        .build();

    let custom_distribution = if use_custom {
        record.text_opt("customDistributionNotes").unwrap_or_default().to_string()
    } else {
        String::new()
    };

    let call = ContractCall::new(
        CREATE_FUNCTION,
        vec![
            AbiValue::String(record.text("name").trim().to_string()),
            AbiValue::String(record.text("description").trim().to_string()),
            AbiValue::String(main_info.to_string()),
            AbiValue::String(additional_info.to_string()),
            AbiValue::Uint(u128::from(start_time)),
            AbiValue::Uint(u128::from(end_time)),
            AbiValue::Uint(u128::from(admin_fee)),
            AbiValue::Uint(u128::from(max_winners)),
            AbiValue::Bool(record.flag("useQuadraticDistribution")),
            AbiValue::Bool(use_custom),
            AbiValue::String(custom_distribution),
            AbiValue::Address(payout_token),
            AbiValue::Address(fee_token),
        ],
    )
    .with_value(input.creation_fee_wei);

    Ok(SubmissionPlan {
        metadata: [("mainInfo", main_info), ("additionalInfo", additional_info)].into(),
        call,
    })
}

fn unix_seconds(date: DateTime<Utc>, label: &str) -> Result<u64, AppError> {
    u64::try_from(date.timestamp())
        .map_err(|_| AppError::Validation(format!("{} must be after 1970-01-01", label)))
}

fn whole_number(value: &str, default: u64) -> Result<u64, AppError> {
    if rules::is_blank(value) {
        return Ok(default);
    }
    rules::parse_whole_number(value)
        .ok_or_else(|| AppError::Validation(format!("'{}' is not a whole number", value.trim())))
}

fn token(value: Option<&str>, default: Address) -> Result<Address, AppError> {
    value.map(str::parse).unwrap_or(Ok(default))
}
