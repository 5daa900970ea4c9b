mod common;

use std::env;
use std::fs;

use common::{VALID_CAMPAIGN, VALID_PROJECT};
use serial_test::serial;
use sovseas::{AppError, FormKind};
use tempfile::TempDir;

const CONTRACT_ENV: &str = "SOVSEAS_CONTRACT_ADDRESS";

fn workspace() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("sovseas.toml");
    fs::write(&config, "[submission]\nredirect_delay_secs = 0\n").unwrap();
    (dir, config)
}

#[test]
fn schema_is_available_without_io() {
    let sections = sovseas::schema(FormKind::Project);

    let ids: Vec<&str> = sections.iter().map(|section| section.id).collect();
    assert_eq!(ids, vec!["basics", "team", "technical", "milestones", "media"]);
    let team = &sections[1];
    assert!(team.fields.iter().any(|field| field.key == "contactEmail" && field.required));
}

#[test]
#[serial]
fn init_then_validate_reports_required_fields() {
    let (dir, config) = workspace();
    let draft = dir.path().join("drafts/project.toml");

    let written = sovseas::init(FormKind::Project, Some(&draft), Some(&config)).unwrap();
    assert_eq!(written, draft);

    let outcome = sovseas::validate(FormKind::Project, &draft, None).unwrap();
    assert_eq!(outcome.exit_code, 1);
    assert_eq!(outcome.errors.message("name"), "Project name is required");
    assert_eq!(outcome.errors.message("contactEmail"), "Contact email is required");
    assert_eq!(outcome.duration_days, None);
}

#[test]
fn validate_campaign_reports_duration() {
    let (dir, _) = workspace();
    let draft = dir.path().join("campaign.toml");
    fs::write(&draft, VALID_CAMPAIGN).unwrap();

    let outcome = sovseas::validate(FormKind::Campaign, &draft, None).unwrap();

    assert!(outcome.errors.is_valid());
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.duration_days, Some(31));
}

#[test]
#[serial]
fn preview_uses_contract_override_from_environment() {
    let (dir, config) = workspace();
    let draft = dir.path().join("project.json");
    fs::write(&draft, VALID_PROJECT).unwrap();

    unsafe { env::set_var(CONTRACT_ENV, "0x71C7656EC7ab88b098defB751B7401B5f6d8976F") };
    let outcome = sovseas::preview(FormKind::Project, &draft, Some(&config));
    unsafe { env::remove_var(CONTRACT_ENV) };

    let outcome = outcome.unwrap();
    assert!(outcome.signature.starts_with("createProject("));
    assert!(outcome.calldata_hex.starts_with("0x"));
    assert_eq!(outcome.duration_days, None);
}

#[test]
#[serial]
fn malformed_contract_override_is_rejected() {
    let (dir, config) = workspace();
    let draft = dir.path().join("campaign.toml");
    fs::write(&draft, VALID_CAMPAIGN).unwrap();

    unsafe { env::set_var(CONTRACT_ENV, "0x1234") };
    let result = sovseas::preview(FormKind::Campaign, &draft, Some(&config));
    unsafe { env::remove_var(CONTRACT_ENV) };

    assert!(matches!(result, Err(AppError::InvalidConfig(message)) if message.contains("contract_address")));
}

#[test]
#[serial]
fn submit_without_contract_fails_before_any_request() {
    let (dir, config) = workspace();
    let draft = dir.path().join("campaign.toml");
    fs::write(&draft, VALID_CAMPAIGN).unwrap();

    unsafe { env::remove_var(CONTRACT_ENV) };
    let result = sovseas::submit(FormKind::Campaign, &draft, Some(&config));

    assert!(matches!(result, Err(AppError::Configuration(message)) if message.contains("not configured")));
}
