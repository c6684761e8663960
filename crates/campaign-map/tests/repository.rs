use std::fs;
use std::path::PathBuf;

use campaign_map::{MappingSession, StoredTemplate, TemplateRepository};
use campaign_model::{ColumnDataType, DetectedColumn, MappingTemplate};
use campaign_standards::canonical_schema;

fn temp_repo_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("campaign_template_repo_{stamp}_{}", std::process::id()));
    dir
}

fn cleanup_dir(dir: &PathBuf) {
    let _ = fs::remove_dir_all(dir);
}

fn sample_template(name: &str, platform: &str) -> MappingTemplate {
    MappingTemplate::new(name, platform).with_mapping([
        ("Day", "date"),
        ("Amount Spent (USD)", "spend"),
        ("Link Clicks", "clicks"),
    ])
}

#[test]
fn repository_save_and_load() {
    let dir = temp_repo_dir();
    let repo = TemplateRepository::new(&dir).expect("create repo");

    let template = sample_template("Weekly Export", "facebook");
    let path = repo.save(&template).expect("save template");
    assert!(path.exists());
    assert!(path.to_string_lossy().ends_with("facebook_weekly_export.json"));

    let loaded = repo
        .load("facebook", "Weekly Export")
        .expect("load template")
        .expect("template should exist");
    assert_eq!(loaded, template);

    let stored = repo
        .load_stored("facebook", "Weekly Export")
        .expect("load stored")
        .expect("stored template");
    assert!(stored.saved_at.is_some());
    assert_eq!(stored.version, "1.0");

    cleanup_dir(&dir);
}

#[test]
fn repository_load_nonexistent() {
    let dir = temp_repo_dir();
    let repo = TemplateRepository::new(&dir).expect("create repo");
    assert!(repo.load("tiktok", "missing").expect("load attempt").is_none());
    assert!(!repo.exists("tiktok", "missing"));
    cleanup_dir(&dir);
}

#[test]
fn repository_list_sorted_by_platform_then_name() {
    let dir = temp_repo_dir();
    let repo = TemplateRepository::new(&dir).expect("create repo");
    repo.save(&sample_template("b", "google")).expect("save");
    repo.save(&sample_template("a", "google")).expect("save");
    repo.save(&sample_template("z", "facebook")).expect("save");
    fs::write(dir.join("notes.txt"), "not a template").expect("write stray file");
    fs::write(dir.join("broken.json"), "{ not json").expect("write broken file");

    let listed = repo.list().expect("list");
    let keys: Vec<(&str, &str)> = listed
        .iter()
        .map(|m| (m.platform.as_str(), m.name.as_str()))
        .collect();
    assert_eq!(keys, vec![("facebook", "z"), ("google", "a"), ("google", "b")]);
    assert!(listed.iter().all(|m| m.mapping_count == 3));

    assert_eq!(repo.list_platform("GOOGLE").expect("list platform").len(), 2);
    cleanup_dir(&dir);
}

#[test]
fn only_one_default_per_platform() {
    let dir = temp_repo_dir();
    let repo = TemplateRepository::new(&dir).expect("create repo");

    repo.save(&sample_template("first", "google").with_default(true))
        .expect("save first");
    repo.save(&sample_template("other platform", "facebook").with_default(true))
        .expect("save facebook");
    repo.save(&sample_template("second", "google").with_default(true))
        .expect("save second");

    let default = repo
        .default_for("google")
        .expect("default lookup")
        .expect("google default");
    assert_eq!(default.name, "second");

    let first = repo
        .load("google", "first")
        .expect("load")
        .expect("first exists");
    assert!(!first.is_default);

    let facebook = repo
        .default_for("facebook")
        .expect("default lookup")
        .expect("facebook default");
    assert_eq!(facebook.name, "other platform");
    assert!(repo.default_for("tiktok").expect("default lookup").is_none());

    cleanup_dir(&dir);
}

#[test]
fn names_sharing_a_file_do_not_overwrite_each_other() {
    let dir = temp_repo_dir();
    let repo = TemplateRepository::new(&dir).expect("create repo");
    let first = sample_template("Weekly Export", "facebook");
    repo.save(&first).expect("save first");

    let second = MappingTemplate::new("weekly-export", "facebook").with_mapping([("Day", "date")]);
    let error = repo.save(&second).expect_err("colliding name is refused");
    assert!(error.to_string().contains("would overwrite 'Weekly Export'"));

    let loaded = repo
        .load("facebook", "Weekly Export")
        .expect("load")
        .expect("first survives");
    assert_eq!(loaded, first);
    assert!(repo.load("facebook", "weekly-export").expect("load").is_none());
    assert!(!repo.exists("facebook", "weekly-export"));
    assert!(!repo.delete("facebook", "weekly-export").expect("delete other name"));
    assert!(repo.exists("facebook", "Weekly Export"));

    // Re-saving under the same name still replaces the record.
    let updated = first.clone().with_shared(true);
    repo.save(&updated).expect("resave");
    let loaded = repo
        .load("facebook", "Weekly Export")
        .expect("load")
        .expect("updated");
    assert!(loaded.is_shared);
    cleanup_dir(&dir);
}

#[test]
fn metadata_uses_camel_case_wire_names() {
    let dir = temp_repo_dir();
    let repo = TemplateRepository::new(&dir).expect("create repo");
    repo.save(&sample_template("weekly", "google").with_default(true))
        .expect("save");
    let listed = repo.list().expect("list");
    let json = serde_json::to_value(&listed[0]).expect("serialize metadata");
    assert_eq!(json["mappingCount"], 3);
    assert_eq!(json["isDefault"], true);
    assert!(json.get("filePath").is_some());
    assert!(json.get("mapping_count").is_none());
    cleanup_dir(&dir);
}

#[test]
fn repository_delete() {
    let dir = temp_repo_dir();
    let repo = TemplateRepository::new(&dir).expect("create repo");
    repo.save(&sample_template("weekly", "google")).expect("save");

    assert!(repo.delete("google", "weekly").expect("delete"));
    assert!(!repo.delete("google", "weekly").expect("delete again"));
    assert!(!repo.exists("google", "weekly"));
    cleanup_dir(&dir);
}

#[test]
fn stored_description_round_trips() {
    let dir = temp_repo_dir();
    let repo = TemplateRepository::new(&dir).expect("create repo");
    let stored = StoredTemplate::new(sample_template("weekly", "google"))
        .with_description("Google Ads weekly report");
    repo.save_stored(&stored).expect("save stored");

    let loaded = repo
        .load_stored("google", "weekly")
        .expect("load")
        .expect("exists");
    assert_eq!(
        loaded.description.as_deref(),
        Some("Google Ads weekly report")
    );
    cleanup_dir(&dir);
}

#[test]
fn failed_template_load_leaves_session_untouched() {
    let dir = temp_repo_dir();
    let repo = TemplateRepository::new(&dir).expect("create repo");
    fs::write(dir.join("google_weekly.json"), "{ truncated").expect("write corrupt file");

    let mut session = MappingSession::new(
        vec![DetectedColumn::new("Day", ColumnDataType::String)],
        canonical_schema(),
    );
    session.assign("Day", "date").expect("assign");

    let loaded = repo.load("google", "weekly");
    assert!(loaded.is_err());
    if let Ok(Some(template)) = loaded {
        session.load_template(&template);
    }
    assert_eq!(session.field_for("Day"), Some("date"));
    assert!(session.validate().is_valid);
    cleanup_dir(&dir);
}
