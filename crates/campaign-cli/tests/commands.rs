use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use campaign_cli::cli::{Cli, Command, SchemaArgs, ValidateArgs};
use campaign_cli::commands::{prepare_validation, run_validate, validation_json};
use campaign_map::TemplateRepository;
use campaign_model::MappingTemplate;
use campaign_standards::SCHEMA_VERSION;
use clap::Parser;

const COLUMNS: &str = r#"[
    {"name": "Day", "dataType": "string"},
    {"name": "Cost", "dataType": "number"},
    {"name": "Amount Spent", "dataType": "number"},
    {"name": "Impressions", "dataType": "string"}
]"#;

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

fn temp_dir() -> PathBuf {
    let seq = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "campaign_cli_commands_{stamp}_{}_{seq}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).expect("write input");
    path.to_string_lossy().into_owned()
}

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["campaign-mapper"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("parse arguments")
}

fn validate_args(cli: Cli) -> (ValidateArgs, SchemaArgs) {
    match cli.command {
        Command::Validate(args) => (args, cli.schema),
        _ => panic!("expected validate command"),
    }
}

#[test]
fn invalid_mapping_is_not_submittable() {
    let dir = temp_dir();
    let columns = write(&dir, "columns.json", COLUMNS);
    let mapping = write(&dir, "mapping.json", r#"{"Impressions": "impressions"}"#);
    let (args, schema) = validate_args(parse(&[
        "validate",
        "--columns",
        &columns,
        "--mapping",
        &mapping,
        "--json",
    ]));

    let can_continue = run_validate(&args, &schema).expect("run validate");
    assert!(!can_continue);

    let prepared = prepare_validation(&args, &schema).expect("prepare");
    let validation = prepared.session.validate();
    assert_eq!(validation.missing_required_fields, vec!["date".to_string()]);
    assert_eq!(validation.type_mismatches.len(), 1);
    assert!(prepared.submission().is_none());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn mapping_file_replays_through_assign() {
    let dir = temp_dir();
    let columns = write(&dir, "columns.json", COLUMNS);
    let mapping = write(
        &dir,
        "mapping.json",
        r#"{"Day": "date", "Cost": "spend", "Amount Spent": "spend", "Impressions": ""}"#,
    );
    let (args, schema) = validate_args(parse(&[
        "validate",
        "--columns",
        &columns,
        "--mapping",
        &mapping,
    ]));

    let prepared = prepare_validation(&args, &schema).expect("prepare");
    let session = &prepared.session;
    assert_eq!(session.column_for("spend"), Some("Amount Spent"));
    assert_eq!(session.field_for("Cost"), None);
    assert_eq!(session.field_for("Impressions"), None);
    assert!(session.validate().is_valid);
    assert_eq!(
        session.validate().warnings,
        vec!["2 columns remain unmapped".to_string()]
    );

    let submission = prepared.submission().expect("valid mapping submits");
    assert_eq!(submission.schema_version, SCHEMA_VERSION);
    assert_eq!(submission.mapping.len(), 2);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn strict_mapping_rejects_unknown_names() {
    let dir = temp_dir();
    let columns = write(&dir, "columns.json", COLUMNS);
    let mapping = write(&dir, "mapping.json", r#"{"Day": "date", "Ghost": "spend"}"#);
    let (args, schema) = validate_args(parse(&[
        "validate",
        "--columns",
        &columns,
        "--mapping",
        &mapping,
        "--strict",
    ]));

    let error = prepare_validation(&args, &schema).expect_err("unknown column");
    assert!(format!("{error:#}").contains("Column not found: Ghost"));

    let (lenient, schema) = validate_args(parse(&[
        "validate",
        "--columns",
        &columns,
        "--mapping",
        &mapping,
    ]));
    let prepared = prepare_validation(&lenient, &schema).expect("lenient accepts");
    assert!(prepared.session.validate().is_valid);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn platform_alone_loads_the_default_template() {
    let dir = temp_dir();
    let columns = write(&dir, "columns.json", COLUMNS);
    let repo_dir = dir.join("templates");
    let repo = TemplateRepository::new(&repo_dir).expect("create repo");
    repo.save(&MappingTemplate::new("partial", "facebook").with_mapping([("Cost", "spend")]))
        .expect("save partial");
    repo.save(
        &MappingTemplate::new("full", "facebook")
            .with_mapping([("Day", "date"), ("Amount Spent", "spend")])
            .with_default(true),
    )
    .expect("save default");

    let repo_arg = repo_dir.to_string_lossy().into_owned();
    let (args, schema) = validate_args(parse(&[
        "validate",
        "--columns",
        &columns,
        "--platform",
        "facebook",
        "--template-dir",
        &repo_arg,
    ]));
    let prepared = prepare_validation(&args, &schema).expect("prepare");
    assert_eq!(prepared.session.field_for("Amount Spent"), Some("spend"));
    assert!(prepared.session.validate().is_valid);

    let (args, schema) = validate_args(parse(&[
        "validate",
        "--columns",
        &columns,
        "--platform",
        "tiktok",
        "--template-dir",
        &repo_arg,
    ]));
    let error = prepare_validation(&args, &schema).expect_err("no default");
    assert!(error.to_string().contains("no default template for platform 'tiktok'"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn json_output_uses_wire_names() {
    let dir = temp_dir();
    let columns = write(&dir, "columns.json", COLUMNS);
    let (args, schema) = validate_args(parse(&["validate", "--columns", &columns, "--json"]));
    let prepared = prepare_validation(&args, &schema).expect("prepare");

    let json = validation_json(prepared.session.validate()).expect("render json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse json");
    assert_eq!(value["isValid"], false);
    assert_eq!(value["missingRequiredFields"], serde_json::json!(["date"]));
    assert_eq!(value["typeMismatches"], serde_json::json!([]));
    assert_eq!(
        value["warnings"],
        serde_json::json!(["4 columns remain unmapped"])
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn versioned_schema_override_stamps_the_submission() {
    let dir = temp_dir();
    let columns = write(&dir, "columns.json", r#"[{"name": "Day", "dataType": "date"}]"#);
    let schema_csv = write(
        &dir,
        "schema.csv",
        "Field Name,Type,Required,Description\nday,string,yes,Reporting day\n",
    );
    let mapping = write(&dir, "mapping.json", r#"{"Day": "day"}"#);
    let (args, schema) = validate_args(parse(&[
        "validate",
        "--columns",
        &columns,
        "--mapping",
        &mapping,
        "--schema",
        &schema_csv,
        "--schema-version",
        "2.0-custom",
    ]));

    let prepared = prepare_validation(&args, &schema).expect("prepare");
    let submission = prepared.submission().expect("valid mapping");
    assert_eq!(submission.schema_version, "2.0-custom");

    let (args, schema) = validate_args(parse(&[
        "validate",
        "--columns",
        &columns,
        "--schema",
        &schema_csv,
    ]));
    if std::env::var_os("CAMPAIGN_SCHEMA_VERSION").is_none() {
        assert!(prepare_validation(&args, &schema).is_err());
    }
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn mapping_conflicts_with_platform() {
    let result = Cli::try_parse_from([
        "campaign-mapper",
        "validate",
        "--columns",
        "c.json",
        "--mapping",
        "m.json",
        "--platform",
        "facebook",
    ]);
    assert!(result.is_err());

    let result = Cli::try_parse_from([
        "campaign-mapper",
        "validate",
        "--columns",
        "c.json",
        "--template",
        "weekly",
    ]);
    assert!(result.is_err());
}
