use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info, info_span};

use campaign_map::{
    ConfidenceThresholds, MappingSession, StoredTemplate, SuggestionEngine, TemplateRepository,
    template_dir_or,
};
use campaign_model::{MappingSubmission, SessionOptions, ValidationResult};
use campaign_standards::{LoadedSchema, load_schema};

use crate::cli::{
    RepositoryArgs, SchemaArgs, SuggestArgs, TemplateCommand, ThresholdsArg, ValidateArgs,
};
use crate::inputs::{load_columns, load_mapping};
use crate::summary::{print_fields, print_suggestions, print_templates, print_validation};

const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// A session with its mapping applied, tied to the schema version it was built against.
#[derive(Debug)]
pub struct PreparedValidation {
    pub session: MappingSession,
    pub schema_version: String,
}

impl PreparedValidation {
    /// Submission payload stamped with the session's schema version.
    pub fn submission(&self) -> Option<MappingSubmission> {
        self.session.submission(&self.schema_version)
    }
}

pub fn run_fields(schema_args: &SchemaArgs) -> Result<()> {
    let schema = resolve_schema(schema_args)?;
    println!("Schema version: {}", schema.version);
    print_fields(&schema.fields);
    Ok(())
}

/// Build the session for `validate` without printing anything.
///
/// Entries of a `--mapping` file are replayed through
/// [`MappingSession::assign`], so the unassign sentinel, field displacement
/// and the strict reference policy behave as they do for interactive edits.
/// `--platform` alone loads that platform's default template.
pub fn prepare_validation(
    args: &ValidateArgs,
    schema_args: &SchemaArgs,
) -> Result<PreparedValidation> {
    let schema = resolve_schema(schema_args)?;
    let columns = load_columns(&args.columns)?;
    let options = if args.strict {
        SessionOptions::strict()
    } else {
        SessionOptions::new()
    };
    let span = info_span!("validate", columns = columns.len(), strict = args.strict);
    let _guard = span.enter();

    let mut session = MappingSession::with_options(columns, schema.fields, options);
    if let Some(path) = &args.mapping {
        let assignment = load_mapping(path)?;
        for (column, field) in assignment.iter() {
            session
                .assign(column, field)
                .with_context(|| format!("apply mapping from {}", path.display()))?;
        }
    } else if let Some(platform) = &args.platform {
        let repo = open_repository(&args.repository)?;
        let template = match &args.template {
            Some(name) => repo
                .load(platform, name)?
                .ok_or_else(|| anyhow!("template '{name}' not found for platform '{platform}'"))?,
            None => repo
                .default_for(platform)?
                .ok_or_else(|| anyhow!("no default template for platform '{platform}'"))?,
        };
        session.load_template(&template);
    } else {
        debug!("no mapping given; validating an empty assignment");
    }
    Ok(PreparedValidation {
        session,
        schema_version: schema.version,
    })
}

/// The verdict as pretty-printed JSON, in its camelCase wire shape.
pub fn validation_json(validation: &ValidationResult) -> Result<String> {
    serde_json::to_string_pretty(validation).context("serialize validation")
}

/// Validate a mapping; returns whether it may be submitted.
pub fn run_validate(args: &ValidateArgs, schema_args: &SchemaArgs) -> Result<bool> {
    let prepared = prepare_validation(args, schema_args)?;
    let session = &prepared.session;
    if args.json {
        println!("{}", validation_json(session.validate())?);
    } else {
        print_validation(session);
    }
    if let Some(submission) = prepared.submission() {
        debug!(
            fields = submission.mapping.len(),
            schema_version = %submission.schema_version,
            "mapping ready for submission"
        );
    }
    Ok(session.can_continue())
}

pub fn run_suggest(args: &SuggestArgs, schema_args: &SchemaArgs) -> Result<()> {
    if !(0.0..=1.0).contains(&args.min_confidence) {
        bail!("--min-confidence must be between 0.0 and 1.0");
    }
    let schema = resolve_schema(schema_args)?;
    let columns = load_columns(&args.columns)?;
    let engine = SuggestionEngine::new(schema.fields, args.min_confidence);
    let result = engine.suggest(&columns);
    let thresholds = match args.thresholds {
        ThresholdsArg::Default => ConfidenceThresholds::default(),
        ThresholdsArg::Strict => ConfidenceThresholds::strict(),
        ThresholdsArg::Relaxed => ConfidenceThresholds::relaxed(),
    };
    print_suggestions(&result, &thresholds);

    let (Some(name), Some(platform)) = (&args.save, &args.platform) else {
        return Ok(());
    };
    let template = result
        .into_template(name, platform)
        .with_default(args.default)
        .with_shared(args.shared);
    let repo = open_repository(&args.repository)?;
    let path = repo.save(&template)?;
    info!(path = %path.display(), "saved suggested template");
    println!("Saved template to {}", path.display());
    Ok(())
}

pub fn run_templates(command: &TemplateCommand) -> Result<()> {
    match command {
        TemplateCommand::List {
            platform,
            repository,
        } => {
            let repo = open_repository(repository)?;
            let templates = match platform {
                Some(platform) => repo.list_platform(platform)?,
                None => repo.list()?,
            };
            print_templates(&templates);
        }
        TemplateCommand::Show {
            platform,
            name,
            repository,
        } => {
            let repo = open_repository(repository)?;
            let stored: StoredTemplate = repo
                .load_stored(platform, name)?
                .ok_or_else(|| anyhow!("template '{name}' not found for platform '{platform}'"))?;
            let output = serde_json::to_string_pretty(&stored).context("serialize template")?;
            println!("{output}");
        }
        TemplateCommand::Delete {
            platform,
            name,
            repository,
        } => {
            let repo = open_repository(repository)?;
            if !repo.delete(platform, name)? {
                bail!("template '{name}' not found for platform '{platform}'");
            }
            println!("Deleted template '{name}' ({platform})");
        }
    }
    Ok(())
}

fn resolve_schema(args: &SchemaArgs) -> Result<LoadedSchema> {
    load_schema(args.schema.clone(), args.schema_version.clone())
        .context("load canonical schema")
}

fn open_repository(args: &RepositoryArgs) -> Result<TemplateRepository> {
    let dir: PathBuf = args
        .template_dir
        .clone()
        .unwrap_or_else(|| template_dir_or(DEFAULT_TEMPLATE_DIR));
    TemplateRepository::new(dir.clone())
        .with_context(|| format!("open template directory {}", dir.display()))
}
