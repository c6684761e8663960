//! Template repository for persisting and reusing mapping templates.
//!
//! Templates are stored as JSON files named `{platform}_{name}.json` in a
//! single directory. At most one template per platform carries the default
//! flag; saving a new default clears the flag on the others.
//!
//! Distinct names can normalize to the same file name. The stored record is
//! authoritative: a file only answers for the exact name it was saved under.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use campaign_model::MappingTemplate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Environment variable for overriding the template directory.
pub const TEMPLATE_DIR_ENV_VAR: &str = "CAMPAIGN_TEMPLATE_DIR";

/// Template directory from `CAMPAIGN_TEMPLATE_DIR`, falling back to `fallback`.
pub fn template_dir_or(fallback: impl Into<PathBuf>) -> PathBuf {
    std::env::var(TEMPLATE_DIR_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map_or_else(|| fallback.into(), PathBuf::from)
}

/// Repository for storing and retrieving mapping templates.
#[derive(Debug, Clone)]
pub struct TemplateRepository {
    base_dir: PathBuf,
}

/// Metadata about a stored template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    pub name: String,
    pub platform: String,
    pub file_path: PathBuf,
    pub mapping_count: usize,
    pub is_default: bool,
    pub is_shared: bool,
    pub saved_at: Option<String>,
}

/// Template with repository metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTemplate {
    #[serde(flatten)]
    pub template: MappingTemplate,
    /// When the template was saved (RFC 3339).
    pub saved_at: Option<String>,
    pub description: Option<String>,
    /// Version of the storage format.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl StoredTemplate {
    pub fn new(template: MappingTemplate) -> Self {
        Self {
            template,
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            description: None,
            version: default_version(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl TemplateRepository {
    /// Open a repository, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!("Failed to create template repository: {}", base_dir.display())
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Save a template, returning the file it was written to.
    pub fn save(&self, template: &MappingTemplate) -> Result<PathBuf> {
        self.save_stored(&StoredTemplate::new(template.clone()))
    }

    /// Save a stored record.
    ///
    /// Fails without writing when the target file already holds a template
    /// with a different name or platform.
    pub fn save_stored(&self, stored: &StoredTemplate) -> Result<PathBuf> {
        let template = &stored.template;
        let path = self.template_path(&template.platform, &template.name);
        if path.exists() {
            let existing = read_stored(&path)?;
            if !same_key(&existing.template, &template.platform, &template.name) {
                bail!(
                    "template '{}' ({}) would overwrite '{}' ({}) stored at {}",
                    template.name,
                    template.platform,
                    existing.template.name,
                    existing.template.platform,
                    path.display()
                );
            }
        }
        if template.is_default {
            self.clear_default(&template.platform, &template.name)?;
        }
        write_stored(&path, stored)?;
        info!(
            template = %template.name,
            platform = %template.platform,
            path = %path.display(),
            "template saved"
        );
        Ok(path)
    }

    /// Load a template by platform and name. Returns `None` if absent.
    pub fn load(&self, platform: &str, name: &str) -> Result<Option<MappingTemplate>> {
        Ok(self.load_stored(platform, name)?.map(|s| s.template))
    }

    pub fn load_stored(&self, platform: &str, name: &str) -> Result<Option<StoredTemplate>> {
        let path = self.template_path(platform, name);
        if !path.exists() {
            return Ok(None);
        }
        let stored = read_stored(&path)?;
        if !same_key(&stored.template, platform, name) {
            return Ok(None);
        }
        Ok(Some(stored))
    }

    /// The default template for a platform, if one is flagged.
    pub fn default_for(&self, platform: &str) -> Result<Option<MappingTemplate>> {
        Ok(self
            .stored_templates()?
            .into_iter()
            .map(|(_, stored)| stored.template)
            .find(|t| t.is_default && t.platform.eq_ignore_ascii_case(platform)))
    }

    /// List all templates, sorted by platform then name.
    pub fn list(&self) -> Result<Vec<TemplateMetadata>> {
        let mut metadata: Vec<TemplateMetadata> = self
            .stored_templates()?
            .into_iter()
            .map(|(path, stored)| TemplateMetadata {
                name: stored.template.name.clone(),
                platform: stored.template.platform.clone(),
                file_path: path,
                mapping_count: stored.template.mapping.len(),
                is_default: stored.template.is_default,
                is_shared: stored.template.is_shared,
                saved_at: stored.saved_at,
            })
            .collect();
        metadata.sort_by(|a, b| {
            a.platform
                .cmp(&b.platform)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(metadata)
    }

    /// List templates for one platform.
    pub fn list_platform(&self, platform: &str) -> Result<Vec<TemplateMetadata>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|m| m.platform.eq_ignore_ascii_case(platform))
            .collect())
    }

    /// Delete a template. Returns whether a file was removed.
    pub fn delete(&self, platform: &str, name: &str) -> Result<bool> {
        let path = self.template_path(platform, name);
        if self.load_stored(platform, name)?.is_some() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete template: {}", path.display()))?;
            info!(template = %name, platform = %platform, "template deleted");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn exists(&self, platform: &str, name: &str) -> bool {
        matches!(self.load_stored(platform, name), Ok(Some(_)))
    }

    fn template_path(&self, platform: &str, name: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}_{}.json", normalize_id(platform), normalize_id(name)))
    }

    /// Every readable template file; unreadable ones are logged and skipped.
    fn stored_templates(&self) -> Result<Vec<(PathBuf, StoredTemplate)>> {
        let mut templates = Vec::new();
        for entry in fs::read_dir(&self.base_dir).with_context(|| {
            format!("Failed to read repository: {}", self.base_dir.display())
        })? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_stored(&path) {
                Ok(stored) => templates.push((path, stored)),
                Err(error) => warn!(path = %path.display(), error = %error, "skipping template file"),
            }
        }
        Ok(templates)
    }

    fn clear_default(&self, platform: &str, keep_name: &str) -> Result<()> {
        let keep = self.template_path(platform, keep_name);
        for (path, mut stored) in self.stored_templates()? {
            if path == keep
                || !stored.template.is_default
                || !stored.template.platform.eq_ignore_ascii_case(platform)
            {
                continue;
            }
            stored.template.is_default = false;
            write_stored(&path, &stored)?;
            info!(
                template = %stored.template.name,
                platform = %platform,
                "cleared previous default template"
            );
        }
        Ok(())
    }
}

fn read_stored(path: &Path) -> Result<StoredTemplate> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read template from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse template from {}", path.display()))
}

fn write_stored(path: &Path, stored: &StoredTemplate) -> Result<()> {
    let json = serde_json::to_string_pretty(stored)
        .with_context(|| format!("Failed to serialize template {}", stored.template.name))?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write template to {}", path.display()))
}

/// Whether a stored template answers for `platform` and `name`.
fn same_key(template: &MappingTemplate, platform: &str, name: &str) -> bool {
    template.name == name && template.platform.eq_ignore_ascii_case(platform)
}

/// Normalize an ID for use in filenames.
fn normalize_id(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
