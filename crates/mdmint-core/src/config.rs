use crate::model::{ImportOverrides, ImportSection, ImportSettings, PartialProjectConfig, SlugSection};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_DIR: &str = ".mdmint";
pub const PROJECT_CONFIG: &str = ".mdmint/config.toml";
pub const LOCAL_CONFIG: &str = ".mdmint/config.local.toml";

pub const DEFAULT_TITLE_FIELD: &str = "title";
pub const DEFAULT_CONTENT_FIELD: &str = "content";

/// Load config with precedence:
/// 1. User config (~/.mdmint/config.toml) - lowest priority
/// 2. Project config (.mdmint/config.toml)
/// 3. Local config (.mdmint/config.local.toml) - highest priority
///
/// Every layer is optional. A broken project config is an error; broken user
/// or local configs are skipped with a warning.
pub fn load_config_with_precedence() -> Result<PartialProjectConfig> {
    let mut configs = Vec::new();

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            match load_project_config(&user_config) {
                Ok(cfg) => configs.push(cfg),
                Err(e) => warn!("Failed to load user config: {e:#}"),
            }
        }
    }

    let project_config = Path::new(PROJECT_CONFIG);
    if project_config.exists() {
        configs.push(load_project_config(project_config)?);
    }

    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        match load_project_config(local_config) {
            Ok(cfg) => configs.push(cfg),
            Err(e) => warn!("Failed to load local config: {e:#}"),
        }
    }

    debug!(layers = configs.len(), "Loaded config layers");
    Ok(merge_configs(configs))
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join("config.toml"))
}

/// Load a single config layer
pub fn load_project_config(path: &Path) -> Result<PartialProjectConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: PartialProjectConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

/// Merge config layers field by field; later layers override earlier ones.
pub fn merge_configs(configs: Vec<PartialProjectConfig>) -> PartialProjectConfig {
    let mut merged = PartialProjectConfig::default();

    for cfg in configs {
        if let Some(new_import) = cfg.import {
            let import = merged.import.get_or_insert_with(ImportSection::default);
            if new_import.title_field.is_some() {
                import.title_field = new_import.title_field;
            }
            if new_import.content_field.is_some() {
                import.content_field = new_import.content_field;
            }
            if new_import.output_dir.is_some() {
                import.output_dir = new_import.output_dir;
            }
            if new_import.never_overwrite.is_some() {
                import.never_overwrite = new_import.never_overwrite;
            }
        }

        if let Some(new_slug) = cfg.slug {
            let slug = merged.slug.get_or_insert_with(SlugSection::default);
            if new_slug.strict.is_some() {
                slug.strict = new_slug.strict;
            }
        }
    }

    merged
}

/// Apply command-line overrides on top of the merged config and fill defaults.
/// The output directory has no default and must come from one of the two.
pub fn resolve_import_settings(
    config: &PartialProjectConfig,
    overrides: ImportOverrides,
) -> Result<ImportSettings> {
    let import = config.import.clone().unwrap_or_default();
    let slug = config.slug.clone().unwrap_or_default();

    let Some(output_dir) = overrides.output_dir.or(import.output_dir) else {
        bail!("No output directory: pass --out or set import.outputDir in {PROJECT_CONFIG}");
    };
    if output_dir.trim().is_empty() {
        bail!("Output directory must not be empty");
    }

    let title_field = overrides
        .title_field
        .or(import.title_field)
        .unwrap_or_else(|| DEFAULT_TITLE_FIELD.to_string());
    if title_field.trim().is_empty() {
        bail!("Title field must not be empty");
    }

    let content_field = overrides
        .content_field
        .or(import.content_field)
        .unwrap_or_else(|| DEFAULT_CONTENT_FIELD.to_string());

    Ok(ImportSettings {
        title_field,
        content_field: (!content_field.is_empty()).then_some(content_field),
        output_dir,
        never_overwrite: overrides
            .never_overwrite
            .or(import.never_overwrite)
            .unwrap_or(false),
        strict_slugs: overrides.strict_slugs.or(slug.strict).unwrap_or(false),
    })
}
