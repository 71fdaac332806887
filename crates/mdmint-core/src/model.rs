use serde::{Deserialize, Serialize};

/// One layer of `.mdmint` configuration. Every field is optional so user,
/// project and local files can each override part of the settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialProjectConfig {
    pub import: Option<ImportSection>,
    pub slug: Option<SlugSection>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ImportSection {
    #[serde(rename = "titleField")]
    pub title_field: Option<String>,
    /// Empty string disables the body field
    #[serde(rename = "contentField")]
    pub content_field: Option<String>,
    #[serde(rename = "outputDir")]
    pub output_dir: Option<String>,
    #[serde(rename = "neverOverwrite")]
    pub never_overwrite: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SlugSection {
    pub strict: Option<bool>,
}

/// Command-line values that take precedence over every config layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOverrides {
    pub title_field: Option<String>,
    pub content_field: Option<String>,
    pub output_dir: Option<String>,
    pub never_overwrite: Option<bool>,
    pub strict_slugs: Option<bool>,
}

/// Fully resolved settings for an import run
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSettings {
    pub title_field: String,
    pub content_field: Option<String>,
    pub output_dir: String,
    pub never_overwrite: bool,
    pub strict_slugs: bool,
}
