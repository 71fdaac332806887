// YAML frontmatter: split Markdown into metadata + body and join them back

use crate::record::{kind_of, scalar_text};
use serde_yaml::Value;
use std::collections::BTreeMap;
use thiserror::Error;

const DELIMITER: &str = "---";

/// Frontmatter fields. Keys iterate in byte-wise order, which is the order
/// they are serialized in.
pub type Metadata = BTreeMap<String, Value>;

/// A Markdown document split into its frontmatter and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub metadata: Metadata,
    pub body: String,
}

impl Document {
    pub fn new(metadata: Metadata, body: impl Into<String>) -> Self {
        Self {
            metadata,
            body: body.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("Invalid YAML frontmatter: {0}")]
    Parse(#[source] serde_yaml::Error),

    #[error("Frontmatter must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("Failed to serialize frontmatter: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// Reads and writes the frontmatter block of a document.
pub trait FrontmatterCodec {
    /// Text without a frontmatter block parses to empty metadata with the
    /// whole text as body.
    fn parse(&self, text: &str) -> Result<Document, FrontmatterError>;

    /// Metadata keys are emitted in sorted order.
    fn serialize(&self, document: &Document) -> Result<String, FrontmatterError>;
}

/// `---` delimited YAML frontmatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFrontmatter;

impl FrontmatterCodec for YamlFrontmatter {
    fn parse(&self, text: &str) -> Result<Document, FrontmatterError> {
        let Some((yaml, body)) = split_frontmatter(text) else {
            return Ok(Document::new(Metadata::new(), text));
        };

        let metadata = if yaml.trim().is_empty() {
            Metadata::new()
        } else {
            let value: Value = serde_yaml::from_str(yaml).map_err(FrontmatterError::Parse)?;
            into_metadata(value)?
        };

        Ok(Document::new(metadata, body))
    }

    fn serialize(&self, document: &Document) -> Result<String, FrontmatterError> {
        let yaml = if document.metadata.is_empty() {
            String::new()
        } else {
            serde_yaml::to_string(&document.metadata).map_err(FrontmatterError::Serialize)?
        };
        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n{}", document.body))
    }
}

/// Split `text` into the YAML between the opening and closing `---` lines and
/// the body after the closing line. The body is returned verbatim.
fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let first_end = text.find('\n')?;
    if text[..first_end].trim() != DELIMITER {
        return None;
    }

    let rest = &text[first_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        // indented `---` belongs to a block scalar, not the delimiter
        if line.trim_end() == DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn into_metadata(value: Value) -> Result<Metadata, FrontmatterError> {
    match value {
        Value::Null => Ok(Metadata::new()),
        Value::Mapping(mapping) => Ok(mapping
            .into_iter()
            .filter_map(|(key, value)| scalar_text(&key).map(|key| (key, value)))
            .collect()),
        Value::Tagged(tagged) => into_metadata(tagged.value),
        other => Err(FrontmatterError::NotAMapping(kind_of(&other))),
    }
}
