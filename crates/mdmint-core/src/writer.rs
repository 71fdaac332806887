// merge-writer: turn one record into a Markdown document, merging with what is on disk

use crate::frontmatter::{Document, FrontmatterCodec, FrontmatterError, Metadata, YamlFrontmatter};
use crate::fs::{Filesystem, StdFilesystem};
use crate::record::{scalar_text, Record, DATE_KEY};
use crate::slug::Slugger;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_yaml::Value;
use std::io;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const MARKDOWN_EXTENSION: &str = "md";

/// Where and how to write one record.
#[derive(Debug, Clone, Copy)]
pub struct WriteRequest<'a> {
    /// Record field the file name is derived from when no usable slug is present
    pub title_field: &'a str,
    /// Record field holding the document body; excluded from the frontmatter
    pub content_field: Option<&'a str>,
    /// Output directory, created if missing. Joined to the file name with `/`.
    pub directory: &'a str,
    /// Leave existing files untouched
    pub never_overwrite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The document was created or updated
    Written(Utf8PathBuf),
    /// Merging changed nothing, so the file was not rewritten
    Unchanged(Utf8PathBuf),
    /// The file exists and overwriting is disabled
    KeptExisting(Utf8PathBuf),
}

impl WriteOutcome {
    pub fn path(&self) -> &Utf8Path {
        match self {
            WriteOutcome::Written(path)
            | WriteOutcome::Unchanged(path)
            | WriteOutcome::KeptExisting(path) => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to render {path}: {source}")]
    Serialize {
        path: Utf8PathBuf,
        #[source]
        source: FrontmatterError,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes records as Markdown files with YAML frontmatter, merging into any
/// document already at the destination.
///
/// Record fields override existing frontmatter, the longer body wins and an
/// unchanged merge skips the write.
pub struct MergeWriter<F = StdFilesystem, C = YamlFrontmatter> {
    fs: F,
    codec: C,
    slugger: Slugger,
    clock: fn() -> DateTime<Utc>,
}

impl MergeWriter {
    pub fn new() -> Self {
        Self::with_collaborators(StdFilesystem, YamlFrontmatter)
    }
}

impl Default for MergeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Filesystem, C: FrontmatterCodec> MergeWriter<F, C> {
    pub fn with_collaborators(fs: F, codec: C) -> Self {
        Self {
            fs,
            codec,
            slugger: Slugger::new(),
            clock: Utc::now,
        }
    }

    pub fn with_slugger(mut self, slugger: Slugger) -> Self {
        self.slugger = slugger;
        self
    }

    /// Clock used to stamp documents that have no date
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Write `record`, returning `true` unless creating the directory,
    /// rendering or writing the file failed. Failures are logged.
    pub fn write(&self, request: &WriteRequest<'_>, record: &Record) -> bool {
        match self.try_write(request, record) {
            Ok(outcome) => {
                debug!(path = %outcome.path(), ?outcome, "Record handled");
                true
            }
            Err(err) => {
                warn!(error = %err, "Failed to write record");
                false
            }
        }
    }

    pub fn try_write(
        &self,
        request: &WriteRequest<'_>,
        record: &Record,
    ) -> Result<WriteOutcome, WriteError> {
        let stem = resolve_stem(record, request.title_field, &self.slugger);
        if stem.is_empty() {
            warn!(
                title_field = request.title_field,
                "Record produced an empty file name"
            );
        }
        let path = destination(request.directory, &stem);

        let directory = Utf8Path::new(request.directory);
        self.fs
            .create_dir_all(directory)
            .map_err(|source| WriteError::CreateDir {
                path: directory.to_owned(),
                source,
            })?;

        let existing = if self.fs.exists(&path) {
            if request.never_overwrite {
                debug!(path = %path, "Destination exists, keeping it");
                return Ok(WriteOutcome::KeptExisting(path));
            }
            self.read_existing(&path)
        } else {
            Document::default()
        };

        let metadata = merge_metadata(&existing.metadata, record, request.content_field, self.clock);
        let candidate = match request.content_field {
            Some(field) => content_text(record, field),
            None => String::new(),
        };
        let body = select_body(&existing.body, candidate);

        if metadata == existing.metadata && body == existing.body {
            debug!(path = %path, "No changes");
            return Ok(WriteOutcome::Unchanged(path));
        }

        let document = Document::new(metadata, body);
        let contents = self
            .codec
            .serialize(&document)
            .map_err(|source| WriteError::Serialize {
                path: path.clone(),
                source,
            })?;
        self.fs
            .write(&path, &contents)
            .map_err(|source| WriteError::Write {
                path: path.clone(),
                source,
            })?;

        info!(path = %path, "Wrote document");
        Ok(WriteOutcome::Written(path))
    }

    /// An unreadable or unparseable destination counts as empty
    fn read_existing(&self, path: &Utf8Path) -> Document {
        let text = match self.fs.read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path, error = %err, "Could not read existing document, treating it as empty");
                return Document::default();
            }
        };

        match self.codec.parse(&text) {
            Ok(document) => document,
            Err(err) => {
                warn!(path = %path, error = %err, "Could not parse existing frontmatter, treating it as empty");
                Document::default()
            }
        }
    }
}

/// File name stem: the record's slug verbatim when its trimmed length exceeds
/// one character, otherwise the normalized title.
pub fn resolve_stem(record: &Record, title_field: &str, slugger: &Slugger) -> String {
    if let Some(slug) = record.slug() {
        if slug.trim().chars().count() > 1 {
            return slug;
        }
    }
    slugger.normalize(&record.text(title_field).unwrap_or_default())
}

/// `{directory}/{stem}.md`, joined textually so the directory is used as given
pub fn destination(directory: &str, stem: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{directory}/{stem}.{MARKDOWN_EXTENSION}"))
}

/// Shallow union of `existing` and `record`, record fields winning. The
/// content field never appears in the result. A blank record date does not
/// replace an existing one; a date missing on both sides is filled from `clock`.
pub fn merge_metadata(
    existing: &Metadata,
    record: &Record,
    content_field: Option<&str>,
    clock: fn() -> DateTime<Utc>,
) -> Metadata {
    let blank_record_date = record.date().is_some_and(is_blank);
    let mut merged = existing.clone();
    for (key, value) in record.iter() {
        if blank_record_date && key == DATE_KEY {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }
    if let Some(field) = content_field {
        merged.remove(field);
    }

    if merged.get(DATE_KEY).map_or(true, is_blank) {
        merged.insert(DATE_KEY.to_string(), Value::String(timestamp(clock())));
    }
    merged
}

/// The existing body survives only when it is strictly longer; ties go to the
/// candidate.
pub fn select_body(existing: &str, candidate: String) -> String {
    if existing.chars().count() > candidate.chars().count() {
        existing.to_string()
    } else {
        candidate
    }
}

/// Write one record with the real filesystem and default slugger
pub fn write_record(
    title_field: &str,
    content_field: Option<&str>,
    directory: &str,
    record: &Record,
    never_overwrite: bool,
) -> bool {
    let request = WriteRequest {
        title_field,
        content_field,
        directory,
        never_overwrite,
    };
    MergeWriter::new().write(&request, record)
}

/// Body text from the content field. Nested values cannot become a body and
/// are dropped with a warning.
fn content_text(record: &Record, field: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(value) => scalar_text(value).unwrap_or_else(|| {
            warn!(field, "Content field is not text, leaving the body empty");
            String::new()
        }),
    }
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
