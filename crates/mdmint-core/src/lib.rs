pub mod config;
pub mod frontmatter;
pub mod fs;
pub mod interactive;
pub mod model;
pub mod record;
pub mod slug;
pub mod source;
pub mod writer;

pub use frontmatter::{Document, FrontmatterCodec, Metadata, YamlFrontmatter};
pub use record::Record;
pub use slug::{normalize, normalize_strict, Slugger};
pub use writer::{write_record, MergeWriter, WriteOutcome, WriteRequest};

use anyhow::{Context, Result};
use model::ImportOverrides;
use std::path::{Path, PathBuf};

const CONFIG_TEMPLATE: &str = r#"# mdmint project configuration
# Values here can be overridden in config.local.toml or on the command line.

[import]
titleField = "title"
contentField = "content"
outputDir = "content"
neverOverwrite = false

[slug]
strict = false
"#;

/// What an import run did, one bucket per record outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub written: usize,
    pub unchanged: usize,
    pub kept: usize,
    pub failed: usize,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.written + self.unchanged + self.kept + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    fn record(&mut self, outcome: &WriteOutcome) {
        match outcome {
            WriteOutcome::Written(_) => self.written += 1,
            WriteOutcome::Unchanged(_) => self.unchanged += 1,
            WriteOutcome::KeptExisting(_) => self.kept += 1,
        }
    }
}

/// Create `.mdmint/config.toml` in the current directory
pub fn cmd_init(force: bool) -> Result<()> {
    use owo_colors::OwoColorize;

    let config_path = Path::new(config::PROJECT_CONFIG);
    if config_path.exists() && !force {
        let overwrite = interactive::is_interactive()
            && interactive::prompt_confirm(
                &format!("{} already exists. Overwrite?", config::PROJECT_CONFIG),
                false,
            )?;
        if !overwrite {
            anyhow::bail!(
                "{} already exists.\n\nUse --force to overwrite it.",
                config::PROJECT_CONFIG
            );
        }
    }

    std::fs::create_dir_all(config::CONFIG_DIR)
        .with_context(|| format!("Failed to create {}", config::CONFIG_DIR))?;
    std::fs::write(config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", config::PROJECT_CONFIG))?;

    let gitignore = Path::new(config::CONFIG_DIR).join(".gitignore");
    if !gitignore.exists() {
        std::fs::write(&gitignore, "config.local.toml\n")
            .with_context(|| format!("Failed to write {}", gitignore.display()))?;
    }

    interactive::print_success(&format!("Created {}", config::PROJECT_CONFIG));
    println!();
    println!(
        "   Next: {}",
        "mdmint import <records.json>".bright_white()
    );
    Ok(())
}

/// Import every record found in `inputs` into Markdown files.
///
/// Per-record failures are counted, not fatal; unreadable sources are.
pub fn cmd_import(inputs: &[PathBuf], overrides: ImportOverrides) -> Result<ImportReport> {
    let config = config::load_config_with_precedence()?;
    let settings = config::resolve_import_settings(&config, overrides)?;

    let slugger = if settings.strict_slugs {
        Slugger::strict()
    } else {
        Slugger::new()
    };
    let writer = MergeWriter::new().with_slugger(slugger);
    let request = WriteRequest {
        title_field: &settings.title_field,
        content_field: settings.content_field.as_deref(),
        directory: &settings.output_dir,
        never_overwrite: settings.never_overwrite,
    };

    let mut report = ImportReport::default();
    for input in inputs {
        for source in source::discover_sources(input)? {
            let records = source::load_records(&source)?;
            interactive::print_section(&format!(
                "{} ({} records)",
                source.display(),
                records.len()
            ));

            for record in &records {
                match writer.try_write(&request, record) {
                    Ok(outcome) => {
                        print_outcome(&outcome);
                        report.record(&outcome);
                    }
                    Err(err) => {
                        interactive::print_error(&err.to_string());
                        report.failed += 1;
                    }
                }
            }
        }
    }

    println!();
    print_import_summary(&report);
    Ok(report)
}

/// Print the slug for `text`
pub fn cmd_slug(text: &str, strict: bool) -> Result<()> {
    let slug = if strict {
        normalize_strict(text)
    } else {
        normalize(text)
    };
    println!("{slug}");
    Ok(())
}

fn print_outcome(outcome: &WriteOutcome) {
    let path = outcome.path().as_str();
    match outcome {
        WriteOutcome::Written(_) => interactive::print_file("✓", path),
        WriteOutcome::Unchanged(_) => interactive::print_item(&format!("{path} (unchanged)")),
        WriteOutcome::KeptExisting(_) => interactive::print_item(&format!("{path} (exists, kept)")),
    }
}

fn print_import_summary(report: &ImportReport) {
    use comfy_table::presets::UTF8_FULL;
    use comfy_table::{Cell, Color, Row, Table};

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![Cell::new("Outcome"), Cell::new("Records")]);

    let rows = [
        ("Written", report.written, Color::Green),
        ("Unchanged", report.unchanged, Color::White),
        ("Kept (exists)", report.kept, Color::Yellow),
        ("Failed", report.failed, Color::Red),
    ];
    for (label, count, color) in rows {
        table.add_row(Row::from(vec![
            Cell::new(label).fg(Color::Cyan),
            Cell::new(count).fg(color),
        ]));
    }

    println!("{table}");
}
