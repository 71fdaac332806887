use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use mdmint_core::model::ImportOverrides;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mdmint",
    version,
    about = "Turn JSON/YAML records into Markdown files with YAML frontmatter"
)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). MDMINT_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create .mdmint/config.toml
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Write one Markdown file per record, merging into existing files
    Import {
        /// JSON, JSON Lines or YAML files, or directories containing them
        #[arg(required = true, value_name = "INPUT")]
        inputs: Vec<PathBuf>,
        /// Output directory (overrides import.outputDir)
        #[arg(long)]
        out: Option<String>,
        /// Field the file name is derived from
        #[arg(long)]
        title_field: Option<String>,
        /// Field holding the Markdown body; pass "" to disable
        #[arg(long)]
        content_field: Option<String>,
        /// Leave existing files untouched
        #[arg(long)]
        never_overwrite: bool,
        /// Keep scripts apart when transliterating titles
        #[arg(long)]
        strict_slugs: bool,
    },
    /// Print the slug for some text
    Slug {
        #[arg(required = true)]
        text: Vec<String>,
        #[arg(long)]
        strict: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("MDMINT_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Init { force } => mdmint_core::cmd_init(force)?,
        Command::Import {
            inputs,
            out,
            title_field,
            content_field,
            never_overwrite,
            strict_slugs,
        } => {
            let overrides = ImportOverrides {
                title_field,
                content_field,
                output_dir: out,
                never_overwrite: never_overwrite.then_some(true),
                strict_slugs: strict_slugs.then_some(true),
            };
            debug!(?overrides, "Importing {} input(s)", inputs.len());
            let report = mdmint_core::cmd_import(&inputs, overrides)?;
            if report.has_failures() {
                anyhow::bail!("{} of {} records failed to write", report.failed, report.total());
            }
        }
        Command::Slug { text, strict } => mdmint_core::cmd_slug(&text.join(" "), strict)?,
    }
    Ok(())
}
