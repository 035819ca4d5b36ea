//! Entity Scaffold CLI
//!
//! Generates the React CRUD source tree for a metadata file, checks an
//! existing tree for drift, and inspects the entity reference graph.
//!
//! Usage:
//!   entity-scaffold generate --metadata metadata.json --scaffold kurse,raeume --out ./app
//!   entity-scaffold check --metadata metadata.json --out ./app --diff
//!   entity-scaffold graph --metadata metadata.json --format dot
//!   entity-scaffold config --output scaffold.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use entity_scaffold::drift::{self, FileStatus};
use entity_scaffold::{AppMetadata, Generator, LocaleSetting, ScaffoldConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "entity-scaffold")]
#[command(about = "Generate React CRUD pages and dialogs from app metadata")]
struct Cli {
    /// Configuration file layered over scaffold.toml and the environment
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate every document and write it to the output directory
    Generate {
        #[command(flatten)]
        run: RunArgs,

        /// List the files instead of writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Compare a fresh run against the output directory
    Check {
        #[command(flatten)]
        run: RunArgs,

        /// Print unified diffs for modified files
        #[arg(long)]
        diff: bool,
    },

    /// Print the entity reference graph
    Graph {
        /// Metadata JSON file
        #[arg(short, long)]
        metadata: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: GraphFormat,
    },

    /// Print the effective configuration, or save it
    Config {
        /// Write the configuration to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Metadata JSON file
    #[arg(short, long)]
    metadata: PathBuf,

    /// Entities to scaffold, comma separated (overrides config)
    #[arg(short, long, value_delimiter = ',')]
    scaffold: Vec<String>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// UI language (overrides config)
    #[arg(short, long, value_enum)]
    locale: Option<LocaleArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LocaleArg {
    Auto,
    En,
    De,
}

impl From<LocaleArg> for LocaleSetting {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Auto => LocaleSetting::Auto,
            LocaleArg::En => LocaleSetting::En,
            LocaleArg::De => LocaleSetting::De,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GraphFormat {
    Json,
    Dot,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli) {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = ScaffoldConfig::load_from(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Generate { run, dry_run } => generate(&config, &run, dry_run),
        Command::Check { run, diff } => check(&config, &run, diff),
        Command::Graph { metadata, format } => graph(&metadata, format),
        Command::Config { output } => show_config(&config, output.as_deref()),
    }
}

/// Generator and output directory after applying CLI overrides
fn prepare(config: &ScaffoldConfig, args: &RunArgs) -> Result<(Generator, PathBuf)> {
    let metadata = load_metadata(&args.metadata)?;
    let scaffolds = if args.scaffold.is_empty() {
        config.generator.scaffolds.clone()
    } else {
        args.scaffold.clone()
    };
    let locale = args
        .locale
        .map(LocaleSetting::from)
        .unwrap_or(config.generator.locale);
    let out = args.out.clone().unwrap_or_else(|| config.output.dir.clone());

    Ok((Generator::with_locale(metadata, scaffolds, locale), out))
}

fn load_metadata(path: &Path) -> Result<AppMetadata> {
    AppMetadata::from_path(path).with_context(|| format!("reading metadata from {}", path.display()))
}

fn generate(config: &ScaffoldConfig, args: &RunArgs, dry_run: bool) -> Result<()> {
    let (generator, out) = prepare(config, args)?;
    let files = generator.generate_all()?;

    if dry_run {
        for (path, sum) in files.checksums() {
            println!("{}  {}", &sum.as_str()[..12], path);
        }
        println!("\n{} files (dry run, nothing written)", files.len());
        return Ok(());
    }

    let written = files
        .write_to(&out)
        .with_context(|| format!("writing to {}", out.display()))?;
    if config.output.write_manifest {
        files.write_manifest(&out)?;
    }

    println!(
        "✅ Wrote {} files to {:?} ({} scaffolded, locale {})",
        written,
        out,
        generator.scaffolds().len(),
        generator.locale()
    );
    Ok(())
}

fn check(config: &ScaffoldConfig, args: &RunArgs, show_diff: bool) -> Result<()> {
    let (generator, out) = prepare(config, args)?;
    let files = generator.generate_all()?;
    let report = drift::compare(&files, &out)?;

    println!("🔍 Scaffold drift in {:?}\n", out);
    for file in &report.files {
        match &file.status {
            FileStatus::Unchanged => {}
            FileStatus::Missing => println!("  ➖ missing   {}", file.path),
            FileStatus::Modified { diff } => {
                println!("  ✏️  modified  {}", file.path);
                if show_diff {
                    println!("{diff}");
                }
            }
        }
    }
    for orphan in &report.orphans {
        println!("  ➕ orphan    {orphan}");
    }

    println!(
        "\n{} unchanged, {} modified, {} missing, {} orphaned",
        report.unchanged_count(),
        report.modified().count(),
        report.missing().count(),
        report.orphans.len()
    );

    if report.has_drift() {
        std::process::exit(1);
    }
    println!("✅ No drift");
    Ok(())
}

fn graph(metadata: &Path, format: GraphFormat) -> Result<()> {
    let generator = Generator::new(load_metadata(metadata)?, Vec::<String>::new());
    let graph = generator.reference_graph();

    match format {
        GraphFormat::Json => println!("{}", serde_json::to_string_pretty(&graph.export())?),
        GraphFormat::Dot => print!("{}", graph.to_dot()),
    }
    Ok(())
}

fn show_config(config: &ScaffoldConfig, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            config
                .save(path)
                .with_context(|| format!("saving configuration to {}", path.display()))?;
            println!("✅ Saved configuration to {:?}", path);
        }
        None => print!("{}", config.to_toml()?),
    }
    Ok(())
}
