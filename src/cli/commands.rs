use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;

use crate::config::{ArchiveOptions, CollectionsOption};
use crate::dates::Period;
use crate::host::{Build, CollectionsPlugin, Plugin, load_source, write_destination};
use crate::models::Metadata;
use crate::pipeline::{ArchivePlugin, CollectedArchive, collect_archive};

#[derive(Parser)]
#[command(name = "period-archive")]
#[command(version = "0.1.0")]
#[command(
    about = "Group dated content records into year, month and day archive pages",
    long_about = None
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Archive a directory of JSON records and write the result
    Build(BuildArgs),
    /// Show how records fall into periods and collections
    Stats {
        /// Directory of JSON records
        #[arg(short, long)]
        source: PathBuf,

        /// JSON file with archive options; only `collections` applies
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct BuildArgs {
    /// Directory of JSON records
    #[arg(short, long)]
    pub source: PathBuf,

    /// Directory to write records, archive pages and metadata to
    #[arg(short, long)]
    pub destination: PathBuf,

    /// JSON file with archive options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Layout identifier for generated pages
    #[arg(long)]
    pub layout: Option<String>,

    /// Do not expose the archive in metadata
    #[arg(long)]
    pub no_metadata: bool,

    /// Do not generate root-level archive pages
    #[arg(long)]
    pub no_root_level: bool,

    /// Do not archive collections
    #[arg(long)]
    pub no_collections: bool,

    /// Last path segment of generated pages
    #[arg(long)]
    pub index_name: Option<String>,
}

impl BuildArgs {
    /// Options from the config file (if any) with command-line overrides applied
    pub fn options(&self) -> Result<ArchiveOptions> {
        let mut options = match &self.config {
            Some(path) => ArchiveOptions::from_file(path)
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => ArchiveOptions::default(),
        };

        if let Some(layout) = &self.layout {
            options.layout = Some(layout.clone());
        }
        if self.no_metadata {
            options.metadata = false;
        }
        if self.no_root_level {
            options.root_level = false;
        }
        if self.no_collections {
            options.collections = CollectionsOption::Disabled;
        }
        if let Some(index_name) = &self.index_name {
            options.index_name = index_name.clone();
        }

        Ok(options)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Commands::Build(args)) => {
            run_build(args)?;
        }
        Some(Commands::Stats { source, config }) => {
            show_stats(source, config.as_deref())?;
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run_build(args: &BuildArgs) -> Result<()> {
    let options = args.options()?;
    let files = load_source(&args.source)
        .with_context(|| format!("Failed to load records from {}", args.source.display()))?;
    let loaded = files.len();

    let mut build =
        Build::new(files).use_plugin(CollectionsPlugin).use_plugin(ArchivePlugin::new(options));
    build.build().context("Archive build failed")?;

    let written = write_destination(&args.destination, build.files(), build.metadata())
        .with_context(|| format!("Failed to write {}", args.destination.display()))?;

    println!("Archive build complete");
    println!("======================");
    println!("Records loaded: {}", loaded);
    println!("Archive pages: {}", build.files().len() - loaded);
    println!("Files written: {}", written);
    println!("Destination: {}", args.destination.display());

    Ok(())
}

fn show_stats(source: &Path, config: Option<&Path>) -> Result<()> {
    let options = match config {
        Some(path) => ArchiveOptions::from_file(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => ArchiveOptions::default(),
    };

    let mut files = load_source(source)
        .with_context(|| format!("Failed to load records from {}", source.display()))?;
    let mut metadata = Metadata::new();
    CollectionsPlugin.run(&mut files, &mut metadata).context("Failed to collect collections")?;

    let CollectedArchive { archive, records, archived, .. } =
        collect_archive(&files, &metadata, &options.collections)
            .context("Failed to archive records")?;

    println!("Archive Statistics");
    println!("==================");
    println!("Total records: {}", records);
    println!("  With valid dates: {}", archived);
    println!("  Skipped: {}", records - archived);

    for period in Period::ALL {
        println!("{}: {}", capitalize(period.name()), archive.root.buckets(period).len());
    }

    if !archive.root.years.is_empty() {
        println!();
        for (year, records) in archive.root.years.iter() {
            println!("  {}: {} records", year, records.len());
        }
    }

    if !archive.collections.is_empty() {
        println!();
        println!("Collections:");
        for (name, groups) in &archive.collections {
            println!("  {}: {} records", name, groups.years.record_count());
        }
    }

    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
