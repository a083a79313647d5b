//! PatentLens CLI
//!
//! Runs one extraction recipe over the PatentsView download tables:
//! - `cpc-count`, `text-cpc`, `patent-list`, `keyword-search`: recipes built from flags
//! - `run`: a recipe (plus input paths) from a JSON config file
//! - `preset`: one of the built-in recipes, run or printed as config

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use patentlens_pipeline::{
    preset, CpcCountRecipe, DatasetPaths, KeywordSearchRecipe, PatentListRecipe, Pipeline, Recipe,
    RunConfig, TextCpcRecipe, PRESET_NAMES,
};

mod report;

#[derive(Parser)]
#[command(name = "patentlens")]
#[command(
    author,
    version,
    about = "PatentLens: filtered, joined and aggregated PatentsView extracts"
)]
struct Cli {
    #[command(flatten)]
    inputs: InputArgs,

    /// Raise log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
struct InputArgs {
    /// Directory holding the dataset tables; relative table paths resolve against it.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Patent table (default: g_patent.tsv)
    #[arg(long, global = true)]
    patent: Option<PathBuf>,
    /// CPC table (default: g_cpc_current.tsv)
    #[arg(long, global = true)]
    cpc: Option<PathBuf>,
    /// Assignee table (default: g_assignee_disambiguated.tsv)
    #[arg(long, global = true)]
    assignee: Option<PathBuf>,
    /// Location table (default: g_location_disambiguated.tsv)
    #[arg(long, global = true)]
    location: Option<PathBuf>,
}

impl InputArgs {
    fn resolve(&self, base: DatasetPaths) -> DatasetPaths {
        let mut paths = match &self.data_dir {
            Some(dir) => base.resolve_in(dir),
            None => base,
        };
        if let Some(p) = &self.patent {
            paths.patent = p.clone();
        }
        if let Some(p) = &self.cpc {
            paths.cpc = p.clone();
        }
        if let Some(p) = &self.assignee {
            paths.assignee = p.clone();
        }
        if let Some(p) = &self.location {
            paths.location = p.clone();
        }
        paths
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Primary CPC rows in a subclass allowlist; reports distinct patents.
    CpcCount {
        /// CPC subclass to keep (repeatable), e.g. H02S
        #[arg(long = "subclass", required = true)]
        subclasses: Vec<String>,
        /// CPC sequence to keep ("0" = primary classification)
        #[arg(long, default_value = "0")]
        sequence: String,
        /// Output CSV
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Title/abstract keyword hits carrying a primary CPC; reports rows.
    TextCpc {
        /// Keyword to search for (repeatable, case-insensitive substring)
        #[arg(long = "keyword", required = true)]
        keywords: Vec<String>,
        /// Optional CPC subclass allowlist (repeatable)
        #[arg(long = "subclass")]
        subclasses: Vec<String>,
        #[arg(long, default_value = "0")]
        sequence: String,
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Enrich a CSV list of patent ids with CPC, assignee and location data.
    PatentList {
        /// CSV file with a `patent_id` column
        #[arg(long)]
        list: PathBuf,
        #[arg(long, default_value = "0")]
        sequence: String,
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Enrich every keyword hit with CPC, assignee and location data.
    KeywordSearch {
        #[arg(long = "keyword", required = true)]
        keywords: Vec<String>,
        #[arg(long, default_value = "0")]
        sequence: String,
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Run a recipe from a JSON config file.
    Run {
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Run a built-in preset (see `presets`).
    Preset {
        name: String,
        /// Print the preset as a JSON run config instead of running it
        #[arg(long)]
        print: bool,
        /// Override the preset's output file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List built-in presets.
    Presets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::CpcCount {
            subclasses,
            sequence,
            out,
        } => {
            let recipe = Recipe::CpcCount(CpcCountRecipe {
                sequence,
                cpc_subclasses: subclasses,
                output: out,
            });
            cmd_run(&cli.inputs, DatasetPaths::default(), recipe)?;
        }
        Commands::TextCpc {
            keywords,
            subclasses,
            sequence,
            out,
        } => {
            let recipe = Recipe::TextCpc(TextCpcRecipe {
                sequence,
                cpc_subclasses: subclasses,
                keywords,
                output: out,
            });
            cmd_run(&cli.inputs, DatasetPaths::default(), recipe)?;
        }
        Commands::PatentList {
            list,
            sequence,
            out,
        } => {
            let recipe = Recipe::PatentList(PatentListRecipe {
                patent_list: list,
                sequence,
                output: out,
            });
            cmd_run(&cli.inputs, DatasetPaths::default(), recipe)?;
        }
        Commands::KeywordSearch {
            keywords,
            sequence,
            out,
        } => {
            let recipe = Recipe::KeywordSearch(KeywordSearchRecipe {
                keywords,
                sequence,
                output: out,
            });
            cmd_run(&cli.inputs, DatasetPaths::default(), recipe)?;
        }
        Commands::Run { config } => {
            let config = RunConfig::from_path(&config)?;
            cmd_run(&cli.inputs, config.inputs, config.recipe)?;
        }
        Commands::Preset { name, print, out } => {
            let mut recipe = preset(&name)?;
            if let Some(out) = out {
                recipe.set_output(out);
            }
            if print {
                let config = RunConfig {
                    inputs: cli.inputs.resolve(DatasetPaths::default()),
                    recipe,
                };
                println!("{}", config.to_json_pretty()?);
            } else {
                cmd_run(&cli.inputs, DatasetPaths::default(), recipe)?;
            }
        }
        Commands::Presets => {
            for name in PRESET_NAMES {
                let recipe = preset(name)?;
                println!(
                    "{:<20} {:<16} -> {}",
                    name.bold(),
                    recipe.name(),
                    recipe.output().display()
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn cmd_run(inputs: &InputArgs, base: DatasetPaths, recipe: Recipe) -> Result<()> {
    let paths = inputs.resolve(base);
    tracing::debug!(inputs = ?paths, "resolved input tables");
    println!(
        "{} {} -> {}",
        "Running".green().bold(),
        recipe.name(),
        recipe.output().display()
    );

    let report = Pipeline::new(paths)
        .run(&recipe)
        .with_context(|| format!("recipe `{}` failed", recipe.name()))?;
    report::print_report(&report);
    Ok(())
}
