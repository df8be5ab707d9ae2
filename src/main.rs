use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sociotype::settings::SETTINGS_FILE;
use sociotype::{
    CohortSummary, Engine, SchemaLoader, ScoringResult, ScoringSchema, Settings, Submission,
};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_chrome::{ChromeLayerBuilder, FlushGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file (TOML). Defaults to config/sociotype.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Scoring schema (JSON). Overrides the settings file.
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    /// Worker threads for batch scoring (0 = one per CPU).
    #[arg(long, global = true)]
    workers: Option<usize>,

    /// Enable tracing (generates a trace-timestamp.json file).
    #[arg(long, global = true)]
    tracing: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one submission. Pass `-` to read it from stdin.
    Score { input: String },

    /// Score a JSON array of submissions and summarise the cohort.
    Batch { input: PathBuf },

    /// Print the effective scoring schema, or validate a schema file.
    Schema {
        #[arg(long)]
        check: Option<PathBuf>,
    },

    /// Write a settings file with default values.
    InitConfig { path: Option<PathBuf> },
}

#[derive(Serialize)]
struct BatchReport {
    generated_at: DateTime<Utc>,
    results: Vec<ScoringResult>,
    cohort: CohortSummary,
    /// Same summary with suspect submissions left out.
    cohort_clean: CohortSummary,
}

fn merge_settings_with_args(settings: Settings, args: &Args) -> Settings {
    Settings {
        schema_path: args.schema.clone().or(settings.schema_path),
        pretty: args.pretty || settings.pretty,
        workers: args.workers.unwrap_or(settings.workers),
        log_filter: settings.log_filter,
    }
}

fn init_tracing(default_filter: &str, chrome: bool) -> Option<FlushGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr));

    if chrome {
        let (chrome_layer, guard) = ChromeLayerBuilder::new().build();
        registry.with(chrome_layer).init();
        Some(guard)
    } else {
        registry.init();
        None
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("reading submission from stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(input).with_context(|| format!("reading {}", input))
    }
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}

/// The configured schema file, else the project's `config/schema.json`, else
/// the built-in schema.
fn load_schema(settings: &Settings) -> Result<ScoringSchema> {
    let schema = match settings.schema_path.as_deref() {
        Some(path) => SchemaLoader::load_from_path(path),
        None => SchemaLoader::load_project_default(),
    };
    schema.context("loading scoring schema")
}

fn load_engine(settings: &Settings) -> Result<Engine> {
    Engine::new(load_schema(settings)?).context("building scoring engine")
}

fn score(input: &str, settings: &Settings) -> Result<()> {
    let engine = load_engine(settings)?;
    let submission: Submission = serde_json::from_str(&read_input(input)?)
        .context("submission must be a JSON object of answers")?;
    let result = engine.run_submission(&submission);
    emit(&result, settings.pretty)
}

fn batch(input: &Path, settings: &Settings) -> Result<()> {
    let engine = load_engine(settings)?;
    let content =
        fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let submissions: Vec<Submission> = serde_json::from_str(&content)
        .context("batch input must be a JSON array of submissions")?;

    info!(submissions = submissions.len(), "starting batch");
    let results = engine
        .run_batch(&submissions, settings.workers)
        .context("starting batch worker pool")?;

    let report = BatchReport {
        generated_at: Utc::now(),
        cohort: CohortSummary::from_results(&results),
        cohort_clean: CohortSummary::exclude_suspect(&results),
        results,
    };
    emit(&report, settings.pretty)
}

fn schema(check: Option<&Path>, settings: &Settings) -> Result<()> {
    match check {
        Some(path) => {
            let schema = SchemaLoader::load_from_path(path)
                .with_context(|| format!("{} is not a valid schema", path.display()))?;
            println!(
                "{}: ok ({} items, {} archetypes, {} pairs)",
                path.display(),
                schema.items.len(),
                schema.archetypes.len(),
                schema.pairs.len()
            );
            Ok(())
        }
        None => {
            let engine = load_engine(settings)?;
            emit(engine.schema(), settings.pretty)
        }
    }
}

fn init_config(path: Option<&Path>) -> Result<()> {
    let path = path.unwrap_or_else(|| Path::new(SETTINGS_FILE));
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    Settings::write_default(path)?;
    println!("Settings written to: {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Command::InitConfig { path } = &args.command {
        return init_config(path.as_deref());
    }

    let settings = Settings::load(args.config.as_deref())?;
    let settings = merge_settings_with_args(settings, &args);

    let _guard = init_tracing(&settings.log_filter, args.tracing);

    match &args.command {
        Command::Score { input } => score(input, &settings),
        Command::Batch { input } => batch(input, &settings),
        Command::Schema { check } => schema(check.as_deref(), &settings),
        Command::InitConfig { .. } => Ok(()),
    }
}
