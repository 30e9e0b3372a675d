use anyhow::Context;
use clap::{Parser, Subcommand};
use namesake::{
    extract, featurize_pairs, import_json, read_pairs, write_matrix_csv, CompareRequest,
    FeatureImportanceResponse, MatchConfig, MatchService, ModelStore, SearchRequest,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Explainable similarity matching for romanized Hindi names
#[derive(Parser, Debug)]
#[command(name = "namesake")]
#[command(about = "Explainable similarity matching for romanized Hindi names", long_about = None)]
struct Args {
    /// Path to a binary model artifact
    #[arg(short, long, global = true)]
    model: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Match threshold, overrides the config file
    #[arg(short, long, global = true)]
    threshold: Option<f64>,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare two names
    Compare { name1: String, name2: String },

    /// Rank candidate names against a query
    Search {
        query: String,
        candidates: Vec<String>,

        /// Read additional candidates from a file, one per line
        #[arg(long)]
        candidates_file: Option<PathBuf>,
    },

    /// Print the feature importances of the active model
    Importance,

    /// Print the feature vector of a name pair
    Features { name1: String, name2: String },

    /// Turn a labeled pairs CSV (name1,name2,is_match) into a training matrix
    Featurize {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert a JSON model export into a binary artifact
    Import {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match &args.command {
        Command::Compare { name1, name2 } => {
            let service = open_service(&args)?;
            let response = service.compare(&CompareRequest::new(name1.as_str(), name2.as_str()))?;
            print_json(&response)
        }
        Command::Search {
            query,
            candidates,
            candidates_file,
        } => {
            let mut names = candidates.clone();
            if let Some(path) = candidates_file {
                names.extend(read_lines(path)?);
            }
            let service = open_service(&args)?;
            let response = service.search(&SearchRequest::new(query.as_str(), names))?;
            print_json(&response)
        }
        Command::Importance => {
            let service = open_service(&args)?;
            print_json(&ImportanceReport::from(service.feature_importance()))
        }
        Command::Features { name1, name2 } => print_json(&extract(name1, name2)),
        Command::Featurize { input, output } => {
            let file = File::open(input)
                .with_context(|| format!("cannot open {}", input.display()))?;
            let pairs = read_pairs(BufReader::new(file))?;
            let matrix = featurize_pairs(&pairs);
            let out = File::create(output)
                .with_context(|| format!("cannot create {}", output.display()))?;
            write_matrix_csv(&matrix, BufWriter::new(out))?;
            info!(
                rows = matrix.len(),
                positive_rate = matrix.positive_rate(),
                output = %output.display(),
                "training matrix written"
            );
            Ok(())
        }
        Command::Import { input, output } => {
            let artifact = import_json(input)?;
            let description = ModelStore::new(output).save(&artifact)?;
            print_json(&description)
        }
    }
}

/// Importances heaviest first
#[derive(Serialize)]
struct ImportanceReport {
    feature_importance: Option<Vec<RankedImportance>>,
    model_backed: bool,
}

#[derive(Serialize)]
struct RankedImportance {
    feature: &'static str,
    importance: f64,
}

impl From<FeatureImportanceResponse> for ImportanceReport {
    fn from(response: FeatureImportanceResponse) -> Self {
        let feature_importance = response.feature_importance.map(|imp| {
            imp.ranked()
                .into_iter()
                .map(|(feature, importance)| RankedImportance { feature, importance })
                .collect()
        });
        Self {
            feature_importance,
            model_backed: response.model_backed,
        }
    }
}

/// Config file first, then command-line overrides
fn open_service(args: &Args) -> anyhow::Result<MatchService> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::from_file(path)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => MatchConfig::default(),
    };
    if let Some(model) = &args.model {
        config.model_path = Some(model.clone());
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    Ok(MatchService::open(config)?)
}

fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut names = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let name = line.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
