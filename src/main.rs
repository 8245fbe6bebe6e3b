//! Affinity Engine CLI
//!
//! Ranks a candidate pool against one target profile and prints the report
//! as JSON.

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use affinity_engine::adapters::JsonProfileStore;
use affinity_engine::application::{FindMatchesHandler, FindMatchesQuery};
use affinity_engine::config::{AppConfig, LoggingConfig};
use affinity_engine::domain::foundation::UserId;
use affinity_engine::domain::matching::{
    MatchWeights, PrimaryTypeCode, RankedMatch, SecondaryType, UserVector,
};

#[derive(Parser)]
#[command(name = "affinity-engine")]
#[command(about = "Rank compatibility matches for one profile against a candidate pool")]
struct Args {
    /// Target profile (flat trait record or analysis report)
    #[arg(long, short = 't')]
    target: PathBuf,

    /// Candidate file (array or {"candidates": [...]}) or directory of profiles
    #[arg(long, short = 'c')]
    candidates: PathBuf,

    /// Maximum number of matches to return
    #[arg(long, short = 'k')]
    limit: Option<usize>,

    /// Drop matches with a total score below this (0.0 to 1.0)
    #[arg(long)]
    min_score: Option<f64>,

    /// Similarity weight override
    #[arg(long)]
    w_similarity: Option<f64>,

    /// Chemistry weight override
    #[arg(long)]
    w_chemistry: Option<f64>,

    /// Activity weight override
    #[arg(long)]
    w_activity: Option<f64>,

    /// Write the report here instead of stdout
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,
}

impl Args {
    fn weights(&self, defaults: MatchWeights) -> Option<MatchWeights> {
        if self.w_similarity.is_none() && self.w_chemistry.is_none() && self.w_activity.is_none()
        {
            return None;
        }
        Some(MatchWeights {
            similarity: self.w_similarity.unwrap_or(defaults.similarity),
            chemistry: self.w_chemistry.unwrap_or(defaults.chemistry),
            activity: self.w_activity.unwrap_or(defaults.activity),
        })
    }
}

#[derive(Serialize)]
struct TargetSummary {
    user_id: UserId,
    display_name: String,
    primary_type: Option<PrimaryTypeCode>,
    secondary_type: Option<SecondaryType>,
    activity_count: u32,
}

impl From<&UserVector> for TargetSummary {
    fn from(user: &UserVector) -> Self {
        Self {
            user_id: user.user_id.clone(),
            display_name: user.display_name.clone(),
            primary_type: user.primary_type,
            secondary_type: user.secondary_type,
            activity_count: user.activity_count,
        }
    }
}

#[derive(Serialize)]
struct ReportEnvelope {
    generated_at: DateTime<Utc>,
    target: TargetSummary,
    weights: MatchWeights,
    population_size: usize,
    skipped: usize,
    matches: Vec<RankedMatch>,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    // Logs go to stderr so stdout stays a clean JSON report
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let target = JsonProfileStore::read_profile(&args.target).await?;
    let source = Arc::new(JsonProfileStore::new(&args.candidates));
    let handler = FindMatchesHandler::new(source, config.scoring.clone());

    let mut query = FindMatchesQuery::new(target.clone());
    query.weights = args.weights(config.scoring.weights);
    query.limit = args.limit;
    query.min_score = args.min_score;

    let report = handler.handle(query).await?;

    let envelope = ReportEnvelope {
        generated_at: Utc::now(),
        target: TargetSummary::from(&target),
        weights: report.weights,
        population_size: report.population_size,
        skipped: report.skipped,
        matches: report.matches,
    };
    let json = serde_json::to_string_pretty(&envelope)?;

    match &args.out {
        Some(path) => {
            tokio::fs::write(path, json).await?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => println!("{}", json),
    }

    Ok(())
}
