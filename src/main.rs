use std::{fs, path::PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use eyre::WrapErr;
use itertools::Itertools;
use serde_json::json;
use stock_news_filter::{model::Score, Config, RawNewsItem, RelevanceMatcher};
use tracing::info;

#[derive(Parser)]
#[command(name = "stock-news-filter", about = "Tag stock news and rank game scores")]
struct Cli {
    /// TOML config file; built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tag a JSON array of fetched headlines.
    Tag {
        #[arg(long)]
        input: PathBuf,
        /// Timestamp for undated items, RFC 3339. Defaults to now.
        #[arg(long)]
        fetched_at: Option<DateTime<Utc>>,
    },
    /// Tickers related to a piece of text.
    Match {
        #[arg(long)]
        text: String,
        #[arg(long)]
        max: Option<usize>,
    },
    /// Classify a single headline.
    Classify {
        #[arg(long)]
        title: String,
    },
    /// Rank a score against previous scores of the same game.
    Rank {
        #[arg(long, allow_negative_numbers = true)]
        score: Score,
        #[arg(long)]
        game: String,
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        history: Vec<Score>,
    },
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.logging.init()?;

    match cli.command {
        Command::Tag { input, fetched_at } => {
            let content = fs::read_to_string(&input)
                .wrap_err_with(|| format!("failed to read {}", input.display()))?;
            let batch: Vec<RawNewsItem> = serde_json::from_str(&content)
                .wrap_err_with(|| format!("invalid news batch {}", input.display()))?;

            let pipeline = config.build_pipeline(config.build_registry()?);
            let report = pipeline.run(batch, fetched_at.unwrap_or_else(Utc::now));

            println!("{}", serde_json::to_string_pretty(&report.tagged)?);
        }
        Command::Match { text, max } => {
            let matcher = RelevanceMatcher::new(config.build_registry()?);
            let max = max.unwrap_or(config.pipeline.max_related);

            for m in matcher.score(&text).into_iter().take(max) {
                info!("{} priority={} matches={}", m.ticker, m.priority, m.match_count);
            }

            println!("{}", matcher.find_related_stocks(&text, max).iter().join(","));
        }
        Command::Classify { title } => {
            let classifier = config.build_classifier();
            let result = json!({
                "is_stock_news": classifier.is_stock_news(&title),
                "sentiment": classifier.analyze_sentiment(&title),
                "keywords": classifier.extract_keywords(&title),
            });

            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Rank {
            score,
            game,
            history,
        } => {
            let result = config.build_ranker().rank(score, &game, &history);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
