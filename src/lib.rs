//! Rule based tagging for a community stock/news portal.
//!
//! Headlines are classified with exclude/signal word lists, matched to
//! tickers by keyword containment and labelled with a coarse sentiment.
//! Game scores are ranked against their history for the leaderboards.

pub mod classifier;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod matcher;
pub mod model;
pub mod pipeline;
pub mod ranking;
pub mod registry;
pub mod utils;

pub use classifier::{NewsClassifier, Vocabulary};
pub use config::Config;
pub use error::{RegistryError, TagError};
pub use matcher::RelevanceMatcher;
pub use model::{
    NewsItem, RankResult, RawNewsItem, ScoreOrder, ScoreRecord, Sentiment, StockEntry,
    StockMarket, TaggedNews,
};
pub use pipeline::{IngestionPipeline, IngestionReport, PipelineConfig};
pub use ranking::{rank_score, Ranker};
pub use registry::StockRegistry;
