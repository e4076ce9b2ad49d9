use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum StockMarket {
    #[default]
    #[display(fmt = "KOSPI")]
    Kospi,
    #[display(fmt = "KOSDAQ")]
    Kosdaq,
    #[display(fmt = "NASDAQ")]
    Nasdaq,
    #[display(fmt = "NYSE")]
    Nyse,
}

impl StockMarket {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "KOSPI" => Some(Self::Kospi),
            "KOSDAQ" => Some(Self::Kosdaq),
            "NASDAQ" => Some(Self::Nasdaq),
            "NYSE" => Some(Self::Nyse),
            _ => None,
        }
    }
}

pub type Ticker = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub ticker: Ticker,
    pub market: StockMarket,
    pub name: String,
    /// Case-insensitive aliases, matched by substring containment.
    pub keywords: Vec<String>,
    /// Lower value wins when several entries match the same text.
    pub priority: u32,
}

impl StockEntry {
    pub fn new(
        ticker: impl Into<Ticker>,
        market: StockMarket,
        name: impl Into<String>,
        keywords: &[&str],
        priority: u32,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            market,
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            priority,
        }
    }
}

/// Headline as handed over by the fetch layer, before any validation.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct RawNewsItem {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    #[display(fmt = "POSITIVE")]
    Positive,
    #[display(fmt = "NEGATIVE")]
    Negative,
    #[default]
    #[display(fmt = "NEUTRAL")]
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedNews {
    #[serde(flatten)]
    pub news: NewsItem,
    pub is_stock_related: bool,
    pub sentiment: Sentiment,
    pub related_tickers: Vec<Ticker>,
    pub keywords: Vec<String>,
}

impl TaggedNews {
    /// Storage form of `related_tickers`, a JSON array keeping ticker order.
    pub fn related_tickers_json(&self) -> eyre::Result<String> {
        Ok(serde_json::to_string(&self.related_tickers)?)
    }

    pub fn related_tickers_csv(&self) -> String {
        self.related_tickers.join(",")
    }
}

pub fn decode_related_tickers(encoded: &str) -> eyre::Result<Vec<Ticker>> {
    if encoded.trim().is_empty() {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_str(encoded)?)
}

pub type Score = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub user_id: String,
    pub game_type: String,
    pub score: Score,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResult {
    pub rank: usize,
    pub percentile: f64,
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreOrder {
    #[default]
    HigherIsBetter,
    /// Time based games (sudoku, minesweeper) where a smaller score wins.
    LowerIsBetter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: String,
    pub score: Score,
    pub played_at: DateTime<Utc>,
}
