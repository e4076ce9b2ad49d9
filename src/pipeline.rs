use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    classifier::NewsClassifier,
    error::TagError,
    matcher::RelevanceMatcher,
    model::{NewsItem, RawNewsItem, TaggedNews},
};

pub const DEFAULT_MAX_RELATED: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub max_related: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_related: DEFAULT_MAX_RELATED,
        }
    }
}

impl PipelineConfig {
    pub fn with_max_related(mut self, value: usize) -> Self {
        self.max_related = value;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestionReport {
    pub tagged: Vec<TaggedNews>,
    pub received: usize,
    pub failed: usize,
    pub duplicates: usize,
    pub filtered: usize,
}

/// Turns fetched headlines into tagged news records.
///
/// Stages: parse, de-duplicate by link, keep stock news, tag. A broken item
/// is logged and skipped; the rest of the batch still goes through.
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    classifier: NewsClassifier,
    matcher: RelevanceMatcher,
    config: PipelineConfig,
}

impl IngestionPipeline {
    pub fn new(
        classifier: NewsClassifier,
        matcher: RelevanceMatcher,
        config: PipelineConfig,
    ) -> Self {
        Self {
            classifier,
            matcher,
            config,
        }
    }

    pub fn classifier(&self) -> &NewsClassifier {
        &self.classifier
    }

    pub fn matcher(&self) -> &RelevanceMatcher {
        &self.matcher
    }

    /// `fetched_at` stands in for items the feed left undated, which keeps
    /// repeated runs over the same batch identical.
    pub fn run(&self, batch: Vec<RawNewsItem>, fetched_at: DateTime<Utc>) -> IngestionReport {
        let received = batch.len();
        let mut failed = 0;

        let items = batch
            .into_iter()
            .filter_map(|raw| match parse_item(raw, fetched_at) {
                Ok(item) => Some(item),
                Err(err) => {
                    warn!("skipping news item: {err}");
                    failed += 1;
                    None
                }
            })
            .collect_vec();

        let mut report = self.tag_batch(items);
        report.received = received;
        report.failed = failed;

        info!(
            "ingested {} items: {} tagged, {} failed, {} duplicates, {} filtered",
            report.received,
            report.tagged.len(),
            report.failed,
            report.duplicates,
            report.filtered
        );

        report
    }

    pub fn tag_batch(&self, items: Vec<NewsItem>) -> IngestionReport {
        let received = items.len();
        let (items, duplicates) = dedup_by_link(items);

        let mut filtered = 0;
        let mut tagged = Vec::with_capacity(items.len());

        for item in items {
            if !self.classifier.is_stock_news(&item.title) {
                debug!("not stock news: {}", item.title);
                filtered += 1;
                continue;
            }

            tagged.push(self.tag(item));
        }

        IngestionReport {
            tagged,
            received,
            failed: 0,
            duplicates,
            filtered,
        }
    }

    pub fn tag(&self, item: NewsItem) -> TaggedNews {
        let text = format!("{} {}", item.title, item.summary);
        let related_tickers = self
            .matcher
            .find_related_stocks(&text, self.config.max_related);

        debug!("{} -> {:?}", item.title, related_tickers);

        TaggedNews {
            is_stock_related: self.classifier.is_stock_news(&item.title),
            sentiment: self.classifier.analyze_sentiment(&item.title),
            keywords: self.classifier.extract_keywords(&item.title),
            related_tickers,
            news: item,
        }
    }
}

/// First occurrence of a link wins; later copies are dropped.
fn dedup_by_link(items: Vec<NewsItem>) -> (Vec<NewsItem>, usize) {
    let total = items.len();
    let unique = items
        .into_iter()
        .unique_by(|item| item.link.clone())
        .collect_vec();
    let duplicates = total - unique.len();

    (unique, duplicates)
}

pub fn parse_item(raw: RawNewsItem, fetched_at: DateTime<Utc>) -> Result<NewsItem, TagError> {
    let link = raw.link.trim().to_owned();
    if link.is_empty() {
        return Err(TagError::MissingLink { title: raw.title });
    }

    let published_at = match raw.published_at.as_deref().map(str::trim) {
        None | Some("") => fetched_at,
        Some(value) => parse_timestamp(value).ok_or_else(|| TagError::InvalidTimestamp {
            link: link.clone(),
            value: value.to_owned(),
        })?,
    };

    Ok(NewsItem {
        title: raw.title.trim().to_owned(),
        summary: raw.summary.trim().to_owned(),
        link,
        published_at,
    })
}

/// Accepts RFC 3339, RSS style RFC 2822, or a bare `%Y-%m-%d %H:%M:%S`
/// which is read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|n| Utc.from_utc_datetime(&n))
        })
}
