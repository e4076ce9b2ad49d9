use std::sync::Arc;

use itertools::Itertools;

use crate::{
    model::Ticker,
    registry::StockRegistry,
    utils::{count_contained, is_blank, normalize},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockMatch {
    pub ticker: Ticker,
    pub priority: u32,
    pub match_count: usize,
}

/// Maps free text to tickers by keyword substring containment.
///
/// A keyword that happens to sit inside an unrelated word still counts,
/// e.g. "기아" inside "기아자동차" or "삼성" inside "삼성생명".
#[derive(Debug, Clone)]
pub struct RelevanceMatcher {
    registry: Arc<StockRegistry>,
}

impl RelevanceMatcher {
    pub fn new(registry: Arc<StockRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &StockRegistry {
        &self.registry
    }

    /// Every entry with at least one keyword hit, ordered by priority then
    /// match count. Equal keys keep registry order.
    pub fn score(&self, text: &str) -> Vec<StockMatch> {
        if is_blank(text) {
            return Vec::new();
        }

        let text = normalize(text);

        self.registry
            .entries_with_normalized()
            .filter_map(|(entry, keywords)| {
                let match_count = count_contained(&text, keywords);
                (match_count > 0).then(|| StockMatch {
                    ticker: entry.ticker.clone(),
                    priority: entry.priority,
                    match_count,
                })
            })
            .sorted_by(|l, r| {
                l.priority
                    .cmp(&r.priority)
                    .then_with(|| r.match_count.cmp(&l.match_count))
            })
            .collect()
    }

    pub fn find_related_stocks(&self, text: &str, max_results: usize) -> Vec<Ticker> {
        self.score(text)
            .into_iter()
            .take(max_results)
            .map(|m| m.ticker)
            .collect()
    }
}
