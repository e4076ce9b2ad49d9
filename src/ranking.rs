use std::{cmp::Ordering, collections::HashSet};

use itertools::Itertools;

use crate::model::{LeaderboardEntry, RankResult, Score, ScoreOrder, ScoreRecord};

/// Rank and percentile of `new_score` where a higher score is better.
///
/// The percentile denominator is the historical set only; the submitted
/// score is not counted. An empty history ranks first at 100.
pub fn rank_score(new_score: Score, historical: &[Score]) -> RankResult {
    rank_with_order(new_score, historical, ScoreOrder::HigherIsBetter)
}

pub fn rank_with_order(new_score: Score, historical: &[Score], order: ScoreOrder) -> RankResult {
    if historical.is_empty() {
        return RankResult {
            rank: 1,
            percentile: 100.0,
        };
    }

    let better = historical
        .iter()
        .filter(|&&s| compare(order, s, new_score) == Ordering::Less)
        .count();
    let at_or_below = historical.len() - better;

    RankResult {
        rank: 1 + better,
        percentile: at_or_below as f64 / historical.len() as f64 * 100.0,
    }
}

/// `Less` means `l` ranks ahead of `r`.
fn compare(order: ScoreOrder, l: Score, r: Score) -> Ordering {
    match order {
        ScoreOrder::HigherIsBetter => r.cmp(&l),
        ScoreOrder::LowerIsBetter => l.cmp(&r),
    }
}

/// Ranks scores per game type. Game types listed as lower-is-better (time
/// based puzzles) invert the comparison; everything else ranks high first.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    lower_is_better: HashSet<String>,
}

impl Ranker {
    pub fn new<I, S>(lower_is_better: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lower_is_better: lower_is_better
                .into_iter()
                .map(|g| g.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    pub fn order_for(&self, game_type: &str) -> ScoreOrder {
        if self.lower_is_better.contains(&game_type.trim().to_lowercase()) {
            ScoreOrder::LowerIsBetter
        } else {
            ScoreOrder::HigherIsBetter
        }
    }

    pub fn rank(&self, new_score: Score, game_type: &str, historical: &[Score]) -> RankResult {
        rank_with_order(new_score, historical, self.order_for(game_type))
    }

    /// Best score per user for `game_type`, best first. Equal scores are
    /// ordered by who got there first and share the same rank.
    pub fn leaderboard(
        &self,
        records: &[ScoreRecord],
        game_type: &str,
        limit: usize,
    ) -> Vec<LeaderboardEntry> {
        let order = self.order_for(game_type);
        let game_type = game_type.trim().to_lowercase();

        let best = records
            .iter()
            .filter(|r| r.game_type.trim().to_lowercase() == game_type)
            .sorted_by(|l, r| {
                compare(order, l.score, r.score)
                    .then_with(|| l.played_at.cmp(&r.played_at))
                    .then_with(|| l.user_id.cmp(&r.user_id))
            })
            .unique_by(|r| r.user_id.clone())
            .collect_vec();

        let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(best.len().min(limit));
        for (ix, record) in best.into_iter().take(limit).enumerate() {
            let rank = match entries.last() {
                Some(prev) if prev.score == record.score => prev.rank,
                _ => ix + 1,
            };

            entries.push(LeaderboardEntry {
                rank,
                user_id: record.user_id.clone(),
                score: record.score,
                played_at: record.played_at,
            });
        }

        entries
    }
}
