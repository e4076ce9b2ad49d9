use std::collections::{BTreeSet, HashMap, HashSet};

use crate::{
    error::RegistryError,
    model::{StockEntry, StockMarket},
    utils::normalize,
};

/// Immutable ticker table shared by the matcher and the pipeline.
///
/// Declaration order is kept: the matcher relies on it to break ties that
/// priority and match count leave open.
#[derive(Debug, Clone)]
pub struct StockRegistry {
    entries: Vec<StockEntry>,
    normalized_keywords: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl StockRegistry {
    pub fn new(entries: Vec<StockEntry>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();

        for entry in &entries {
            if entry.ticker.trim().is_empty() {
                return Err(RegistryError::EmptyTicker);
            }
            if entry.priority == 0 {
                return Err(RegistryError::InvalidPriority {
                    ticker: entry.ticker.clone(),
                    priority: entry.priority,
                });
            }
            if !seen.insert(entry.ticker.as_str()) {
                return Err(RegistryError::DuplicateTicker(entry.ticker.clone()));
            }
        }

        Ok(Self::build(entries))
    }

    pub fn builtin() -> Self {
        Self::build(builtin_entries())
    }

    fn build(entries: Vec<StockEntry>) -> Self {
        let normalized_keywords = entries
            .iter()
            .map(|e| e.keywords.iter().map(|k| normalize(k)).collect())
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(ix, e)| (e.ticker.clone(), ix))
            .collect();

        Self {
            entries,
            normalized_keywords,
            index,
        }
    }

    pub fn lookup(&self, ticker: &str) -> Option<&StockEntry> {
        self.index.get(ticker).map(|&ix| &self.entries[ix])
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.index.contains_key(ticker)
    }

    pub fn all_tickers(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.ticker.as_str()).collect()
    }

    /// Keywords in declaration order; empty for an unknown ticker.
    pub fn keywords_for(&self, ticker: &str) -> &[String] {
        self.lookup(ticker)
            .map(|e| e.keywords.as_slice())
            .unwrap_or(&[])
    }

    pub fn entries(&self) -> impl Iterator<Item = &StockEntry> {
        self.entries.iter()
    }

    pub(crate) fn entries_with_normalized(&self) -> impl Iterator<Item = (&StockEntry, &[String])> {
        self.entries
            .iter()
            .zip(self.normalized_keywords.iter().map(Vec::as_slice))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StockRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[rustfmt::skip]
pub fn builtin_entries() -> Vec<StockEntry> {
    use StockMarket::*;

    vec![
        StockEntry::new("005930.KS", Kospi, "삼성전자", &["삼성전자", "삼성", "Samsung Electronics", "Samsung"], 1),
        StockEntry::new("000660.KS", Kospi, "SK하이닉스", &["SK하이닉스", "하이닉스", "SK hynix", "hynix"], 1),
        StockEntry::new("373220.KS", Kospi, "LG에너지솔루션", &["LG에너지솔루션", "LG엔솔", "LG Energy Solution"], 2),
        StockEntry::new("005380.KS", Kospi, "현대차", &["현대차", "현대자동차", "Hyundai Motor"], 2),
        StockEntry::new("035420.KS", Kospi, "NAVER", &["네이버", "NAVER"], 2),
        StockEntry::new("035720.KS", Kospi, "카카오", &["카카오", "Kakao"], 2),
        StockEntry::new("207940.KS", Kospi, "삼성바이오로직스", &["삼성바이오로직스", "삼성바이오", "Samsung Biologics"], 3),
        StockEntry::new("000270.KS", Kospi, "기아", &["기아", "Kia"], 3),
        StockEntry::new("068270.KS", Kospi, "셀트리온", &["셀트리온", "Celltrion"], 3),
        StockEntry::new("051910.KS", Kospi, "LG화학", &["LG화학", "LG Chem"], 3),
        StockEntry::new("005490.KS", Kospi, "POSCO홀딩스", &["POSCO홀딩스", "포스코홀딩스", "포스코", "POSCO"], 3),
        StockEntry::new("006400.KS", Kospi, "삼성SDI", &["삼성SDI", "Samsung SDI"], 4),
        StockEntry::new("066570.KS", Kospi, "LG전자", &["LG전자", "LG Electronics"], 4),
        StockEntry::new("105560.KS", Kospi, "KB금융", &["KB금융", "KB국민은행", "KB Financial"], 5),
        StockEntry::new("055550.KS", Kospi, "신한지주", &["신한지주", "신한금융", "신한은행"], 5),
        StockEntry::new("012330.KS", Kospi, "현대모비스", &["현대모비스", "Hyundai Mobis"], 6),
        StockEntry::new("012450.KS", Kospi, "한화에어로스페이스", &["한화에어로스페이스", "한화에어로"], 6),
        StockEntry::new("017670.KS", Kospi, "SK텔레콤", &["SK텔레콤", "SKT"], 7),
        StockEntry::new("034020.KS", Kospi, "두산에너빌리티", &["두산에너빌리티", "Doosan Enerbility"], 7),
        StockEntry::new("028260.KS", Kospi, "삼성물산", &["삼성물산", "Samsung C&T"], 8),
        StockEntry::new("003550.KS", Kospi, "LG", &["LG그룹", "(주)LG", "LG Corp"], 9),
        StockEntry::new("032830.KS", Kospi, "삼성생명", &["삼성생명", "Samsung Life"], 10),
        StockEntry::new("247540.KQ", Kosdaq, "에코프로비엠", &["에코프로비엠", "EcoPro BM"], 5),
        StockEntry::new("086520.KQ", Kosdaq, "에코프로", &["에코프로", "EcoPro"], 5),
        StockEntry::new("196170.KQ", Kosdaq, "알테오젠", &["알테오젠", "Alteogen"], 6),
        StockEntry::new("263750.KQ", Kosdaq, "펄어비스", &["펄어비스", "Pearl Abyss"], 8),
        StockEntry::new("AAPL", Nasdaq, "Apple", &["애플", "Apple", "아이폰", "iPhone"], 2),
        StockEntry::new("NVDA", Nasdaq, "NVIDIA", &["엔비디아", "NVIDIA", "젠슨 황"], 2),
        StockEntry::new("TSLA", Nasdaq, "Tesla", &["테슬라", "Tesla", "일론 머스크"], 2),
        StockEntry::new("MSFT", Nasdaq, "Microsoft", &["마이크로소프트", "Microsoft"], 3),
        StockEntry::new("GOOGL", Nasdaq, "Alphabet", &["구글", "알파벳", "Google", "Alphabet"], 3),
        StockEntry::new("AMZN", Nasdaq, "Amazon", &["아마존", "Amazon"], 3),
        StockEntry::new("META", Nasdaq, "Meta Platforms", &["메타플랫폼스", "Meta Platforms", "페이스북", "Facebook"], 4),
        StockEntry::new("TSM", Nyse, "TSMC", &["TSMC", "대만 반도체"], 4),
        StockEntry::new("JPM", Nyse, "JPMorgan Chase", &["JP모건", "JPMorgan"], 5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unittest_builtin_registry_is_valid() {
        let registry = StockRegistry::new(builtin_entries()).unwrap();
        assert_eq!(registry.len(), builtin_entries().len());
    }

    #[test]
    fn unittest_lookup() {
        let registry = StockRegistry::builtin();

        let entry = registry.lookup("005930.KS").unwrap();
        assert_eq!(entry.name, "삼성전자");
        assert_eq!(entry.priority, 1);
        assert_eq!(registry.lookup("032830.KS").unwrap().priority, 10);

        assert!(registry.lookup("999999.KS").is_none());
        assert!(registry.keywords_for("999999.KS").is_empty());
        assert_eq!(registry.keywords_for("035420.KS"), &["네이버", "NAVER"]);
    }

    #[test]
    fn unittest_all_tickers() {
        let registry = StockRegistry::builtin();
        let tickers = registry.all_tickers();

        assert!(tickers.contains("AAPL"));
        assert!(tickers.contains("247540.KQ"));
        assert_eq!(tickers.len(), registry.len());
    }

    #[test]
    fn unittest_invalid_entries() {
        let dup = vec![
            StockEntry::new("AAPL", StockMarket::Nasdaq, "Apple", &["apple"], 1),
            StockEntry::new("AAPL", StockMarket::Nasdaq, "Apple", &["애플"], 2),
        ];
        assert_eq!(
            StockRegistry::new(dup).unwrap_err(),
            RegistryError::DuplicateTicker("AAPL".to_owned())
        );

        let zero = vec![StockEntry::new("AAPL", StockMarket::Nasdaq, "Apple", &["apple"], 0)];
        assert!(matches!(
            StockRegistry::new(zero),
            Err(RegistryError::InvalidPriority { priority: 0, .. })
        ));

        let empty = vec![StockEntry::new(" ", StockMarket::Nasdaq, "Apple", &["apple"], 1)];
        assert_eq!(StockRegistry::new(empty).unwrap_err(), RegistryError::EmptyTicker);
    }

    #[test]
    fn unittest_keywords_are_normalized_once() {
        let registry = StockRegistry::builtin();
        let (entry, normalized) = registry
            .entries_with_normalized()
            .find(|(e, _)| e.ticker == "000660.KS")
            .unwrap();

        assert_eq!(entry.keywords[0], "SK하이닉스");
        assert_eq!(normalized[0], "sk하이닉스");
    }
}
