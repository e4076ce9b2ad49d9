use itertools::Itertools;

use crate::{
    model::Sentiment,
    utils::{contains_any, is_blank, normalize},
};

const SIGNAL_WORDS: &[&str] = &[
    "특징주", "상한가", "하한가", "급등", "급락", "신고가", "신저가", "실적", "영업이익", "순이익",
    "어닝", "목표가", "목표주가", "공모", "청약", "IPO", "상장", "배당", "자사주", "유상증자",
    "무상증자", "액면분할", "인수", "합병", "수주", "주가", "시가총액", "코스피", "코스닥",
    "나스닥", "순매수", "순매도", "surge", "earnings", "target price", "dividend", "listing",
];

const EXCLUDE_WORDS: &[&str] = &[
    "부고", "별세", "부음", "인사", "동정", "날씨", "기상", "운세", "별자리", "채용", "모집",
    "공채", "결혼", "화촉", "포토", "게시판", "obituary", "horoscope",
];

const POSITIVE_WORDS: &[&str] = &[
    "급등", "상승", "강세", "신고가", "상한가", "최고", "돌파", "반등", "호재", "흑자", "개선",
    "수혜", "호실적", "surge", "rally", "record high",
];

const NEGATIVE_WORDS: &[&str] = &[
    "급락", "하락", "약세", "신저가", "하한가", "최저", "폭락", "악재", "적자", "손실", "부진",
    "우려", "쇼크", "plunge", "crash",
];

/// Word lists driving the classifier. Order of `signal` is the order in
/// which [`NewsClassifier::extract_keywords`] reports hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub signal: Vec<String>,
    pub exclude: Vec<String>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        let owned =
            |words: &[&str]| -> Vec<String> { words.iter().map(|w| w.to_string()).collect() };

        Self {
            signal: owned(SIGNAL_WORDS),
            exclude: owned(EXCLUDE_WORDS),
            positive: owned(POSITIVE_WORDS),
            negative: owned(NEGATIVE_WORDS),
        }
    }
}

impl Vocabulary {
    pub fn with_extra_signal_words(mut self, words: &[String]) -> Self {
        extend_unique(&mut self.signal, words);
        self
    }

    pub fn with_extra_exclude_words(mut self, words: &[String]) -> Self {
        extend_unique(&mut self.exclude, words);
        self
    }
}

/// Words that only differ by case count as the same word.
fn extend_unique(target: &mut Vec<String>, words: &[String]) {
    for word in words {
        let normalized = normalize(word);
        if word.trim().is_empty() || target.iter().any(|t| normalize(t) == normalized) {
            continue;
        }
        target.push(word.clone());
    }
}

/// Word list kept in declaration order next to its lower-cased form.
/// Case variants collapse onto the first spelling.
#[derive(Debug, Clone)]
struct NormalizedWords {
    original: Vec<String>,
    normalized: Vec<String>,
}

impl NormalizedWords {
    fn new(words: Vec<String>) -> Self {
        let (original, normalized) = words
            .into_iter()
            .map(|w| {
                let normalized = normalize(&w);
                (w, normalized)
            })
            .filter(|(_, normalized)| !normalized.trim().is_empty())
            .unique_by(|(_, normalized)| normalized.clone())
            .unzip();

        Self {
            original,
            normalized,
        }
    }

    fn any_in(&self, text: &str) -> bool {
        contains_any(text, &self.normalized)
    }

    fn hits_in(&self, text: &str) -> Vec<String> {
        self.normalized
            .iter()
            .zip(&self.original)
            .filter(|(normalized, _)| text.contains(normalized.as_str()))
            .map(|(_, original)| original.clone())
            .collect()
    }
}

/// Rule based headline classifier. Every check is plain substring
/// containment over the lower-cased title.
#[derive(Debug, Clone)]
pub struct NewsClassifier {
    signal: NormalizedWords,
    exclude: NormalizedWords,
    positive: NormalizedWords,
    negative: NormalizedWords,
}

impl Default for NewsClassifier {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}

impl NewsClassifier {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            signal: NormalizedWords::new(vocabulary.signal),
            exclude: NormalizedWords::new(vocabulary.exclude),
            positive: NormalizedWords::new(vocabulary.positive),
            negative: NormalizedWords::new(vocabulary.negative),
        }
    }

    /// Exclusion always wins over signal words.
    pub fn is_stock_news(&self, title: &str) -> bool {
        if is_blank(title) {
            return false;
        }

        let title = normalize(title);

        if self.exclude.any_in(&title) {
            return false;
        }

        self.signal.any_in(&title)
    }

    pub fn analyze_sentiment(&self, title: &str) -> Sentiment {
        if is_blank(title) {
            return Sentiment::Neutral;
        }

        let title = normalize(title);

        match (self.positive.any_in(&title), self.negative.any_in(&title)) {
            (true, false) => Sentiment::Positive,
            (false, true) => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn extract_keywords(&self, title: &str) -> Vec<String> {
        if is_blank(title) {
            return Vec::new();
        }

        self.signal.hits_in(&normalize(title))
    }
}
