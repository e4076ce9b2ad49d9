use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use eyre::WrapErr;
use serde::Deserialize;

use crate::{
    classifier::{NewsClassifier, Vocabulary},
    loader::{BuiltinLoader, CsvLoader, StockEntryLoader},
    logging::LoggingConfig,
    matcher::RelevanceMatcher,
    pipeline::{IngestionPipeline, PipelineConfig},
    ranking::Ranker,
    registry::StockRegistry,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// CSV file replacing the builtin ticker table.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub extra_signal_words: Vec<String>,
    pub extra_exclude_words: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Opt-in list of game types where the smaller score wins. Empty by
    /// default, so every game ranks higher scores first.
    pub lower_is_better: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub registry: RegistryConfig,
    pub classifier: ClassifierConfig,
    pub pipeline: PipelineConfig,
    pub ranking: RankingConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;

        Self::parse(&content).wrap_err_with(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> eyre::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_registry_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.registry.path = Some(path.into());
        self
    }

    pub fn with_max_related(mut self, value: usize) -> Self {
        self.pipeline.max_related = value;
        self
    }

    pub fn build_registry(&self) -> eyre::Result<Arc<StockRegistry>> {
        let registry = match &self.registry.path {
            Some(path) => CsvLoader::new(path).load_registry()?,
            None => BuiltinLoader {}.load_registry()?,
        };

        Ok(Arc::new(registry))
    }

    pub fn build_classifier(&self) -> NewsClassifier {
        let vocabulary = Vocabulary::default()
            .with_extra_signal_words(&self.classifier.extra_signal_words)
            .with_extra_exclude_words(&self.classifier.extra_exclude_words);

        NewsClassifier::new(vocabulary)
    }

    pub fn build_pipeline(&self, registry: Arc<StockRegistry>) -> IngestionPipeline {
        IngestionPipeline::new(
            self.build_classifier(),
            RelevanceMatcher::new(registry),
            self.pipeline,
        )
    }

    pub fn build_ranker(&self) -> Ranker {
        Ranker::new(&self.ranking.lower_is_better)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::Config;
    use crate::{model::ScoreOrder, ranking::rank_score};

    #[test]
    fn unittest_defaults() -> eyre::Result<()> {
        let config = Config::parse("")?;

        assert_eq!(config, Config::default());
        assert_eq!(config.pipeline.max_related, 5);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.build_ranker().order_for("sudoku"), ScoreOrder::HigherIsBetter);

        Ok(())
    }

    #[test]
    fn 기본_설정은_높은_점수가_1등() {
        let ranker = Config::default().build_ranker();
        let history = [50, 60, 90];

        for game in ["sudoku", "minesweeper", "tetris", "2048"] {
            assert_eq!(ranker.rank(80, game, &history), rank_score(80, &history));
        }
        assert_eq!(ranker.rank(80, "sudoku", &history).rank, 2);
    }

    #[test]
    fn unittest_lower_is_better_is_opt_in() -> eyre::Result<()> {
        let config = Config::parse("[ranking]\nlower_is_better = [\"sudoku\"]")?;
        let ranker = config.build_ranker();

        assert_eq!(ranker.order_for("sudoku"), ScoreOrder::LowerIsBetter);
        assert_eq!(ranker.order_for("minesweeper"), ScoreOrder::HigherIsBetter);
        assert_eq!(ranker.rank(80, "sudoku", &[50, 60, 90]).rank, 3);

        Ok(())
    }

    #[test]
    fn unittest_extra_signal_word_case_variant() -> eyre::Result<()> {
        let config = Config::parse("[classifier]\nextra_signal_words = [\"ipo\"]")?;
        let classifier = config.build_classifier();

        assert_eq!(classifier.extract_keywords("IPO 흥행"), vec!["IPO"]);

        Ok(())
    }

    #[test]
    fn unittest_logging_init_twice() {
        let logging = Config::default().logging;

        let _ = logging.init();
        assert!(logging.init().is_err());
    }

    #[test]
    fn unittest_load_config() -> eyre::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            r#"
[logging]
format = "json"

[classifier]
extra_signal_words = ["스팩"]
extra_exclude_words = ["광고"]

[pipeline]
max_related = 2

[ranking]
lower_is_better = ["Minesweeper"]
"#
        )?;

        let config = Config::load(file.path())?;
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.pipeline.max_related, 2);
        assert_eq!(config.build_ranker().order_for("minesweeper"), ScoreOrder::LowerIsBetter);
        assert_eq!(config.build_ranker().order_for("sudoku"), ScoreOrder::HigherIsBetter);

        let classifier = config.build_classifier();
        assert!(classifier.is_stock_news("스팩 신규 등장"));
        assert!(!classifier.is_stock_news("[광고] 특징주"));

        let pipeline = config.build_pipeline(config.build_registry()?);
        let tagged = pipeline.tag_batch(vec![]);
        assert!(tagged.tagged.is_empty());

        Ok(())
    }

    #[test]
    fn unittest_registry_from_csv() -> eyre::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "market,ticker,name,priority,keywords")?;
        writeln!(file, "NASDAQ,AAPL,Apple,1,애플|Apple")?;

        let config = Config::default().with_registry_path(file.path());
        let registry = config.build_registry()?;

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("AAPL"));

        Ok(())
    }

    #[test]
    fn unittest_invalid_config() {
        assert!(Config::parse("[pipeline]\nmax_related = \"five\"").is_err());
        assert!(Config::load("/nonexistent/config.toml").is_err());
    }
}
