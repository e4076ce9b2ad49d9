use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use eyre::{eyre, WrapErr};
use itertools::Itertools;
use tracing::{debug, info};

use crate::{
    model::{StockEntry, StockMarket},
    registry::{builtin_entries, StockRegistry},
};

pub trait StockEntryLoader {
    fn load(&self) -> eyre::Result<Vec<StockEntry>>;

    fn load_registry(&self) -> eyre::Result<StockRegistry> {
        let registry = StockRegistry::new(self.load()?)?;
        info!("stock registry loaded with {} tickers", registry.len());
        Ok(registry)
    }
}

pub struct BuiltinLoader {}

impl StockEntryLoader for BuiltinLoader {
    fn load(&self) -> eyre::Result<Vec<StockEntry>> {
        Ok(builtin_entries())
    }
}

/// Reads `market,ticker,name,priority,keyword|keyword|...` lines. The first
/// line is a header and is skipped.
pub struct CsvLoader {
    pub path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StockEntryLoader for CsvLoader {
    fn load(&self) -> eyre::Result<Vec<StockEntry>> {
        load_entries(&self.path)
            .wrap_err_with(|| format!("failed to load stock entries from {}", self.path.display()))
    }
}

fn load_entries(path: impl AsRef<Path>) -> eyre::Result<Vec<StockEntry>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut entries = vec![];

    for (ix, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        entries.push(parse_line(&line).wrap_err_with(|| format!("line {}", ix + 1))?);
    }

    debug!("parsed {} stock entries", entries.len());

    Ok(entries)
}

fn parse_line(line: &str) -> eyre::Result<StockEntry> {
    let splits = line.split(',').map(str::trim).collect_vec();

    if splits.len() != 5 {
        return Err(eyre!("expected 5 columns, found {}", splits.len()));
    }

    let market =
        StockMarket::parse(splits[0]).ok_or_else(|| eyre!("unknown market '{}'", splits[0]))?;
    let keywords = splits[4]
        .split('|')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_owned)
        .collect_vec();

    Ok(StockEntry {
        ticker: splits[1].to_owned(),
        market,
        name: splits[2].to_owned(),
        keywords,
        priority: splits[3].parse()?,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::{BuiltinLoader, CsvLoader, StockEntryLoader};
    use crate::model::StockMarket;

    #[test]
    fn unittest_builtin_loader() -> eyre::Result<()> {
        let registry = BuiltinLoader {}.load_registry()?;
        assert!(registry.contains("005930.KS"));
        Ok(())
    }

    #[test]
    fn unittest_csv_loader() -> eyre::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "market,ticker,name,priority,keywords")?;
        writeln!(file, "KOSPI,005930.KS,삼성전자,1,삼성전자|Samsung")?;
        writeln!(file)?;
        writeln!(file, "KOSDAQ, 247540.KQ ,에코프로비엠,5,에코프로비엠| |EcoPro BM")?;

        let registry = CsvLoader::new(file.path()).load_registry()?;
        assert_eq!(registry.len(), 2);

        let entry = registry.lookup("247540.KQ").unwrap();
        assert_eq!(entry.market, StockMarket::Kosdaq);
        assert_eq!(entry.keywords, vec!["에코프로비엠", "EcoPro BM"]);
        assert_eq!(entry.priority, 5);

        Ok(())
    }

    #[test]
    fn unittest_csv_loader_rejects_malformed_line() -> eyre::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "market,ticker,name,priority,keywords")?;
        writeln!(file, "KOSPI,005930.KS,삼성전자,first,삼성전자")?;

        let err = CsvLoader::new(file.path()).load().unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));

        Ok(())
    }

    #[test]
    fn unittest_csv_loader_rejects_duplicates() -> eyre::Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "market,ticker,name,priority,keywords")?;
        writeln!(file, "NASDAQ,AAPL,Apple,1,apple")?;
        writeln!(file, "NASDAQ,AAPL,Apple,2,애플")?;

        assert!(CsvLoader::new(file.path()).load_registry().is_err());

        Ok(())
    }
}
