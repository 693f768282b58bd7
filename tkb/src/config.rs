// Runtime settings read from the environment (and `.env` when present).
use crate::catalog::CatalogSource;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_CSV_PATH: &str = "tin_chi.csv";
pub const DEFAULT_DB_PATH: &str = "data/tkb.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind: String,
    /// Spreadsheet JSON endpoint; tried before the CSV file when set.
    pub sheets_url: Option<String>,
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
    pub log_level: String,
}

impl Settings {
    /// Load `.env` if present, then read `TKB_*` and `RUST_LOG`.
    pub fn from_env() -> Settings {
        let _ = dotenv::dotenv();
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injected lookup, so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Settings
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Settings {
            bind: non_empty("TKB_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            sheets_url: non_empty("TKB_SHEETS_URL"),
            csv_path: PathBuf::from(non_empty("TKB_CSV_PATH").unwrap_or_else(|| DEFAULT_CSV_PATH.to_string())),
            db_path: PathBuf::from(non_empty("TKB_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string())),
            log_level: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Catalog sources in priority order.
    pub fn sources(&self) -> Vec<CatalogSource> {
        let mut out = Vec::new();
        if let Some(url) = &self.sheets_url {
            out.push(CatalogSource::Sheets { url: url.clone() });
        }
        out.push(CatalogSource::CsvFile { path: self.csv_path.clone() });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_unset() {
        let s = Settings::from_lookup(|_| None);
        assert_eq!(s.bind, DEFAULT_BIND);
        assert_eq!(s.sheets_url, None);
        assert_eq!(s.sources(), vec![CatalogSource::CsvFile { path: PathBuf::from(DEFAULT_CSV_PATH) }]);
        assert_eq!(s.log_level, "info");
    }

    #[test]
    fn sheets_url_goes_first() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("TKB_SHEETS_URL", "https://example.org/exec"),
            ("TKB_CSV_PATH", "/srv/tin_chi.csv"),
            ("TKB_BIND", "0.0.0.0:9000"),
        ]);
        let s = Settings::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(s.bind, "0.0.0.0:9000");
        let sources = s.sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0], CatalogSource::Sheets { url: "https://example.org/exec".into() });
        assert_eq!(sources[1], CatalogSource::CsvFile { path: PathBuf::from("/srv/tin_chi.csv") });
    }

    #[test]
    fn blank_values_count_as_unset() {
        let s = Settings::from_lookup(|k| (k == "TKB_SHEETS_URL").then(|| "   ".to_string()));
        assert_eq!(s.sheets_url, None);
    }
}
