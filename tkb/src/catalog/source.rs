// Catalog sources, tried in priority order until one yields data.
use super::{csv, sheets, Catalog};
use crate::error::CatalogError;
use crate::models::CourseSection;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Spreadsheet web endpoint returning the JSON envelope.
    Sheets { url: String },
    /// Exported CSV file with a header row.
    CsvFile { path: PathBuf },
}

impl CatalogSource {
    pub fn name(&self) -> String {
        match self {
            CatalogSource::Sheets { url } => format!("sheets:{}", url),
            CatalogSource::CsvFile { path } => format!("csv:{}", path.display()),
        }
    }

    /// Fetch and normalize. Zero usable rows counts as a failure of the source.
    pub async fn fetch(&self) -> Result<Vec<CourseSection>, CatalogError> {
        let sections = match self {
            CatalogSource::Sheets { url } => {
                let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
                let resp = client.get(url).send().await?;
                if !resp.status().is_success() {
                    return Err(CatalogError::Status(resp.status().as_u16()));
                }
                let body = resp.text().await?;
                sheets::parse_sheets_response(&body)?
            }
            CatalogSource::CsvFile { path } => {
                let text = tokio::fs::read_to_string(path).await?;
                csv::parse_csv(&text)
            }
        };
        if sections.is_empty() {
            return Err(CatalogError::Empty { source_name: self.name() });
        }
        Ok(sections)
    }
}

/// Load the catalog from the first source that succeeds. Each failure is
/// logged and kept; if none succeeds the causes come back in `Exhausted`.
pub async fn load_catalog(sources: &[CatalogSource]) -> Result<Catalog, CatalogError> {
    let mut attempts: Vec<(String, CatalogError)> = Vec::new();
    for source in sources {
        let name = source.name();
        info!(source = %name, "loading course catalog");
        match source.fetch().await {
            Ok(sections) => {
                info!(source = %name, count = sections.len(), "catalog loaded");
                return Ok(Catalog::new(sections, name));
            }
            Err(e) => {
                warn!(source = %name, error = %e, "catalog source failed, trying next");
                attempts.push((name, e));
            }
        }
    }
    Err(CatalogError::Exhausted { attempts })
}
