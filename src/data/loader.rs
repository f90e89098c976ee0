//! Rules Sheet Loader Module
//! Fetches the published sheet, parses it with Polars and memoizes the result per URL.

use crate::data::dataset::{Dataset, RuleRow, CATEGORY_COLUMN};
use crate::data::fetcher::{FetchError, Fetcher};
use polars::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, error, info};

const FETCH_FAILURE_MESSAGE: &str =
    "Could not load rules. Please check the Google Sheet link and ensure it's published correctly.";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to fetch sheet: {0}")]
    Fetch(#[from] FetchError),
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("The sheet must have a '{0}' column")]
    MissingColumn(String),
    #[error("Load was interrupted before completing")]
    Interrupted,
}

/// The two ways a load can fail, as far as the user is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailureKind {
    /// The sheet was retrieved but a required column is missing.
    Schema,
    /// Network, HTTP status or CSV parse failure.
    Fetch,
}

impl LoaderError {
    pub fn kind(&self) -> LoadFailureKind {
        match self {
            Self::MissingColumn(_) => LoadFailureKind::Schema,
            Self::Fetch(_) | Self::Csv(_) | Self::Interrupted => LoadFailureKind::Fetch,
        }
    }

    /// Message shown in the UI.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingColumn(column) => format!("The sheet must have a '{column}' column."),
            Self::Fetch(_) | Self::Csv(_) | Self::Interrupted => FETCH_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Parse CSV bytes into a normalized [`Dataset`].
///
/// Every column is read as text. Fails with [`LoaderError::MissingColumn`]
/// when there is no `Category` header; no partial data is returned.
pub fn parse_csv(bytes: &[u8]) -> Result<Dataset, LoaderError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;

    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    if !columns.iter().any(|c| c == CATEGORY_COLUMN) {
        return Err(LoaderError::MissingColumn(CATEGORY_COLUMN.to_string()));
    }

    let cells = columns
        .iter()
        .map(|name| -> PolarsResult<(&str, &StringChunked)> {
            Ok((name.as_str(), df.column(name)?.as_materialized_series().str()?))
        })
        .collect::<PolarsResult<Vec<_>>>()?;

    let rows = (0..df.height())
        .map(|i| {
            let mut category = "";
            let mut fields = Vec::with_capacity(cells.len());
            for (name, values) in &cells {
                let Some(value) = values.get(i) else {
                    continue;
                };
                if *name == CATEGORY_COLUMN {
                    category = value;
                } else {
                    fields.push((*name, value));
                }
            }
            RuleRow::new(category, fields)
        })
        .collect();

    Ok(Dataset::new(columns, rows))
}

/// Loads rule sheets and keeps each successful result for the rest of the session.
///
/// The cache lock is held across the fetch, so a URL is fetched at most once
/// no matter how many callers race for it. Failures are not cached.
pub struct DataLoader<F> {
    fetcher: F,
    cache: Mutex<HashMap<String, Arc<Dataset>>>,
}

impl<F: Fetcher> DataLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Load the sheet at `url`, returning the cached dataset if one exists.
    pub fn load(&self, url: &str) -> Result<Arc<Dataset>, LoaderError> {
        let mut cache = self.lock_cache();
        if let Some(dataset) = cache.get(url) {
            debug!(url, rows = dataset.len(), "Using cached rules");
            return Ok(Arc::clone(dataset));
        }

        let dataset = match self.fetch_and_parse(url) {
            Ok(dataset) => Arc::new(dataset),
            Err(e) => {
                error!(url, error = %e, "Failed to load rules");
                return Err(e);
            }
        };

        info!(
            url,
            rows = dataset.len(),
            columns = dataset.columns().len(),
            "Rules loaded"
        );
        cache.insert(url.to_string(), Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the cached dataset for `url`. Returns whether one was cached.
    pub fn invalidate(&self, url: &str) -> bool {
        self.lock_cache().remove(url).is_some()
    }

    pub fn is_cached(&self, url: &str) -> bool {
        self.lock_cache().contains_key(url)
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    fn fetch_and_parse(&self, url: &str) -> Result<Dataset, LoaderError> {
        let bytes = self.fetcher.fetch(url)?;
        parse_csv(&bytes)
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<String, Arc<Dataset>>> {
        // The map is only mutated by single insert/remove calls, so a poisoned
        // guard still holds a consistent map.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::{DESCRIPTION_COLUMN, TITLE_COLUMN};

    #[test]
    fn parse_normalizes_categories() {
        let csv = b"Category,Rule Title,Description\n NAP ,Peace,Do not attack\nAlliance,Help,Reinforce\n";
        let ds = parse_csv(csv).unwrap();

        let categories: Vec<_> = ds.rows().iter().map(RuleRow::category).collect();
        assert_eq!(categories, vec!["nap", "alliance"]);
        assert_eq!(ds.rows()[0].field(TITLE_COLUMN), Some("Peace"));
    }

    #[test]
    fn parse_rejects_missing_category_column() {
        let csv = b"Rule Title,Description\nPeace,Do not attack\n";
        let err = parse_csv(csv).unwrap_err();

        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "Category"));
        assert_eq!(err.kind(), LoadFailureKind::Schema);
    }

    #[test]
    fn parse_keeps_quoted_newlines() {
        let csv = b"Category,Rule Title,Description\nnap,Peace,\"Line1\nLine2\"\n";
        let ds = parse_csv(csv).unwrap();

        assert_eq!(ds.rows()[0].field(DESCRIPTION_COLUMN), Some("Line1\nLine2"));
    }

    #[test]
    fn empty_cells_are_absent() {
        let csv = b"Category,Rule Title,Description,Description_French\nnap,Peace,Be calm,\n";
        let ds = parse_csv(csv).unwrap();

        assert_eq!(ds.rows()[0].field("Description_French"), None);
        assert!(ds.has_column("Description_French"));
    }

    #[test]
    fn user_messages_differ_by_kind() {
        let schema = LoaderError::MissingColumn("Category".into());
        let fetch = LoaderError::Fetch(FetchError::Status {
            url: "https://example.invalid".into(),
            status: 404,
        });

        assert_eq!(fetch.kind(), LoadFailureKind::Fetch);
        assert_ne!(schema.user_message(), fetch.user_message());
        assert!(schema.user_message().contains("'Category'"));
        assert_eq!(fetch.user_message(), FETCH_FAILURE_MESSAGE);
    }
}
