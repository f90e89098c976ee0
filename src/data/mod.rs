//! Data module - sheet fetching, CSV parsing and the per-URL cache

mod dataset;
mod fetcher;
mod loader;

pub use dataset::{
    normalize_category, Dataset, RuleRow, CATEGORY_COLUMN, DESCRIPTION_COLUMN, TITLE_COLUMN,
};
pub use fetcher::{FetchError, Fetcher, HttpFetcher};
pub use loader::{parse_csv, DataLoader, LoadFailureKind, LoaderError};
