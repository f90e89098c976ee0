//! Tests for sheet loading and the per-URL cache.

use alliance_rules::data::{
    DataLoader, FetchError, Fetcher, LoadFailureKind, LoaderError, DESCRIPTION_COLUMN,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const SHEET: &str = "https://sheets.example/rules.csv";

/// Serves canned responses and counts every fetch.
#[derive(Default)]
struct SpyFetcher {
    responses: HashMap<String, Result<String, u16>>,
    calls: AtomicUsize,
}

impl SpyFetcher {
    fn with(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Err(status));
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for SpyFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.as_bytes().to_vec()),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

const RULES_CSV: &str = concat!(
    "Category,Rule Title,Description\n",
    "NewMember,Welcome,Read the rules\n",
    " NAP ,No attacks,Never attack pact members\n",
    "alliance,Donate,\"Donate weekly\nCheck the board\"\n",
);

#[test]
fn same_url_is_fetched_once() {
    let loader = DataLoader::new(SpyFetcher::default().with(SHEET, RULES_CSV));

    let first = loader.load(SHEET).unwrap();
    let second = loader.load(SHEET).unwrap();

    assert_eq!(loader.fetcher().calls(), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(loader.is_cached(SHEET));
}

#[test]
fn cache_is_keyed_by_exact_url() {
    let other = format!("{SHEET}&gid=0");
    let loader = DataLoader::new(
        SpyFetcher::default()
            .with(SHEET, RULES_CSV)
            .with(&other, RULES_CSV),
    );

    loader.load(SHEET).unwrap();
    loader.load(&other).unwrap();
    loader.load(SHEET).unwrap();

    assert_eq!(loader.fetcher().calls(), 2);
}

#[test]
fn invalidate_forces_refetch() {
    let loader = DataLoader::new(SpyFetcher::default().with(SHEET, RULES_CSV));

    loader.load(SHEET).unwrap();
    assert!(loader.invalidate(SHEET));
    assert!(!loader.invalidate(SHEET));
    loader.load(SHEET).unwrap();

    assert_eq!(loader.fetcher().calls(), 2);
    assert!(loader.is_cached(SHEET));
}

#[test]
fn concurrent_first_loads_fetch_once() {
    let loader = Arc::new(DataLoader::new(SpyFetcher::default().with(SHEET, RULES_CSV)));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let loader = Arc::clone(&loader);
            thread::spawn(move || loader.load(SHEET).map(|ds| ds.len()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 3);
    }
    assert_eq!(loader.fetcher().calls(), 1);
}

#[test]
fn categories_are_trimmed_and_lowercased() {
    let loader = DataLoader::new(SpyFetcher::default().with(SHEET, RULES_CSV));
    let dataset = loader.load(SHEET).unwrap();

    let categories: Vec<_> = dataset.rows().iter().map(|r| r.category()).collect();
    assert_eq!(categories, vec!["newmember", "nap", "alliance"]);
    assert_eq!(
        dataset.rows()[2].field(DESCRIPTION_COLUMN),
        Some("Donate weekly\nCheck the board")
    );
}

#[test]
fn missing_category_column_is_schema_error() {
    let csv = "Rule Title,Description\nWelcome,Read the rules\n";
    let loader = DataLoader::new(SpyFetcher::default().with(SHEET, csv));

    let err = loader.load(SHEET).unwrap_err();

    assert!(matches!(err, LoaderError::MissingColumn(_)));
    assert_eq!(err.kind(), LoadFailureKind::Schema);
    assert!(!loader.is_cached(SHEET));
}

#[test]
fn http_failure_is_fetch_error_and_not_cached() {
    let loader = DataLoader::new(SpyFetcher::default().with_status(SHEET, 500));

    let err = loader.load(SHEET).unwrap_err();
    assert!(matches!(err, LoaderError::Fetch(FetchError::Status { status: 500, .. })));
    assert_eq!(err.kind(), LoadFailureKind::Fetch);

    // Failures are not memoized, so the next call tries again.
    let _ = loader.load(SHEET);
    assert_eq!(loader.fetcher().calls(), 2);
}

#[test]
fn header_only_sheet_loads_empty() {
    let loader =
        DataLoader::new(SpyFetcher::default().with(SHEET, "Category,Rule Title,Description\n"));

    let dataset = loader.load(SHEET).unwrap();
    assert!(dataset.is_empty());
    assert_eq!(dataset.columns().len(), 3);
}

#[test]
fn malformed_csv_is_fetch_error_and_not_cached() {
    let csv = "Category,Rule Title,Description\nnap,a,b,c,d\n";
    let loader = DataLoader::new(SpyFetcher::default().with(SHEET, csv));

    let err = loader.load(SHEET).unwrap_err();

    assert!(matches!(err, LoaderError::Csv(_)));
    assert_eq!(err.kind(), LoadFailureKind::Fetch);
    assert!(!loader.is_cached(SHEET));
}

#[test]
fn empty_body_is_fetch_error() {
    let loader = DataLoader::new(SpyFetcher::default().with(SHEET, ""));

    let err = loader.load(SHEET).unwrap_err();

    assert!(matches!(err, LoaderError::Csv(_)));
    assert_eq!(err.kind(), LoadFailureKind::Fetch);
    assert_eq!(err.user_message(), LoaderError::Interrupted.user_message());
    assert!(!loader.is_cached(SHEET));
}
