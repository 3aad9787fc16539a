use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use indicatif::ProgressBar;
use thiserror::Error;
use tokio::time::Instant;

use crate::cache::{CacheKey, ResultCache};
use crate::fetch::client::{ApiClient, DEFAULT_API_BASE};
use crate::fetch::fetch_all_records;
use crate::normalize::{normalize_rows, NormalizeError, Row};
use crate::schema::Schema;

#[derive(Clone, Debug)]
pub struct Options {
    pub token: String,
    pub collection: String,
    pub api_base: String,
    pub page_size: u32,
    pub max_pages: u32,
    pub rate: u32,
    pub timeout_seconds: usize,
    pub cache_ttl_seconds: u64,
    pub schema: Schema,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            token: String::new(),
            collection: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: 100,
            max_pages: 200,
            rate: 3,
            timeout_seconds: 10,
            cache_ttl_seconds: 3600,
            schema: Schema::places(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("no integration token provided")]
    MissingToken,

    #[error("no collection id provided")]
    MissingCollection,

    #[error("invalid page_size {value}, expected 1-100")]
    InvalidPageSize { value: u32 },

    #[error("invalid max_pages {value}, expected positive integer")]
    InvalidPageBudget { value: u32 },

    #[error("invalid rate {value}, expected positive integer")]
    InvalidRate { value: u32 },

    #[error("schema has no columns")]
    EmptySchema,

    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("api returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode response body: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },

    #[error("pagination did not terminate within {budget} pages")]
    PaginationOverrun { budget: u32 },

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

#[derive(Clone, Debug)]
pub struct FetchReport {
    pub started_at: Instant,
    pub elapsed: Duration,
    pub rows: Vec<Row>,
    pub pages_fetched: u32,
    pub from_cache: bool,
}

#[derive(Clone, Debug)]
pub struct Runner {
    options: Options,
    cache: Arc<Mutex<ResultCache>>,
}

impl Runner {
    pub fn new(options: Options) -> Result<Self, RunnerError> {
        if options.token.trim().is_empty() {
            return Err(RunnerError::MissingToken);
        }
        if options.collection.trim().is_empty() {
            return Err(RunnerError::MissingCollection);
        }
        if options.page_size == 0 || options.page_size > 100 {
            return Err(RunnerError::InvalidPageSize {
                value: options.page_size,
            });
        }
        if options.max_pages == 0 {
            return Err(RunnerError::InvalidPageBudget {
                value: options.max_pages,
            });
        }
        if options.rate == 0 {
            return Err(RunnerError::InvalidRate {
                value: options.rate,
            });
        }
        if options.schema.is_empty() {
            return Err(RunnerError::EmptySchema);
        }
        let cache = Arc::new(Mutex::new(ResultCache::new(Duration::from_secs(
            options.cache_ttl_seconds,
        ))));
        Ok(Self { options, cache })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub async fn run(&self) -> Result<FetchReport, RunnerError> {
        let pb = ProgressBar::hidden();
        self.run_with_progress(&pb).await
    }

    /// Serves from the cache when a fresh whole-result entry exists,
    /// otherwise fetches every page, normalizes all records in one pass,
    /// and stores the result under (collection, page_size).
    pub async fn run_with_progress(&self, pb: &ProgressBar) -> Result<FetchReport, RunnerError> {
        let started_at = Instant::now();
        let key = CacheKey::new(&self.options.collection, self.options.page_size);

        if let Some((rows, pages)) = self.lock_cache().get(&key) {
            return Ok(FetchReport {
                started_at,
                elapsed: started_at.elapsed(),
                rows,
                pages_fetched: pages,
                from_cache: true,
            });
        }

        let client = ApiClient::new(
            &self.options.api_base,
            &self.options.token,
            self.options.timeout_seconds,
        )?;
        let (records, pages) = fetch_all_records(
            &client,
            &self.options.collection,
            self.options.page_size,
            self.options.max_pages,
            self.options.rate,
            pb,
        )
        .await?;
        let rows = normalize_rows(&records, &self.options.schema)?;

        self.lock_cache().store(key, rows.clone(), pages);

        let elapsed = started_at.elapsed();
        Ok(FetchReport {
            started_at,
            elapsed,
            rows,
            pages_fetched: pages,
            from_cache: false,
        })
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    pub fn cache_is_empty(&self) -> bool {
        self.lock_cache().is_empty()
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResultCache> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}
