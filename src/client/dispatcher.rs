//! Search box controller: debounces search-text edits into list queries and
//! keeps the latest rows the server returned.
//!
//! Queries are not fenced. When two fetches overlap, whichever response
//! arrives last replaces the rows, even if it answers the older query.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::client::debounce::Debouncer;
use crate::client::download::{DownloadError, DownloadSink, download_customers};
use crate::client::http::HttpCustomerClient;
use crate::client::{ClientConfig, CustomerFetcher, FetchError};
use crate::dto::customer::{CustomerListParams, CustomerRow};

/// Rows currently shown plus the outcome of the last fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerListState {
    pub rows: Vec<CustomerRow>,
    /// Message of the last failed fetch; cleared by the next success.
    pub last_error: Option<String>,
    /// Number of responses applied so far, successful or not.
    pub responses: u64,
}

type SharedState = Arc<RwLock<CustomerListState>>;

fn apply_response(state: &SharedState, result: Result<Vec<CustomerRow>, FetchError>) {
    let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
    state.responses += 1;
    match result {
        Ok(rows) => {
            log::debug!("Received {} customers", rows.len());
            state.rows = rows;
            state.last_error = None;
        }
        Err(err) => {
            // Previous rows stay visible.
            log::error!("Error fetching customers: {err}");
            state.last_error = Some(err.to_string());
        }
    }
}

pub struct SearchDispatcher {
    debouncer: Debouncer<CustomerListParams>,
    base_params: CustomerListParams,
    state: SharedState,
    worker: JoinHandle<()>,
}

impl SearchDispatcher {
    /// Starts the dispatcher. Must be called from within a tokio runtime.
    pub fn new<F: CustomerFetcher>(fetcher: F, window: Duration) -> Self {
        let (debouncer, mut requests) = Debouncer::new(window);
        let fetcher = Arc::new(fetcher);
        let state = SharedState::default();

        let worker = tokio::spawn({
            let state = state.clone();
            async move {
                while let Some(params) = requests.recv().await {
                    let fetcher = fetcher.clone();
                    let state = state.clone();
                    tokio::spawn(async move {
                        let result = fetcher.fetch_customers(&params).await;
                        apply_response(&state, result);
                    });
                }
            }
        });

        Self {
            debouncer,
            base_params: CustomerListParams::default(),
            state,
            worker,
        }
    }

    /// Builds a dispatcher that queries the server named in `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, FetchError> {
        let fetcher = HttpCustomerClient::new(&config.base_url)?;
        Ok(Self::new(fetcher, config.debounce_window()))
    }

    /// Sort and paging options sent along with every search.
    pub fn with_params(mut self, params: CustomerListParams) -> Self {
        self.base_params = params;
        self
    }

    /// Handles one edit of the search box. The query is sent only after the
    /// debounce window passes without further edits.
    pub fn on_search_text_changed(&mut self, text: impl Into<String>) {
        let params = self.base_params.clone().search(text);
        self.debouncer.push(params);
    }

    pub fn state(&self) -> CustomerListState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn rows(&self) -> Vec<CustomerRow> {
        self.state().rows
    }

    /// Exports the rows currently shown and hands the file to `sink`.
    pub fn download<S: DownloadSink + ?Sized>(&self, sink: &S) -> Result<(), DownloadError> {
        download_customers(&self.rows(), sink)
    }
}

impl Drop for SearchDispatcher {
    fn drop(&mut self) {
        self.worker.abort();
    }
}
