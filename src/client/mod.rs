//! Client-side helpers for the customer list: a debounced search dispatcher
//! and the collaborators it talks to.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::dto::customer::{CustomerListParams, CustomerRow};

pub mod debounce;
pub mod dispatcher;
pub mod download;
pub mod http;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(u16),
}

/// Issues a list query against the customer API.
pub trait CustomerFetcher: Send + Sync + 'static {
    fn fetch_customers(
        &self,
        params: &CustomerListParams,
    ) -> impl Future<Output = Result<Vec<CustomerRow>, FetchError>> + Send;
}

fn default_debounce_ms() -> u64 {
    debounce::DEFAULT_DEBOUNCE_WINDOW.as_millis() as u64
}

/// Settings of the search client.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the server, e.g. `http://127.0.0.1:8080`.
    pub base_url: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl ClientConfig {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
