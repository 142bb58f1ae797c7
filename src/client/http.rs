use std::time::Duration;

use reqwest::Client;

use crate::client::{CustomerFetcher, FetchError};
use crate::dto::customer::{CustomerListParams, CustomerRow};

/// [`CustomerFetcher`] backed by `GET /api/customers/list`.
#[derive(Clone, Debug)]
pub struct HttpCustomerClient {
    http: Client,
    list_url: String,
}

impl HttpCustomerClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            http,
            list_url: format!("{}/api/customers/list", base_url.trim_end_matches('/')),
        })
    }

    pub fn list_url(&self) -> &str {
        &self.list_url
    }
}

impl CustomerFetcher for HttpCustomerClient {
    async fn fetch_customers(
        &self,
        params: &CustomerListParams,
    ) -> Result<Vec<CustomerRow>, FetchError> {
        let response = self.http.get(&self.list_url).query(params).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.json::<Vec<CustomerRow>>().await?)
    }
}
