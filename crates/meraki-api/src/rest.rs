// Direct REST client for the Dashboard API.
//
// Thin layer over `Transport`: path + params in, JSON out. Paginated list
// endpoints go through `get_page` so the `Link` header is inspected.

use secrecy::SecretString;
use serde_json::Value;

use crate::error::Error;
use crate::pagination::{CURSOR_PARAM, Page};
use crate::params::Params;
use crate::transport::{ApiResponse, RetryPolicy, Transport, TransportConfig};

/// Async client for the Dashboard REST API.
///
/// Uses API-key authentication; every GET runs under the transport's
/// retry policy.
#[derive(Debug, Clone)]
pub struct RestClient {
    transport: Transport,
}

impl RestClient {
    /// Build from an API key and transport config.
    pub fn new(
        base_url: &str,
        api_key: &SecretString,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            transport: Transport::new(base_url, api_key, config)?,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        retry: RetryPolicy,
    ) -> Result<Self, Error> {
        Ok(Self {
            transport: Transport::from_reqwest(base_url, http, retry)?,
        })
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// GET and return the parsed body.
    pub async fn get(&self, path: &str, params: &Params) -> Result<Value, Error> {
        Ok(self.get_response(path, params).await?.body)
    }

    /// GET and return status, headers, and body.
    pub async fn get_response(&self, path: &str, params: &Params) -> Result<ApiResponse, Error> {
        self.transport.get(path, &params.to_query()).await
    }

    /// Fetch one page of a paginated list endpoint.
    pub async fn get_page(
        &self,
        path: &str,
        params: &Params,
        cursor: Option<&str>,
    ) -> Result<Page<Value>, Error> {
        let params = match cursor {
            Some(c) => params.clone().scalar(CURSOR_PARAM, c),
            None => params.clone(),
        };
        let resp = self.get_response(path, &params).await?;
        Ok(Page::from_response(resp))
    }
}
