//! Thin HTTP client for the cluster's snapshot API.
//!
//! One attempt per call, explicit timeout per request. Transport errors and
//! timeouts surface as errors with host context; interpreting response
//! statuses is left to the operations.

use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::{Client, Response};
use tracing::error;

use crate::config::Settings;

pub struct EsClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl EsClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: settings.es_host.clone(),
            request_timeout: settings.request_timeout,
        })
    }

    pub fn host(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        let request = self
            .client
            .get(self.url(path))
            .timeout(self.request_timeout);
        self.dispatch(request).await
    }

    /// PUT with an opaque payload string, e.g. repository settings.
    pub async fn put_payload(&self, path: &str, payload: String) -> Result<Response> {
        let request = self
            .client
            .put(self.url(path))
            .body(payload)
            .timeout(self.request_timeout);
        self.dispatch(request).await
    }

    /// PUT with a JSON body and a caller-chosen timeout budget.
    pub async fn put_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        budget: Duration,
    ) -> Result<Response> {
        let request = self.client.put(self.url(path)).json(body).timeout(budget);
        self.dispatch(request).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        let request = self
            .client
            .delete(self.url(path))
            .timeout(self.request_timeout);
        self.dispatch(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            error!("problem while contacting {}: {}", self.base_url, e);
            anyhow!("problem while contacting {}: {}", self.base_url, e)
        })
    }
}
