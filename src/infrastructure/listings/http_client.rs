use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::DomainError;

/// Failed HTTP exchange; `status` is `None` when no response was received
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HttpFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl HttpFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// The server refused the request credentials
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, Some(401 | 403))
    }
}

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait ListingsHttpClient: Send + Sync + std::fmt::Debug {
    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, HttpFailure>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestListingsClient {
    client: reqwest::Client,
}

impl ReqwestListingsClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Default for ReqwestListingsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingsHttpClient for ReqwestListingsClient {
    async fn get_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, HttpFailure> {
        let mut request = self.client.get(url).query(query);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpFailure::transport(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(HttpFailure::status(
                status.as_u16(),
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| HttpFailure::transport(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Debug, Default)]
    pub struct MockListingsHttpClient {
        responses: RwLock<HashMap<String, serde_json::Value>>,
        errors: RwLock<HashMap<String, HttpFailure>>,
        requests: RwLock<Vec<(String, Vec<(String, String)>)>>,
    }

    impl MockListingsHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, url: impl Into<String>, response: serde_json::Value) -> Self {
            self.responses.write().unwrap().insert(url.into(), response);
            self
        }

        pub fn with_error(self, url: impl Into<String>, error: HttpFailure) -> Self {
            self.errors.write().unwrap().insert(url.into(), error);
            self
        }

        /// Recorded (url, query) pairs in call order
        pub fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.requests.read().unwrap().clone()
        }
    }

    #[async_trait]
    impl ListingsHttpClient for MockListingsHttpClient {
        async fn get_json(
            &self,
            url: &str,
            _headers: Vec<(&str, &str)>,
            query: &[(&str, String)],
        ) -> Result<serde_json::Value, HttpFailure> {
            let query = query
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect();
            self.requests.write().unwrap().push((url.to_string(), query));

            if let Some(error) = self.errors.read().unwrap().get(url) {
                return Err(error.clone());
            }

            self.responses
                .read()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| HttpFailure::status(404, format!("No mock response for {}", url)))
        }
    }
}
