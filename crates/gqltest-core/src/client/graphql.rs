use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{Transport, TransportError};
use crate::config::{DEFAULT_ACCOUNT_HEADER, DEFAULT_TIMEOUT_SECS};

/// HTTP client for making GraphQL requests.
pub struct GraphQLClient {
    endpoint: String,
    headers: HashMap<String, String>,
    timeout: Duration,
    client: Client,
}

/// A GraphQL request body.
#[derive(Debug, Serialize)]
struct GraphQLRequest {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Map<String, Value>>,
}

impl GraphQLClient {
    /// Creates a new client for the given endpoint, isolating its requests
    /// under the given account id.
    pub fn new(endpoint: impl Into<String>, account_id: impl Into<String>) -> Self {
        let mut headers = HashMap::new();
        headers.insert(DEFAULT_ACCOUNT_HEADER.to_string(), account_id.into());

        Self {
            endpoint: endpoint.into(),
            headers,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client: Client::new(),
        }
    }

    /// Renames the header carrying the account id.
    pub fn with_account_header(mut self, header: impl Into<String>) -> Self {
        let header = header.into();
        if header != DEFAULT_ACCOUNT_HEADER {
            if let Some(id) = self.headers.remove(DEFAULT_ACCOUNT_HEADER) {
                self.headers.insert(header, id);
            }
        }
        self
    }

    /// Adds custom headers, overriding defaults on key collision.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Transport for GraphQLClient {
    async fn execute(
        &self,
        query: &str,
        variables: Option<Map<String, Value>>,
    ) -> Result<Vec<u8>, TransportError> {
        let body = GraphQLRequest {
            query: query.to_string(),
            variables,
        };

        let mut request = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&body);
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }
}

/// Parses repeated `Key: Value` header flags into a map.
pub fn parse_headers(raw: &[String]) -> Result<HashMap<String, String>, TransportError> {
    let mut headers = HashMap::new();
    for entry in raw {
        let (key, value) = entry
            .split_once(':')
            .ok_or_else(|| TransportError::InvalidHeader(entry.clone()))?;
        headers.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(headers)
}
