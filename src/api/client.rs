// src/api/client.rs
//! Pure HTTP client wrapper for Notion API.
//!
//! Handles authentication headers and base-URL resolution and turns non-2xx
//! answers into `TransportError`s. It knows nothing about pages or properties.

use super::parser::parse_error_body;
use super::NotionTransport;
use crate::config::ClientConfig;
use crate::error::AppError;
use crate::types::{ApiKey, ValidatedUrl};
use reqwest::{header, Client, Method};
use serde_json::Value;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: ValidatedUrl,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(
                &config.api_key,
                &config.notion_version,
            )?)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(
        api_key: &ApiKey,
        notion_version: &str,
    ) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_str(notion_version).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid Notion version: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl NotionTransport for NotionHttpClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, AppError> {
        let url = self.base_url.join_path(path);
        log::debug!("{} {}", method, url);

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let error = parse_error_body(status.as_u16(), &text);
            log::debug!("{} answered {} ({})", url, status, error.code);
            return Err(AppError::Transport(error));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            log::error!("Failed to parse response from {}: {}", url, e);
            AppError::MalformedResponse(format!("{} from {}", e, url))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_carry_auth_and_version() {
        let key = ApiKey::new("secret_abcdefghijklmnopqrs").unwrap();
        let headers = NotionHttpClient::create_headers(&key, "2022-06-28").unwrap();

        assert_eq!(
            headers[header::AUTHORIZATION],
            "Bearer secret_abcdefghijklmnopqrs"
        );
        assert_eq!(headers["Notion-Version"], "2022-06-28");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn version_with_newline_is_rejected() {
        let key = ApiKey::new("secret_abcdefghijklmnopqrs").unwrap();
        assert!(NotionHttpClient::create_headers(&key, "2022-06-28\n").is_err());
    }
}
