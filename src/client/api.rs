//! Thin HTTP client for the Fundika auth API.
//!
//! Wraps `reqwest` with the crate's user agent and the handful of request
//! shapes the session store needs. Bearer tokens travel only in the
//! `Authorization` header and are never logged.

use anyhow::{Result, anyhow};
use reqwest::Client;
use serde_json::Value;
use tracing::{Instrument, debug, info_span};
use url::Url;

use crate::APP_USER_AGENT;

pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            base_url: base_url.to_string(),
            client,
        })
    }

    /// POST a JSON payload without authentication, as login endpoints expect.
    ///
    /// # Errors
    /// Returns an error if the request fails or the server answers with a
    /// non-success status; the server's `message` field is included.
    pub async fn post_json(&self, path: &str, payload: &Value) -> Result<Value> {
        let url = endpoint_url(&self.base_url, path)?;

        let span = info_span!("api.request", http.method = "POST", url = %url);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .instrument(span)
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let json_response: Value = response.json().await?;

            return Err(anyhow!(
                "{} - {}, {}",
                url,
                status,
                api_error_message(&json_response)
            ));
        }

        Ok(response.json().await?)
    }

    /// Authenticated POST with an empty body, as logout endpoints expect.
    ///
    /// # Errors
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    pub async fn post_empty(&self, path: &str, token: &str) -> Result<()> {
        let url = endpoint_url(&self.base_url, path)?;

        let span = info_span!("api.request", http.method = "POST", url = %url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .send()
            .instrument(span)
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let json_response: Value = response.json().await?;

            return Err(anyhow!(
                "{} - {}, {}",
                url,
                status,
                api_error_message(&json_response)
            ));
        }

        Ok(())
    }

    /// Authenticated GET returning the response JSON.
    ///
    /// # Errors
    /// Returns an error if the request fails or the server answers with a
    /// non-success status.
    pub async fn fetch_json(&self, path: &str, token: &str) -> Result<Value> {
        let url = endpoint_url(&self.base_url, path)?;

        let span = info_span!("api.request", http.method = "GET", url = %url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .instrument(span)
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let json_response: Value = response.json().await?;

            return Err(anyhow!(
                "{} - {}, {}",
                url,
                status,
                api_error_message(&json_response)
            ));
        }

        Ok(response.json().await?)
    }
}

fn api_error_message(json_response: &Value) -> &str {
    json_response
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// # Errors
/// Returns an error if `url` cannot be parsed, has no host, or uses an
/// unsupported scheme.
fn endpoint_url(url: &str, path: &str) -> Result<String> {
    let url = Url::parse(url)?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| anyhow!("Error parsing URL: no host specified"))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => return Err(anyhow!("Error parsing URL: unsupported scheme {scheme}")),
        },
    };

    let endpoint_url = format!("{scheme}://{host}:{port}{path}");

    debug!("endpoint URL: {}", endpoint_url);

    Ok(endpoint_url)
}
