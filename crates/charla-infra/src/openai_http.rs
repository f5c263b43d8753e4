//! Shared HTTP plumbing for the OpenAI REST endpoints that async-openai
//! is not used for (embeddings and audio).

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

/// Authenticated HTTP client bound to one OpenAI-compatible base URL.
///
/// The API key is stored as a [`SecretString`] and only exposed when
/// building the `Authorization` header.
#[derive(Clone)]
pub struct OpenAiHttp {
    client: reqwest::Client,
    api_key: Arc<SecretString>,
    base_url: String,
}

impl OpenAiHttp {
    /// Build a client. `timeout` of `None` leaves requests unbounded.
    pub fn new(
        base_url: &str,
        api_key: SecretString,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_key: Arc::new(api_key),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an endpoint path such as `/embeddings`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start an authenticated POST to `path`.
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.url(path))
            .bearer_auth(self.api_key.expose_secret())
    }
}
