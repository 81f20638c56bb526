//! HTTP client for the upstream local-business provider.
//!
//! Wraps `reqwest` with bearer auth, provider-specific error handling, and
//! the two endpoints the toolkit consumes: the conversational search
//! endpoint and the business-detail endpoint. Responses are returned as
//! loosely-typed JSON; the provider's shape is probed downstream, not
//! trusted here.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ProviderError;

const DEFAULT_CHAT_URL: &str = "https://api.provider.example/ai/chat/v2";
const DEFAULT_DETAIL_URL: &str = "https://api.provider.example/v3/businesses";

/// The parts of a conversational response every caller needs, plus the raw
/// body for business extraction.
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// Session identifier correlating follow-up queries to the same
    /// upstream conversational context.
    pub chat_id: Option<String>,
    /// The assistant's natural-language answer, empty when absent.
    pub ai_text: String,
    /// The full response body, probed by [`crate::extract_businesses`].
    pub body: serde_json::Value,
}

/// Client for the provider's search and detail APIs.
///
/// Use [`ProviderClient::new`] for production or
/// [`ProviderClient::with_endpoints`] to point at a mock server in tests.
pub struct ProviderClient {
    client: Client,
    api_key: String,
    chat_url: Url,
    detail_url: Url,
}

impl ProviderClient {
    /// Creates a new client pointed at the production provider endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ProviderError> {
        Self::with_endpoints(
            api_key,
            timeout_secs,
            user_agent,
            DEFAULT_CHAT_URL,
            DEFAULT_DETAIL_URL,
        )
    }

    /// Creates a new client with custom endpoint URLs (for testing with
    /// wiremock, or for config-driven overrides).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ProviderError::Api`] if either URL does
    /// not parse.
    pub fn with_endpoints(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        chat_url: &str,
        detail_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            chat_url: parse_url(chat_url)?,
            detail_url: parse_url(detail_url)?,
        })
    }

    /// Sends a natural-language query to the conversational endpoint.
    ///
    /// `chat_id` re-enters an existing upstream session; `coords` scopes
    /// the search geographically. Returns the session id, assistant text,
    /// and the raw body for extraction.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Api`] on a non-success HTTP status (the raw body
    ///   is carried for diagnostics).
    /// - [`ProviderError::Http`] on network failure.
    /// - [`ProviderError::Deserialize`] if the body is not valid JSON.
    pub async fn chat(
        &self,
        query: &str,
        chat_id: Option<&str>,
        coords: Option<(f64, f64)>,
    ) -> Result<ChatReply, ProviderError> {
        let mut user_context = serde_json::json!({ "locale": "en_US" });
        if let Some((latitude, longitude)) = coords {
            user_context["latitude"] = serde_json::json!(latitude);
            user_context["longitude"] = serde_json::json!(longitude);
        }

        let mut request_body = serde_json::json!({
            "query": query,
            "user_context": user_context,
        });
        if let Some(id) = chat_id {
            request_body["chat_id"] = serde_json::json!(id);
        }

        let response = self
            .client
            .post(self.chat_url.clone())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| ProviderError::Deserialize {
                context: "chat response".to_string(),
                source: e,
            })?;

        Ok(ChatReply {
            chat_id: body
                .get("chat_id")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            ai_text: body
                .get("response")
                .and_then(|r| r.get("text"))
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string(),
            body,
        })
    }

    /// Fetches the detail document for a single business. The caller feeds
    /// the `hours` payload inside it to the schedule normalizer.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Api`] on a non-success HTTP status.
    /// - [`ProviderError::Http`] on network failure.
    /// - [`ProviderError::Deserialize`] if the body is not valid JSON.
    pub async fn business_detail(
        &self,
        business_id: &str,
    ) -> Result<serde_json::Value, ProviderError> {
        let mut url = self.detail_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderError::Api {
                status: 0,
                body: "detail URL cannot be a base".to_string(),
            })?
            .push(business_id);

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ProviderError::Deserialize {
            context: format!("business detail ({business_id})"),
            source: e,
        })
    }
}

fn parse_url(raw: &str) -> Result<Url, ProviderError> {
    Url::parse(raw).map_err(|e| ProviderError::Api {
        status: 0,
        body: format!("invalid endpoint URL '{raw}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_endpoints_rejects_invalid_url() {
        let result = ProviderClient::with_endpoints("k", 30, "scout/test", "not a url", "also bad");
        assert!(result.is_err());
    }

    #[test]
    fn with_endpoints_accepts_http_urls() {
        let client =
            ProviderClient::with_endpoints("k", 30, "scout/test", "http://127.0.0.1:9/chat", "http://127.0.0.1:9/businesses");
        assert!(client.is_ok());
    }
}
