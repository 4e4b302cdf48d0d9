//! HTTP client for an AEM author/publish instance.
//!
//! Wraps `reqwest` with basic-credential handling and the `.infinity.json`
//! selector convention. The fetch is deliberately single-shot: a transport or
//! auth failure aborts the whole import rather than retrying against a
//! content repository that is down or misconfigured.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::AemError;

/// Selector suffix that makes AEM render a subtree as one nested JSON document.
const INFINITY_SUFFIX: &str = ".infinity.json";

/// Client for fetching commerce exports from an AEM instance.
///
/// Holds the HTTP client, the normalized instance URL, and the basic
/// credentials the admin supplied. Point `instance_url` at a mock server
/// in tests.
pub struct AemClient {
    client: Client,
    base_url: Url,
    username: String,
    password: String,
}

impl AemClient {
    /// Creates a new client for the given instance.
    ///
    /// # Errors
    ///
    /// Returns [`AemError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`AemError::InvalidBaseUrl`] if `instance_url`
    /// does not parse.
    pub fn new(
        instance_url: &str,
        username: &str,
        password: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AemError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends the products path instead of replacing the last
        // path segment.
        let normalised = format!("{}/", instance_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| AemError::InvalidBaseUrl(instance_url.to_string()))?;

        Ok(Self {
            client,
            base_url,
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Fetches the product subtree at `products_path` as one JSON document.
    ///
    /// Issues a single authenticated GET to
    /// `{instance_url}{products_path}.infinity.json` and parses the body.
    ///
    /// # Errors
    ///
    /// - [`AemError::Http`] on network failure or a non-2xx status
    ///   (401/403 from rejected credentials included).
    /// - [`AemError::InvalidBaseUrl`] if the joined URL is invalid.
    /// - [`AemError::Deserialize`] if the body is not valid JSON.
    pub async fn fetch_products(&self, products_path: &str) -> Result<Value, AemError> {
        let url = self.infinity_url(products_path)?;
        tracing::debug!(url = %url, "fetching AEM product tree");

        let response = self
            .client
            .get(url.clone())
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| AemError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Builds the full request URL for a content path, appending the
    /// `.infinity.json` selector.
    fn infinity_url(&self, products_path: &str) -> Result<Url, AemError> {
        let relative = format!(
            "{}{INFINITY_SUFFIX}",
            products_path.trim_start_matches('/')
        );
        self.base_url
            .join(&relative)
            .map_err(|_| AemError::InvalidBaseUrl(format!("{}{relative}", self.base_url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(instance_url: &str) -> AemClient {
        AemClient::new(instance_url, "admin", "admin", 30, "aemsync-test/0.1")
            .expect("client construction should not fail")
    }

    #[test]
    fn infinity_url_appends_selector() {
        let client = test_client("http://aem.example.com:4502");
        let url = client
            .infinity_url("/etc/commerce/products")
            .expect("should join");
        assert_eq!(
            url.as_str(),
            "http://aem.example.com:4502/etc/commerce/products.infinity.json"
        );
    }

    #[test]
    fn infinity_url_handles_trailing_slash_on_instance() {
        let client = test_client("http://aem.example.com:4502/");
        let url = client
            .infinity_url("/etc/commerce/products")
            .expect("should join");
        assert_eq!(
            url.as_str(),
            "http://aem.example.com:4502/etc/commerce/products.infinity.json"
        );
    }

    #[test]
    fn infinity_url_handles_path_without_leading_slash() {
        let client = test_client("http://aem.example.com:4502");
        let url = client
            .infinity_url("etc/commerce/products")
            .expect("should join");
        assert_eq!(
            url.as_str(),
            "http://aem.example.com:4502/etc/commerce/products.infinity.json"
        );
    }

    #[test]
    fn invalid_instance_url_is_rejected() {
        let result = AemClient::new("not a url", "admin", "admin", 30, "aemsync-test/0.1");
        assert!(matches!(result, Err(AemError::InvalidBaseUrl(_))));
    }
}
