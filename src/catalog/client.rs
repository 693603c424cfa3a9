//! REST client for the catalog service.

use std::sync::Arc;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::CartConfig;

use super::{CatalogApi, CatalogError, Product, ProductId, StockLevel};

/// Maximum response-body length kept in error values and logs.
const ERROR_BODY_LIMIT: usize = 200;

/// Client for the catalog service.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
    access_token: Option<SecretString>,
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    #[must_use]
    pub fn new(config: &CartConfig) -> Self {
        let base_url = config
            .catalog_base_url
            .as_str()
            .trim_end_matches('/')
            .to_string();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url,
                access_token: config.catalog_access_token.clone(),
            }),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{path}", self.inner.base_url);
        let mut request = self.inner.client.request(method, url);
        if let Some(token) = &self.inner.access_token {
            request = request.bearer_auth(token.expose_secret());
        }
        request
    }

    /// Send a request and return the response body on success.
    ///
    /// 404 maps to [`CatalogError::NotFound`]; any other non-success status
    /// maps to [`CatalogError::Status`] with a truncated body for diagnostics.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<String, CatalogError> {
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(format!("/{path}")));
        }

        let text = response.text().await?;

        if !status.is_success() {
            let body: String = text.chars().take(ERROR_BODY_LIMIT).collect();
            tracing::error!(
                status = %status,
                body = %body,
                "catalog returned non-success status"
            );
            return Err(CatalogError::Status { status, body });
        }

        debug!(path = %path, status = %status, "catalog request ok");
        Ok(text)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let text = self.send(self.request(Method::GET, path), path).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), CatalogError> {
        self.send(self.request(Method::PUT, path).json(body), path)
            .await?;
        Ok(())
    }
}

impl CatalogApi for CatalogClient {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get_json(&format!("products/{id}")).await
    }

    async fn stock(&self, id: ProductId) -> Result<StockLevel, CatalogError> {
        self.get_json(&format!("stock/{id}")).await
    }

    async fn update_stock(&self, id: ProductId, amount: u32) -> Result<(), CatalogError> {
        let body = StockLevel { id, amount };
        self.put_json(&format!("stock/{id}"), &body).await
    }

    async fn update_product(&self, product: &Product, amount: u32) -> Result<(), CatalogError> {
        // The catalog expects the full item body with the cart amount merged in.
        let mut body = serde_json::to_value(product)?;
        if let Some(fields) = body.as_object_mut() {
            fields.insert("amount".to_string(), amount.into());
        }
        self.put_json(&format!("products/{}", product.id), &body).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> CatalogClient {
        let config = CartConfig {
            catalog_base_url: base.parse().unwrap(),
            catalog_access_token: None,
            storage_path: std::path::PathBuf::from("unused"),
        };
        CatalogClient::new(&config)
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = client_for("http://localhost:3333/");
        assert_eq!(client.inner.base_url, "http://localhost:3333");

        let client = client_for("http://localhost:3333");
        assert_eq!(client.inner.base_url, "http://localhost:3333");
    }
}
