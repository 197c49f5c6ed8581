//! HTTP client for the catalog API.
//!
//! Uses `reqwest` 0.13 with JSON bodies. Error responses carry an
//! `{"error": ...}` body which is surfaced as [`ClientError::Api`].

use std::future::Future;
use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use mercado_core::{
    CatalogProduct, CreatedBody, ErrorBody, MessageBody, NewProduct, ProductId, ProductPatch,
    UploadedFile,
};

/// Multipart field name expected by `/upload`.
const UPLOAD_FIELD: &str = "imagen";

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed or the body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// HTTP status returned by the API, if the request got that far.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(_) => None,
        }
    }
}

/// Read access to products, as needed by catalog and cart rendering.
pub trait ProductSource {
    /// Fetch every product in the catalog.
    fn list_products(
        &self,
    ) -> impl Future<Output = Result<Vec<CatalogProduct>, ClientError>> + Send;

    /// Fetch one product. `Ok(None)` means the product does not exist.
    fn fetch_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<CatalogProduct>, ClientError>> + Send;
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

#[derive(Debug)]
struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client for the API rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.as_str().trim_end_matches('/').to_string(),
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the API reports an error.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CatalogProduct>, ClientError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("productos"))
            .send()
            .await?;
        parse_response(response).await
    }

    /// Get one product. Returns `None` if the API answers with `null`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the API reports an error.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: ProductId) -> Result<Option<CatalogProduct>, ClientError> {
        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("producto/{id}")))
            .send()
            .await?;
        parse_response(response).await
    }

    /// Create a product and return its new ID.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 400 if `nombre` is missing.
    #[instrument(skip(self, product))]
    pub async fn create(&self, product: &NewProduct) -> Result<CreatedBody, ClientError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("productos"))
            .json(product)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 400 for an empty patch and 404
    /// for a missing product.
    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<MessageBody, ClientError> {
        let response = self
            .inner
            .client
            .put(self.endpoint(&format!("producto/{id}")))
            .json(patch)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 404 for a missing product.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: ProductId) -> Result<MessageBody, ClientError> {
        let response = self
            .inner
            .client
            .delete(self.endpoint(&format!("producto/{id}")))
            .send()
            .await?;
        parse_response(response).await
    }

    /// Upload an image under `filename`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the API rejects it.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadedFile, ClientError> {
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .inner
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        parse_response(response).await
    }
}

impl ProductSource for CatalogClient {
    async fn list_products(&self) -> Result<Vec<CatalogProduct>, ClientError> {
        self.list().await
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Option<CatalogProduct>, ClientError> {
        self.get(id).await
    }
}

/// Decode a success body, or turn an error body into [`ClientError::Api`].
async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await?;
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map_or_else(|_| text.chars().take(200).collect(), |body| body.error);

    tracing::debug!(status = %status, message = %message, "catalog API returned an error");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
