//! FastPDF service client
//!
//! Each remote operation reads its file input, serializes its parameters to a
//! JSON form field and posts both through [`post_multipart`].

use std::collections::BTreeMap;
use std::path::Path;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{FastPdfError, Result, ServiceError};
use crate::input::FileInput;
use crate::multipart::{post_multipart, Upload, FILE_FIELD};
use crate::output;

/// Client for the FastPDF web service
///
/// # Example
///
/// ```no_run
/// use fastpdf::{ClientConfig, PdfClient};
///
/// # fn main() -> fastpdf::Result<()> {
/// let client = PdfClient::new(ClientConfig::new("your-api-key"))?;
/// let pdf = client.split("input/sample-multipage.pdf", &[3, 7])?;
/// client.save(pdf, "output/split.pdf")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PdfClient {
    config: ClientConfig,
    headers: HeaderMap,
    http: Client,
}

impl PdfClient {
    /// Builds a client from `config`.
    ///
    /// Fails with [`FastPdfError::Config`] when a configured header cannot be
    /// placed on an HTTP request.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, values) in config.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| FastPdfError::Config(format!("Invalid header name '{name}': {e}")))?;
            for value in values {
                let header_value = HeaderValue::from_str(value).map_err(|e| {
                    FastPdfError::Config(format!("Invalid value for header '{name}': {e}"))
                })?;
                headers.append(header_name.clone(), header_value);
            }
        }

        let http = Client::builder()
            .build()
            .map_err(|e| FastPdfError::Config(format!("Failed to build HTTP client: {e}")))?;

        debug!(base_url = %config.base_url(), "FastPDF client initialized");

        Ok(Self {
            config,
            headers,
            http,
        })
    }

    /// Client with the default service root and API version
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::new(api_key))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Checks the API key against the service.
    ///
    /// Returns `Ok(true)` when the service answers `200 OK`; `Ok(false)` is
    /// never returned. A rejected token surfaces as [`FastPdfError::Service`]
    /// carrying the status and body, transport failures as
    /// [`FastPdfError::Http`].
    pub fn validate_token(&self) -> Result<bool> {
        let url = self.config.endpoint("/token");
        debug!(url = %url, "Validating token");

        let response = self.http.get(&url).headers(self.headers.clone()).send()?;
        if response.status() != StatusCode::OK {
            return Err(ServiceError::from_response(response).into());
        }

        info!("Token is valid");
        Ok(true)
    }

    /// Splits a PDF at the given page numbers and returns the resulting PDF.
    ///
    /// Page numbers are forwarded as-is; the service decides whether they are valid.
    pub fn split(&self, file: impl Into<FileInput>, splits: &[i64]) -> Result<Vec<u8>> {
        self.upload(file, "/pdf/split", "splits", splits)
    }

    /// Splits a PDF into the given `[start, end]` page ranges and returns a zip
    /// archive holding one PDF per range.
    pub fn split_zip(&self, file: impl Into<FileInput>, splits: &[[i64; 2]]) -> Result<Vec<u8>> {
        self.upload(file, "/pdf/split-zip", "splits", splits)
    }

    /// Replaces document metadata entries and returns the modified PDF.
    pub fn edit_metadata(
        &self,
        file: impl Into<FileInput>,
        metadata: &BTreeMap<String, String>,
    ) -> Result<Vec<u8>> {
        self.upload(file, "/pdf/metadata", "metadata", metadata)
    }

    /// Writes `content` to `path`, or returns it when `path` is empty.
    ///
    /// See [`output::save`].
    pub fn save(&self, content: Vec<u8>, path: impl AsRef<Path>) -> Result<Option<Vec<u8>>> {
        output::save(content, path)
    }

    fn upload<T: Serialize + ?Sized>(
        &self,
        file: impl Into<FileInput>,
        path: &str,
        field: &str,
        params: &T,
    ) -> Result<Vec<u8>> {
        let file = file.into().read()?;
        let params = serde_json::to_string(params)?;
        let upload = Upload::new(FILE_FIELD, file).field(field, params);

        post_multipart(&self.http, &self.config.endpoint(path), &self.headers, upload)
    }
}
