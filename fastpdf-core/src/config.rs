//! Client configuration
//!
//! A [`ClientConfig`] is assembled once through [`ClientConfigBuilder`] and is
//! immutable afterwards. Building it appends the API version to the service
//! root, so [`ClientConfig::base_url`] always ends with `/{version}`.

use std::collections::BTreeMap;

/// Service root used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://data.fastpdfservice.com";

/// API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "v1";

/// Header carrying the raw API key on every request
pub const AUTH_HEADER: &str = "Authorization";

/// Image format tags accepted by the service
pub const SUPPORTED_IMAGE_FORMATS: &[&str] = &[
    "jpeg", "png", "gif", "bmp", "tiff", "webp", "svg", "ico", "pdf", "psd", "ai", "eps", "cr2",
    "nef", "sr2", "orf", "rw2", "dng", "arw", "heic",
];

/// Configuration held by a [`PdfClient`](crate::PdfClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    api_version: String,
    headers: BTreeMap<String, Vec<String>>,
    supported_image_formats: Vec<String>,
}

impl ClientConfig {
    /// Configuration with the default service root and API version
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder(api_key).build()
    }

    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(api_key)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Service root with the version segment appended
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Headers copied onto every outgoing request, each name mapped to all of its values
    pub fn headers(&self) -> &BTreeMap<String, Vec<String>> {
        &self.headers
    }

    pub fn supported_image_formats(&self) -> &[String] {
        &self.supported_image_formats
    }

    /// Whether the service accepts images tagged `format` (case-insensitive)
    pub fn supports_image_format(&self, format: &str) -> bool {
        self.supported_image_formats
            .iter()
            .any(|f| f.eq_ignore_ascii_case(format))
    }

    /// Joins an endpoint suffix such as `/pdf/split` onto the base URL
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    api_key: String,
    base_url: String,
    api_version: String,
    extra_headers: Vec<(String, String)>,
}

impl ClientConfigBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            extra_headers: Vec::new(),
        }
    }

    /// Service root, without the version segment
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Adds a header value. Repeated calls with the same name keep every value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> ClientConfig {
        let mut headers = BTreeMap::new();
        headers.insert(AUTH_HEADER.to_string(), vec![self.api_key.clone()]);
        for (name, value) in self.extra_headers {
            // Header names are case-insensitive; keep the first spelling seen.
            let key = headers
                .keys()
                .find(|existing| existing.eq_ignore_ascii_case(&name))
                .cloned()
                .unwrap_or(name);
            headers.entry(key).or_insert_with(Vec::new).push(value);
        }

        ClientConfig {
            base_url: format!("{}/{}", self.base_url, self.api_version),
            api_key: self.api_key,
            api_version: self.api_version,
            headers,
            supported_image_formats: SUPPORTED_IMAGE_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}
