//! # fastpdf
//!
//! A blocking client for the FastPDF web service.
//!
//! ## Features
//!
//! - **Token validation**: check an API key before using it
//! - **Split**: split a PDF at page numbers, or into page ranges delivered as a zip archive
//! - **Metadata**: replace document metadata entries
//! - **Local helpers**: save results to disk and unpack returned archives
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::collections::BTreeMap;
//! use fastpdf::{extract_zip, ClientConfig, PdfClient};
//!
//! # fn main() -> fastpdf::Result<()> {
//! let config = ClientConfig::builder("your-api-key")
//!     .base_url("https://data.fastpdfservice.com")
//!     .api_version("v1")
//!     .build();
//! let client = PdfClient::new(config)?;
//!
//! // A rejected key comes back as `Err`, never as `Ok(false)`.
//! client.validate_token()?;
//!
//! let pages = client.split_zip("report.pdf", &[[0, 1], [1, 2]])?;
//! extract_zip(&pages, "output/")?;
//!
//! let mut metadata = BTreeMap::new();
//! metadata.insert("Title".to_string(), "Quarterly report".to_string());
//! let pdf = client.edit_metadata("report.pdf", &metadata)?;
//! client.save(pdf, "output/report.pdf")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Client configuration and defaults
//! - [`client`] - One method per remote operation
//! - [`input`] - File inputs (paths or in-memory bytes)
//! - [`multipart`] - Multipart upload requests
//! - [`output`] - Saving results to disk
//! - [`archive`] - Extracting zip archives
//! - [`error`] - Error types

pub mod archive;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod multipart;
pub mod output;

pub use archive::extract_zip;
pub use client::PdfClient;
pub use config::{
    ClientConfig, ClientConfigBuilder, AUTH_HEADER, DEFAULT_API_VERSION, DEFAULT_BASE_URL,
    SUPPORTED_IMAGE_FORMATS,
};
pub use error::{FastPdfError, Result, ServiceError};
pub use input::{FileContent, FileInput};
pub use multipart::Upload;
pub use output::save;

/// Current version of fastpdf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
