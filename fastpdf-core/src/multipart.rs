//! Multipart upload requests
//!
//! An [`Upload`] describes one file part plus any number of plain form fields.
//! [`post_multipart`] encodes it, copies the client headers onto the request and
//! returns the raw response body when the service answers `200 OK`.

use std::collections::BTreeMap;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::{Result, ServiceError};
use crate::input::FileContent;

/// Form field carrying the uploaded file
pub const FILE_FIELD: &str = "file";

/// A single file upload with its auxiliary form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub field_name: String,
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: String,
    pub fields: BTreeMap<String, String>,
}

impl Upload {
    pub fn new(field_name: impl Into<String>, file: FileContent) -> Self {
        Self {
            field_name: field_name.into(),
            filename: file.filename,
            content: file.content,
            content_type: file.content_type,
            fields: BTreeMap::new(),
        }
    }

    /// Adds a form field. A later value for the same key replaces the earlier one.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Encodes the file part followed by every form field.
    pub fn into_form(self) -> Result<Form> {
        let part = Part::bytes(self.content)
            .file_name(self.filename)
            .mime_str(&self.content_type)?;

        let mut form = Form::new().part(self.field_name, part);
        for (key, value) in self.fields {
            form = form.text(key, value);
        }
        Ok(form)
    }
}

/// Sends `upload` as a `multipart/form-data` POST to `url`.
///
/// Every header in `headers` is copied onto the request except `Content-Type`,
/// which carries the multipart boundary. Only `200 OK` counts as success; any
/// other status is drained into a [`ServiceError`].
pub fn post_multipart(
    http: &Client,
    url: &str,
    headers: &HeaderMap,
    upload: Upload,
) -> Result<Vec<u8>> {
    debug!(
        url,
        field = %upload.field_name,
        filename = %upload.filename,
        size = upload.content.len(),
        fields = upload.fields.len(),
        "Uploading file"
    );

    let form = upload.into_form()?;
    let mut request = http.post(url).multipart(form);
    for (name, value) in headers.iter() {
        if name == CONTENT_TYPE {
            continue;
        }
        request = request.header(name, value);
    }

    let response = request.send()?;
    let status = response.status();
    debug!(url, status = status.as_u16(), "Received response");

    if status != StatusCode::OK {
        let err = ServiceError::from_response(response);
        warn!(url, status = err.status_code, "Upload rejected by service");
        return Err(err.into());
    }

    Ok(response.bytes()?.to_vec())
}
