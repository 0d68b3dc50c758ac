//! Unpacking zip archives returned by the service

use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use crate::error::{FastPdfError, Result};

/// Extracts every entry of the zip archive in `bytes` under `destination`.
///
/// Directory entries are created with their parents. File entries are created
/// or truncated, along with any missing parent directory. The first failure
/// aborts extraction; entries written before it are left in place.
pub fn extract_zip(bytes: &[u8], destination: impl AsRef<Path>) -> Result<()> {
    let destination = destination.as_ref();
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let relative = entry.enclosed_name().ok_or_else(|| {
            FastPdfError::UnsupportedInput(format!(
                "archive entry '{}' escapes the destination directory",
                entry.name()
            ))
        })?;
        let target = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&target)?;
        let written = io::copy(&mut entry, &mut file)?;
        debug!(path = %target.display(), size = written, "Extracted archive entry");
    }

    Ok(())
}
