//! Writing service results to disk

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Mode applied to files created by [`save`] on Unix
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Writes `content` to `path`, or hands it back when `path` is empty.
///
/// A non-empty path is created or truncated and `Ok(None)` is returned. An
/// empty path touches nothing and returns `Ok(Some(content))`.
pub fn save(content: Vec<u8>, path: impl AsRef<Path>) -> Result<Option<Vec<u8>>> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Ok(Some(content));
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(&content)?;
    debug!(path = %path.display(), size = content.len(), "Saved content");
    Ok(None)
}
