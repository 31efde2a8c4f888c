//! Reading XML sources from disk.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{NavError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read a file into memory, enforcing `max_size`.
///
/// # Returns
/// * `Ok(bytes)` with the file contents
/// * `Err(NavError::NotFound)` if the path does not resolve
/// * `Err(NavError::TooLarge)` if the file exceeds `max_size`
/// * `Err(NavError::Io)` for any other read failure
pub fn read_file(path: &Path, max_size: u64) -> Result<Vec<u8>> {
    let metadata = fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.is_dir() {
        return Err(NavError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path is a directory"),
        });
    }
    if metadata.len() > max_size {
        return Err(NavError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: max_size,
        });
    }

    fs::read(path).map_err(|e| io_error(path, e))
}

/// Decode bytes as UTF-8, skipping a leading byte order mark.
///
/// # Arguments
/// * `bytes` - Raw file contents
/// * `source_name` - Label used in the error if decoding fails
pub fn decode_utf8<'a>(bytes: &'a [u8], source_name: &str) -> Result<&'a str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|source| NavError::Encoding {
        source_name: source_name.to_string(),
        source,
    })
}

fn io_error(path: &Path, source: io::Error) -> NavError {
    if source.kind() == io::ErrorKind::NotFound {
        NavError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        NavError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
