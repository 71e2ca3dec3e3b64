//! Release archive extraction
//!
//! A release is a gzip-compressed tarball containing exactly one entry: the
//! executable itself. Extraction runs entirely in memory; neither the
//! compressed archive nor the intermediate tar stream touches disk.

use std::io::{Cursor, Read};

use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::{Result, UpdateError};
use crate::platform::EXECUTABLE_NAME;

/// Extract the executable payload from a release archive
///
/// The first entry whose name is not the expected executable is a fatal
/// archive-integrity error; there is no skip-and-continue.
pub fn extract(archive: &[u8]) -> Result<Vec<u8>> {
    extract_named(archive, EXECUTABLE_NAME)
}

/// Extract a single expected entry by name
pub fn extract_named(archive: &[u8], expected: &str) -> Result<Vec<u8>> {
    let decoder = GzDecoder::new(Cursor::new(archive));
    let mut tar = tar::Archive::new(decoder);

    let entries = tar
        .entries()
        .map_err(|e| UpdateError::MalformedArchive(e.to_string()))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| UpdateError::MalformedArchive(e.to_string()))?;

        let name = entry
            .path()
            .map_err(|e| UpdateError::MalformedArchive(e.to_string()))?
            .to_string_lossy()
            .into_owned();

        if name != expected {
            return Err(UpdateError::UnexpectedEntry { name });
        }

        // The header size is untrusted; cap the preallocation at the
        // compressed input length and let read_to_end grow past it.
        let size = entry.size();
        let mut payload = Vec::with_capacity(size.min(archive.len() as u64) as usize);
        entry
            .read_to_end(&mut payload)
            .map_err(|e| UpdateError::MalformedArchive(e.to_string()))?;

        if payload.len() as u64 != size {
            return Err(UpdateError::MalformedArchive(format!(
                "entry {} truncated ({} of {} bytes)",
                name,
                payload.len(),
                size
            )));
        }

        debug!("extracted {} ({} bytes)", name, payload.len());
        return Ok(payload);
    }

    Err(UpdateError::MalformedArchive(
        "archive contains no entries".to_string(),
    ))
}
