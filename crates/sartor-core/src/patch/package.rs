//! Zip container access for the document package.
//!
//! The package is inflated once into memory, edited through
//! [`DocumentPackage::with_body`], and deflated into a fresh archive.
//! Every part except the primary markup part is carried over byte for byte.

use std::io::{Cursor, Read, Write};

use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::errors::TailorError;

/// Candidate names for the primary markup part, checked in order.
pub(crate) const BODY_PARTS: &[&str] = &["word/document.xml"];

#[derive(Debug)]
pub(crate) struct PackageEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A fully inflated package. Entry order matches the source archive so the
/// rewritten zip lists its parts the way the original did.
#[derive(Debug)]
pub(crate) struct DocumentPackage {
    entries: Vec<PackageEntry>,
    body_index: usize,
}

impl DocumentPackage {
    pub fn open(bytes: &[u8]) -> Result<Self, TailorError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| TailorError::invalid_package(format!("unreadable zip archive: {e}")))?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| TailorError::invalid_package(format!("corrupt zip entry: {e}")))?;
            // Directory markers carry no content; readers recreate them
            // implicitly from file paths.
            if file.is_dir() {
                continue;
            }
            let mut content = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut content).map_err(|e| {
                TailorError::invalid_package(format!("unreadable zip entry {}: {e}", file.name()))
            })?;
            entries.push(PackageEntry {
                name: file.name().to_string(),
                bytes: content,
            });
        }

        let body_index = BODY_PARTS
            .iter()
            .find_map(|part| entries.iter().position(|e| e.name == *part))
            .ok_or_else(|| {
                TailorError::invalid_package(format!(
                    "no markup part found (looked for {})",
                    BODY_PARTS.join(", ")
                ))
            })?;

        Ok(DocumentPackage {
            entries,
            body_index,
        })
    }

    /// The primary markup part as text.
    pub fn body_str(&self) -> Result<&str, TailorError> {
        std::str::from_utf8(&self.entries[self.body_index].bytes)
            .map_err(|_| TailorError::invalid_package("markup part is not valid UTF-8"))
    }

    /// Rebuilds the archive with the markup part replaced by `body`.
    pub fn with_body(&self, body: &[u8]) -> Result<Vec<u8>, TailorError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();

        for (i, entry) in self.entries.iter().enumerate() {
            writer
                .start_file(entry.name.as_str(), options)
                .map_err(|e| {
                    TailorError::invalid_package(format!(
                        "failed to start entry {}: {e}",
                        entry.name
                    ))
                })?;
            let bytes = if i == self.body_index {
                body
            } else {
                entry.bytes.as_slice()
            };
            writer.write_all(bytes).map_err(|e| {
                TailorError::invalid_package(format!("failed to write entry {}: {e}", entry.name))
            })?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| TailorError::invalid_package(format!("failed to finish archive: {e}")))?;
        Ok(cursor.into_inner())
    }
}

/// Builds an in-memory archive from (name, content) pairs.
#[cfg(test)]
pub(crate) fn make_package(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
