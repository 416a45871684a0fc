use crate::models::{DecorationVariant, ImageData};
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::fs;
use std::sync::LazyLock;
use thiserror::Error;

/// Characters that may not appear in a filename written to disk
static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("Invalid filename regex"));

/// Everything the download collaborator needs to save one variant
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDescriptor {
    /// `decorated-room-<designStyle>-<variantId>.jpg`
    pub suggested_filename: String,
    pub image: ImageData,
    pub variant_id: String,
}

impl ExportDescriptor {
    pub fn for_variant(variant: &DecorationVariant) -> Self {
        Self {
            suggested_filename: suggested_filename(variant.design_style.as_str(), &variant.id),
            image: variant.image.clone(),
            variant_id: variant.id.clone(),
        }
    }
}

/// Build the download filename for a variant.
///
/// Style and id are kept verbatim; the sink decides what its storage accepts.
pub fn suggested_filename(design_style: &str, variant_id: &str) -> String {
    format!("decorated-room-{}-{}.jpg", design_style, variant_id)
}

/// Reduce a suggested filename to a single safe path component.
///
/// Runs of characters outside `[A-Za-z0-9._-]` become `-` and leading dots
/// are dropped, so the result never names a parent or hidden file.
pub fn safe_file_name(suggested: &str) -> String {
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(suggested.trim(), "-");
    let cleaned = cleaned.trim_start_matches(['.', '-']);
    if cleaned.is_empty() {
        "unnamed.jpg".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Errors raised while materializing an export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Variant {0} has no image data to export")]
    NothingToWrite(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The download collaborator: turns a descriptor into a file on the user's device
pub trait ExportSink: Send + Sync {
    fn materialize(&self, descriptor: &ExportDescriptor) -> Result<Utf8PathBuf, ExportError>;
}

/// Writes exports into a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FileExporter {
    dir: Utf8PathBuf,
}

impl FileExporter {
    pub fn new<P: AsRef<Utf8Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }
}

impl ExportSink for FileExporter {
    fn materialize(&self, descriptor: &ExportDescriptor) -> Result<Utf8PathBuf, ExportError> {
        if descriptor.image.is_empty() {
            return Err(ExportError::NothingToWrite(descriptor.variant_id.clone()));
        }

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|source| ExportError::Io {
                path: self.dir.clone(),
                source,
            })?;
        }

        let path = self.dir.join(safe_file_name(&descriptor.suggested_filename));
        fs::write(&path, descriptor.image.bytes()).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(
            "Exported variant {} ({} bytes) to {}",
            descriptor.variant_id,
            descriptor.image.len(),
            path
        );

        Ok(path)
    }
}
