//! Finished output files.

use std::fmt;
use std::sync::Arc;

use super::variant::{AssetFormat, VariantSpec};

/// One generated file, ready for the packaging layer.
#[derive(Clone)]
pub struct GeneratedAsset {
    /// The variant this asset satisfies.
    pub spec: VariantSpec,
    /// Encoded file contents.
    pub bytes: Arc<[u8]>,
}

impl GeneratedAsset {
    /// Creates an asset.
    pub fn new(spec: VariantSpec, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            spec,
            bytes: bytes.into(),
        }
    }

    /// The variant id.
    pub fn id(&self) -> &str {
        &self.spec.id
    }

    /// The output file name.
    pub fn filename(&self) -> &str {
        &self.spec.filename
    }

    /// The output format.
    pub fn format(&self) -> AssetFormat {
        self.spec.format
    }

    /// MIME type of the contents.
    pub fn media_type(&self) -> &'static str {
        self.spec.format.media_type()
    }

    /// Contents length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if there are no contents.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The `(filename, bytes)` pair consumed by file writers and archivers.
    pub fn as_file(&self) -> (&str, &[u8]) {
        (&self.spec.filename, &self.bytes)
    }
}

impl fmt::Debug for GeneratedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedAsset")
            .field("id", &self.spec.id)
            .field("filename", &self.spec.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}
