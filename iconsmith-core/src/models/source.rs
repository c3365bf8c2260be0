//! Vector image input.

use std::fmt;
use std::sync::Arc;

/// SVG markup supplied by the caller for one generation pass.
///
/// The text is opaque to everything except the rasterizer. Cloning is cheap,
/// so a pass can hand the same source to concurrent render tasks.
#[derive(Clone, PartialEq, Eq)]
pub struct VectorSource {
    text: Arc<str>,
}

impl VectorSource {
    /// Wraps markup text.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the markup as text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the markup as UTF-8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Length of the markup in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the markup is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<String> for VectorSource {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for VectorSource {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

// Sources can be large; only show the size.
impl fmt::Debug for VectorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorSource")
            .field("len", &self.text.len())
            .finish()
    }
}
