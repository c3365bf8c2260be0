//! JSON output formatting.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use iconsmith_core::{AssetFormat, ColorVariant, GeneratedAsset, VariantSpec};
use iconsmith_ico::{IconDirEntry, png_width};
use iconsmith_pipeline::FaviconSet;
use serde::{Serialize, Serializer};

// ============================================================================
// Output Types
// ============================================================================

/// One written file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetOutput {
    pub id: String,
    pub filename: String,
    pub format: AssetFormat,
    pub color: ColorVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    pub media_type: &'static str,
    pub bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl AssetOutput {
    /// Builds the record for `asset`, written to `path` if given.
    pub fn new(asset: &GeneratedAsset, path: Option<&Path>) -> Self {
        Self {
            id: asset.id().to_string(),
            filename: asset.filename().to_string(),
            format: asset.format(),
            color: asset.spec.color,
            size: asset.spec.raster_size(),
            media_type: asset.media_type(),
            bytes: asset.len(),
            path: path.map(|p| p.display().to_string()),
        }
    }
}

/// Result of the generate command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub out_dir: String,
    pub assets: Vec<AssetOutput>,
    pub rasterized: Vec<u32>,
    pub total_bytes: usize,
    pub duration_ms: u64,
    #[serde(serialize_with = "serialize_datetime")]
    pub generated_at: DateTime<Utc>,
}

impl GenerateOutput {
    /// Builds the record for `set`; `written` pairs with `set.all()`.
    pub fn new(set: &FaviconSet, out_dir: &Path, written: &[PathBuf]) -> Self {
        let assets = set
            .all()
            .enumerate()
            .map(|(i, asset)| AssetOutput::new(asset, written.get(i).map(PathBuf::as_path)))
            .collect();

        Self {
            out_dir: out_dir.display().to_string(),
            assets,
            rasterized: set.attempts.iter().map(|a| a.size).collect(),
            total_bytes: set.total_bytes(),
            duration_ms: u64::try_from(set.duration.as_millis()).unwrap_or(u64::MAX),
            generated_at: set.generated_at,
        }
    }
}

/// One configured variant.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOutput {
    pub id: String,
    pub filename: String,
    pub format: AssetFormat,
    pub color: ColorVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
}

impl From<&VariantSpec> for VariantOutput {
    fn from(spec: &VariantSpec) -> Self {
        Self {
            id: spec.id.clone(),
            filename: spec.filename.clone(),
            format: spec.format,
            color: spec.color,
            size: spec.raster_size(),
            label: spec.label.clone(),
        }
    }
}

/// One ICO directory entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryOutput {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub bit_count: u16,
    pub planes: u16,
    pub bytes: u32,
    pub offset: u32,
    /// Width declared by the embedded PNG, if readable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub png_width: Option<u32>,
}

/// Result of the inspect command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectOutput {
    pub file: String,
    pub file_bytes: usize,
    pub images: usize,
    pub entries: Vec<EntryOutput>,
}

impl InspectOutput {
    /// Builds the record from a parsed directory and the file it came from.
    pub fn new(path: &Path, bytes: &[u8], entries: &[IconDirEntry]) -> Self {
        let entries = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let start = entry.image_offset as usize;
                let end = start + entry.bytes_in_res as usize;
                EntryOutput {
                    index,
                    width: entry.pixel_width(),
                    height: entry.pixel_height(),
                    bit_count: entry.bit_count,
                    planes: entry.planes,
                    bytes: entry.bytes_in_res,
                    offset: entry.image_offset,
                    png_width: bytes.get(start..end).and_then(png_width),
                }
            })
            .collect::<Vec<_>>();

        Self {
            file: path.display().to_string(),
            file_bytes: bytes.len(),
            images: entries.len(),
            entries,
        }
    }
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let output = formatter.format(&serde_json::json!({"a": 1})).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(output, r#"{"a":1}"#);
    }
}
