//! ICO container encoding.

use iconsmith_core::RasterImage;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::IcoError;
use crate::header::{PNG_MIN_HEADER_LEN, png_width};

// ============================================================================
// Constants
// ============================================================================

/// Size of the ICONDIR header.
pub const HEADER_SIZE: usize = 6;

/// Size of one ICONDIRENTRY.
pub const ENTRY_SIZE: usize = 16;

/// Resource type for icons (cursors use 2).
pub const ICON_TYPE: u16 = 1;

/// Color planes written for every entry.
pub const PLANES: u16 = 1;

/// Bit depth written for every entry. Payloads are 32-bit RGBA PNGs.
pub const BIT_COUNT: u16 = 32;

// ============================================================================
// Directory Entry
// ============================================================================

/// One 16-byte directory entry describing an embedded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconDirEntry {
    /// Width byte; 0 encodes 256.
    pub width: u8,
    /// Height byte; 0 encodes 256.
    pub height: u8,
    /// Palette size; 0 for true-color images.
    pub color_count: u8,
    /// Always 0.
    pub reserved: u8,
    /// Color planes.
    pub planes: u16,
    /// Bits per pixel.
    pub bit_count: u16,
    /// Payload length in bytes.
    pub bytes_in_res: u32,
    /// Payload offset from the start of the container.
    pub image_offset: u32,
}

impl IconDirEntry {
    /// Creates an entry for a square PNG payload.
    pub fn for_png(width: u32, len: u32, offset: u32) -> Self {
        let dimension = dimension_byte(width);
        Self {
            width: dimension,
            height: dimension,
            color_count: 0,
            reserved: 0,
            planes: PLANES,
            bit_count: BIT_COUNT,
            bytes_in_res: len,
            image_offset: offset,
        }
    }

    /// Width in pixels, decoding 0 as 256.
    pub fn pixel_width(&self) -> u32 {
        if self.width == 0 { 256 } else { u32::from(self.width) }
    }

    /// Height in pixels, decoding 0 as 256.
    pub fn pixel_height(&self) -> u32 {
        if self.height == 0 { 256 } else { u32::from(self.height) }
    }

    /// Serializes the entry in wire order.
    pub fn to_bytes(&self) -> [u8; ENTRY_SIZE] {
        let mut out = [0u8; ENTRY_SIZE];
        out[0] = self.width;
        out[1] = self.height;
        out[2] = self.color_count;
        out[3] = self.reserved;
        out[4..6].copy_from_slice(&self.planes.to_le_bytes());
        out[6..8].copy_from_slice(&self.bit_count.to_le_bytes());
        out[8..12].copy_from_slice(&self.bytes_in_res.to_le_bytes());
        out[12..16].copy_from_slice(&self.image_offset.to_le_bytes());
        out
    }

    /// Parses an entry from its 16 wire bytes.
    pub fn from_bytes(bytes: &[u8; ENTRY_SIZE]) -> Self {
        Self {
            width: bytes[0],
            height: bytes[1],
            color_count: bytes[2],
            reserved: bytes[3],
            planes: u16::from_le_bytes([bytes[4], bytes[5]]),
            bit_count: u16::from_le_bytes([bytes[6], bytes[7]]),
            bytes_in_res: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            image_offset: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        }
    }
}

/// 256 is stored as 0; anything else keeps its low byte.
#[allow(clippy::cast_possible_truncation)]
fn dimension_byte(pixels: u32) -> u8 {
    if pixels == 256 { 0 } else { pixels as u8 }
}

// ============================================================================
// Icon Container
// ============================================================================

/// An encoded ICO file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconContainer {
    bytes: Vec<u8>,
    entries: Vec<IconDirEntry>,
}

impl IconContainer {
    /// The complete file contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the container, returning the file contents.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Directory entries in image order.
    pub fn entries(&self) -> &[IconDirEntry] {
        &self.entries
    }

    /// Number of embedded images.
    pub fn image_count(&self) -> usize {
        self.entries.len()
    }

    /// Total length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a successfully encoded container.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ============================================================================
// Encoder
// ============================================================================

/// Encodes PNG raster images into one ICO container, preserving input order.
///
/// Each image's width is read from its PNG header rather than from
/// [`RasterImage::size`], so the directory describes what was actually
/// produced. Payloads are copied verbatim.
#[instrument(skip(images), fields(count = images.len()))]
pub fn encode_icon_container(images: &[RasterImage]) -> Result<IconContainer, IcoError> {
    if images.is_empty() {
        return Err(IcoError::EmptyInput);
    }

    let count = u16::try_from(images.len()).map_err(|_| IcoError::TooManyImages(images.len()))?;
    let directory_size = HEADER_SIZE + ENTRY_SIZE * images.len();

    let payload_total: u64 = images.iter().map(|img| img.len() as u64).sum();
    let total = directory_size as u64 + payload_total;
    if total > u64::from(u32::MAX) {
        return Err(IcoError::PayloadTooLarge(total));
    }

    let mut entries = Vec::with_capacity(images.len());
    let mut offset = directory_size;
    for (index, image) in images.iter().enumerate() {
        let width = png_width(image.bytes()).ok_or(IcoError::UnreadableDimensions {
            index,
            len: image.len(),
            needed: PNG_MIN_HEADER_LEN,
        })?;

        if width != image.size() {
            debug!(index, declared = image.size(), actual = width, "PNG width differs from requested size");
        }

        // Both fit: the total was checked against u32::MAX above
        let len = u32::try_from(image.len()).map_err(|_| IcoError::PayloadTooLarge(total))?;
        let entry_offset = u32::try_from(offset).map_err(|_| IcoError::PayloadTooLarge(total))?;

        entries.push(IconDirEntry::for_png(width, len, entry_offset));
        offset += image.len();
    }

    let mut bytes = Vec::with_capacity(offset);
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&ICON_TYPE.to_le_bytes());
    bytes.extend_from_slice(&count.to_le_bytes());
    for entry in &entries {
        bytes.extend_from_slice(&entry.to_bytes());
    }
    for image in images {
        bytes.extend_from_slice(image.bytes());
    }

    debug!(bytes = bytes.len(), "Encoded icon container");
    Ok(IconContainer { bytes, entries })
}

// ============================================================================
// Tests
// ============================================================================
