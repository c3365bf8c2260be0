//! PNG header width recovery.
//!
//! The container encoder does not trust the size tracked next to a raster
//! image; it reads the width the PNG itself declares. That couples this crate
//! to the PNG layout:
//!
//! ```text
//! 0..8    signature   89 50 4E 47 0D 0A 1A 0A
//! 8..12   IHDR length (always 13)
//! 12..16  "IHDR"
//! 16..20  width       big-endian u32
//! 20..24  height      big-endian u32
//! ```
//!
//! Any change to how rasters are encoded must keep IHDR as the first chunk.

/// Byte offset of the IHDR width field.
pub const PNG_WIDTH_OFFSET: usize = 16;

/// Minimum payload length needed to read the width field.
pub const PNG_MIN_HEADER_LEN: usize = PNG_WIDTH_OFFSET + 4;

/// Reads the big-endian width at byte offset 16, or `None` if the payload is
/// too short.
pub fn png_width(payload: &[u8]) -> Option<u32> {
    let field = payload.get(PNG_WIDTH_OFFSET..PNG_MIN_HEADER_LEN)?;
    Some(u32::from_be_bytes([field[0], field[1], field[2], field[3]]))
}
