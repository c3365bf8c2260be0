//! Reading the directory of an existing ICO file.

use crate::container::{ENTRY_SIZE, HEADER_SIZE, ICON_TYPE, IconDirEntry};
use crate::error::IcoError;

/// Parses the header and directory entries of ICO bytes.
///
/// Checks the magic bytes and that every entry's payload range lies inside
/// `bytes`. Payloads themselves are not decoded.
pub fn parse_icon_directory(bytes: &[u8]) -> Result<Vec<IconDirEntry>, IcoError> {
    if bytes.len() < HEADER_SIZE {
        return Err(IcoError::Malformed(format!(
            "{} bytes is shorter than the {HEADER_SIZE}-byte header",
            bytes.len()
        )));
    }

    let reserved = u16::from_le_bytes([bytes[0], bytes[1]]);
    let kind = u16::from_le_bytes([bytes[2], bytes[3]]);
    if reserved != 0 || kind != ICON_TYPE {
        return Err(IcoError::Malformed(format!(
            "bad magic: reserved={reserved} type={kind}"
        )));
    }

    let count = usize::from(u16::from_le_bytes([bytes[4], bytes[5]]));
    let directory_size = HEADER_SIZE + ENTRY_SIZE * count;
    if bytes.len() < directory_size {
        return Err(IcoError::Malformed(format!(
            "directory of {count} entries needs {directory_size} bytes, have {}",
            bytes.len()
        )));
    }

    let mut entries = Vec::with_capacity(count);
    for (index, chunk) in bytes[HEADER_SIZE..directory_size]
        .chunks_exact(ENTRY_SIZE)
        .enumerate()
    {
        let mut raw = [0u8; ENTRY_SIZE];
        raw.copy_from_slice(chunk);
        let entry = IconDirEntry::from_bytes(&raw);

        let end = u64::from(entry.image_offset) + u64::from(entry.bytes_in_res);
        if end > bytes.len() as u64 {
            return Err(IcoError::Malformed(format!(
                "entry {index} payload ends at {end}, past the {} byte file",
                bytes.len()
            )));
        }
        entries.push(entry);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_input() {
        assert!(matches!(
            parse_icon_directory(&[0, 0, 1]),
            Err(IcoError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_cursor_type() {
        assert!(matches!(
            parse_icon_directory(&[0, 0, 2, 0, 0, 0]),
            Err(IcoError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_truncated_directory() {
        assert!(matches!(
            parse_icon_directory(&[0, 0, 1, 0, 2, 0, 16, 16]),
            Err(IcoError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_payload_past_end() {
        let mut bytes = vec![0, 0, 1, 0, 1, 0];
        bytes.extend_from_slice(&IconDirEntry::for_png(16, 100, 22).to_bytes());
        bytes.extend_from_slice(&[0u8; 10]);

        assert!(matches!(
            parse_icon_directory(&bytes),
            Err(IcoError::Malformed(_))
        ));
    }

    #[test]
    fn test_zero_images() {
        assert!(parse_icon_directory(&[0, 0, 1, 0, 0, 0]).unwrap().is_empty());
    }
}
