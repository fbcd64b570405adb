//! Book metadata: title, author, language and a content-derived identifier.
//!
//! The author is not part of the header record. Books produced by version 2
//! of the HaoDoo encoder keep it in the first 35 bytes of the file, where a
//! PDB normally stores its database name, with the version in byte 35.

use log::debug;

use crate::book::Metadata;
use crate::error::Result;
use crate::io::ByteSource;

use super::decode::{DecodeMode, decode};
use super::variant::Variant;

pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const LANGUAGE: &str = "zh-TW";

/// Encoder version that stores the author in the name field.
const AUTHOR_VERSION: u8 = 2;
const VERSION_OFFSET: usize = 35;

const HASH_CHUNK: usize = 64 * 1024;

/// Read the author straight from the start of the stream.
///
/// Returns `"Unknown"` when the book predates author support, the stream is
/// too short, or the field is blank.
pub fn read_author(source: &dyn ByteSource, variant: Variant, mode: DecodeMode) -> Result<String> {
    let head = source.read_prefix(VERSION_OFFSET + 1)?;
    if head.get(VERSION_OFFSET) != Some(&AUTHOR_VERSION) {
        debug!("No author field (version byte {:?})", head.get(VERSION_OFFSET));
        return Ok(UNKNOWN_AUTHOR.to_string());
    }

    let mut field = head[..VERSION_OFFSET].to_vec();
    let len = field.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    field.truncate(len);
    // Stripping NULs can eat the high byte of the last UTF-16 code unit.
    if variant == Variant::Unicode && field.len() % 2 == 1 {
        field.push(0);
    }

    let decoded = decode(&field, variant.encoding(), mode, "author")?;
    let author = decoded.text.trim();
    if author.is_empty() {
        Ok(UNKNOWN_AUTHOR.to_string())
    } else {
        Ok(author.to_string())
    }
}

/// `urn:sha1:` identifier over the whole container.
pub fn content_identifier(source: &dyn ByteSource) -> Result<String> {
    let mut hasher = sha1_smol::Sha1::new();
    let len = source.len();
    let mut offset = 0u64;
    while offset < len {
        let chunk = (len - offset).min(HASH_CHUNK as u64) as usize;
        hasher.update(&source.read_at(offset, chunk)?);
        offset += chunk as u64;
    }
    Ok(format!("urn:sha1:{}", hasher.digest()))
}

/// Assemble the book metadata.
pub fn build_metadata(title: &str, author: String, identifier: String) -> Metadata {
    Metadata::new(title)
        .with_author(author)
        .with_language(LANGUAGE)
        .with_identifier(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemorySource;

    fn stream(name: &[u8], version: u8) -> MemorySource {
        let mut data = vec![0u8; 78];
        data[..name.len()].copy_from_slice(name);
        data[VERSION_OFFSET] = version;
        MemorySource::new(data)
    }

    #[test]
    fn test_author_version_2_legacy() {
        // "金庸" in Big5
        let source = stream(&[0xAA, 0xF7, 0xB1, 0x65], 2);
        let author = read_author(&source, Variant::Legacy, DecodeMode::FailFast).unwrap();
        assert_eq!(author, "金庸");
    }

    #[test]
    fn test_author_other_version_is_unknown() {
        let source = stream(b"Somebody", 1);
        let author = read_author(&source, Variant::Legacy, DecodeMode::Substitute).unwrap();
        assert_eq!(author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_author_short_stream_is_unknown() {
        let source = MemorySource::new(b"tiny".to_vec());
        let author = read_author(&source, Variant::Unicode, DecodeMode::Substitute).unwrap();
        assert_eq!(author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_author_blank_is_unknown() {
        let source = stream(b"   ", 2);
        let author = read_author(&source, Variant::Legacy, DecodeMode::Substitute).unwrap();
        assert_eq!(author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_author_unicode_restores_stripped_high_byte() {
        // "AB" in UTF-16LE; the trailing 0x00 of 'B' is lost with the padding.
        let source = stream(b"A\x00B\x00", 2);
        let author = read_author(&source, Variant::Unicode, DecodeMode::FailFast).unwrap();
        assert_eq!(author, "AB");
    }

    #[test]
    fn test_author_is_trimmed() {
        let source = stream(b" Lu Xun ", 2);
        let author = read_author(&source, Variant::Legacy, DecodeMode::Substitute).unwrap();
        assert_eq!(author, "Lu Xun");
    }

    #[test]
    fn test_content_identifier_is_stable() {
        let a = content_identifier(&MemorySource::new(b"abc".to_vec())).unwrap();
        let b = content_identifier(&MemorySource::new(b"abc".to_vec())).unwrap();
        assert_eq!(a, "urn:sha1:a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(a, b);
        let c = content_identifier(&MemorySource::new(b"abd".to_vec())).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_build_metadata() {
        let metadata = build_metadata("書", "Unknown".into(), "urn:sha1:0".into());
        assert_eq!(metadata.language, "zh-TW");
        assert_eq!(metadata.authors, vec!["Unknown"]);
    }
}
