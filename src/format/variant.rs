use encoding_rs::{BIG5, Encoding, UTF_16LE};

use crate::error::{Error, Result};

use super::decode::{DecodeMode, DecodePolicy};

/// PDB type/creator of a legacy (Big5) HaoDoo book.
pub const LEGACY_IDENT: &[u8; 8] = b"BOOKMTIT";
/// PDB type/creator of a Unicode (UTF-16LE) HaoDoo book.
pub const UNICODE_IDENT: &[u8; 8] = b"BOOKMTIU";

/// Layout and encoding convention of a HaoDoo book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// `.pdb`: Big5 (CP950) text, single escape byte between header fields.
    Legacy,
    /// `.updb`: UTF-16LE text, escape code unit between header fields.
    Unicode,
}

impl Variant {
    /// Select the variant from the PDB identifier.
    pub fn from_ident(ident: &[u8]) -> Result<Self> {
        if ident == LEGACY_IDENT {
            Ok(Variant::Legacy)
        } else if ident == UNICODE_IDENT {
            Ok(Variant::Unicode)
        } else {
            Err(Error::UnsupportedFormat {
                ident: String::from_utf8_lossy(ident).into_owned(),
            })
        }
    }

    pub fn ident(self) -> &'static [u8; 8] {
        match self {
            Variant::Legacy => LEGACY_IDENT,
            Variant::Unicode => UNICODE_IDENT,
        }
    }

    pub fn encoding(self) -> &'static Encoding {
        match self {
            Variant::Legacy => BIG5,
            Variant::Unicode => UTF_16LE,
        }
    }

    /// Header field delimiter.
    pub fn delimiter(self) -> &'static [u8] {
        match self {
            Variant::Legacy => b"\x1b",
            Variant::Unicode => b"\x1b\x00",
        }
    }

    /// The delimiter repeated three times, collapsed to one before splitting.
    pub fn tripled_delimiter(self) -> &'static [u8] {
        match self {
            Variant::Legacy => b"\x1b\x1b\x1b",
            Variant::Unicode => b"\x1b\x00\x1b\x00\x1b\x00",
        }
    }

    /// Separator between chapter titles inside the third header field.
    ///
    /// `None` for legacy books, where every field after the record count is a title.
    pub fn chapter_separator(self) -> Option<&'static [u8]> {
        match self {
            Variant::Legacy => None,
            Variant::Unicode => Some(b"\r\x00\n\x00"),
        }
    }

    /// Decode modes used when the caller does not choose any.
    ///
    /// Unicode titles drop undecodable bytes; everything else substitutes U+FFFD.
    pub fn default_policy(self) -> DecodePolicy {
        match self {
            Variant::Legacy => DecodePolicy::uniform(DecodeMode::Substitute),
            Variant::Unicode => DecodePolicy {
                title: DecodeMode::DropInvalid,
                ..DecodePolicy::uniform(DecodeMode::Substitute)
            },
        }
    }
}
