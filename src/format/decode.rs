//! Text decoding with an explicit policy for malformed input.
//!
//! HaoDoo books are lenient about encoding errors: most decode sites replace
//! bad bytes with U+FFFD while the Unicode book title silently drops them.
//! Instead of baking that into each call, every site names a [`DecodeMode`]
//! and a [`DecodePolicy`] groups the modes for one conversion.

use encoding_rs::{BIG5, DecoderResult, Encoding};
use log::warn;

use crate::error::{Error, Result};

use super::cp950;

/// What to do with a malformed byte sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DecodeMode {
    /// Stop with [`Error::Decode`].
    FailFast,
    /// Insert U+FFFD.
    #[default]
    Substitute,
    /// Skip the bytes.
    DropInvalid,
}

/// Decode mode for each place a HaoDoo book is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodePolicy {
    /// Book title (header field 0).
    pub title: DecodeMode,
    /// Chapter titles in the header record.
    pub chapter_titles: DecodeMode,
    /// Chapter text sections.
    pub text: DecodeMode,
    /// Author field read from the raw stream.
    pub author: DecodeMode,
}

impl DecodePolicy {
    pub const fn uniform(mode: DecodeMode) -> Self {
        Self {
            title: mode,
            chapter_titles: mode,
            text: mode,
            author: mode,
        }
    }

    /// Reject any malformed input.
    pub const fn strict() -> Self {
        Self::uniform(DecodeMode::FailFast)
    }
}

impl Default for DecodePolicy {
    fn default() -> Self {
        Self::uniform(DecodeMode::Substitute)
    }
}

/// Decoded text plus the number of malformed sequences that were replaced or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub malformed: usize,
}

/// Decode `bytes` without BOM sniffing, handling malformed sequences per `mode`.
///
/// Big5 is read as code page 950: pairs in the ranges where cp950 and the
/// WHATWG table disagree are looked up in [`cp950`], everything else goes
/// through `encoding_rs`. `site` names the decode site in errors and warnings.
pub fn decode(
    bytes: &[u8],
    encoding: &'static Encoding,
    mode: DecodeMode,
    site: &'static str,
) -> Result<Decoded> {
    let mut sink = Sink {
        decoded: Decoded {
            text: String::with_capacity(bytes.len() * 2),
            malformed: 0,
        },
        encoding,
        mode,
        site,
    };

    if encoding == BIG5 {
        let mut start = 0;
        let mut i = 0;
        while i + 1 < bytes.len() {
            let (lead, trail) = (bytes[i], bytes[i + 1]);
            if !(0x81..=0xFE).contains(&lead) {
                i += 1;
                continue;
            }
            if !matches!(trail, 0x40..=0x7E | 0xA1..=0xFE) {
                // An ASCII trail is read again on its own.
                i += if trail < 0x80 { 1 } else { 2 };
                continue;
            }
            if cp950::is_override(lead, trail) {
                sink.decode_run(&bytes[start..i], start)?;
                match cp950::lookup(lead, trail) {
                    Some(c) => sink.decoded.text.push(c),
                    None => sink.malformed(i)?,
                }
                start = i + 2;
            }
            i += 2;
        }
        sink.decode_run(&bytes[start..], start)?;
    } else {
        sink.decode_run(bytes, 0)?;
    }

    let malformed = sink.decoded.malformed;
    if malformed > 0 {
        let action = match mode {
            DecodeMode::DropInvalid => "dropped",
            _ => "replaced",
        };
        warn!(
            "{site}: {action} {malformed} malformed {} sequence(s)",
            encoding.name()
        );
    }

    Ok(sink.decoded)
}

/// Decode and strip trailing NUL padding.
pub fn decode_padded(
    bytes: &[u8],
    encoding: &'static Encoding,
    mode: DecodeMode,
    site: &'static str,
) -> Result<Decoded> {
    let mut decoded = decode(bytes, encoding, mode, site)?;
    let trimmed = decoded.text.trim_end_matches('\0').len();
    decoded.text.truncate(trimmed);
    Ok(decoded)
}

struct Sink {
    decoded: Decoded,
    encoding: &'static Encoding,
    mode: DecodeMode,
    site: &'static str,
}

impl Sink {
    /// Count one malformed sequence starting at byte `offset`.
    fn malformed(&mut self, offset: usize) -> Result<()> {
        self.decoded.malformed += 1;
        match self.mode {
            DecodeMode::FailFast => Err(Error::Decode {
                site: self.site,
                encoding: self.encoding.name(),
                offset,
            }),
            DecodeMode::Substitute => {
                self.decoded.text.push('\u{FFFD}');
                Ok(())
            }
            DecodeMode::DropInvalid => Ok(()),
        }
    }

    /// Run `bytes`, found at `base` in the input, through a fresh decoder.
    fn decode_run(&mut self, bytes: &[u8], base: usize) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        let mut decoder = self.encoding.new_decoder_without_bom_handling();
        let mut consumed = 0;

        loop {
            let remaining = bytes.len() - consumed;
            self.decoded.text.reserve(
                decoder
                    .max_utf8_buffer_length_without_replacement(remaining)
                    .unwrap_or(remaining * 3)
                    .max(4),
            );
            let (result, read) = decoder.decode_to_string_without_replacement(
                &bytes[consumed..],
                &mut self.decoded.text,
                true,
            );
            consumed += read;

            match result {
                DecoderResult::InputEmpty => return Ok(()),
                DecoderResult::OutputFull => {}
                DecoderResult::Malformed(bad, after) => {
                    let offset = base + consumed.saturating_sub(bad as usize + after as usize);
                    self.malformed(offset)?;
                }
            }
        }
    }
}
