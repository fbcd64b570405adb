//! Header record (section 0) of a HaoDoo book.
//!
//! Layout, after optional leading whitespace:
//!
//! ```text
//! title ESC ESC ESC count ESC chapter-title ESC chapter-title ...   (legacy)
//! title ESC ESC ESC count ESC chapter-title CRLF chapter-title ...  (unicode)
//! ```
//!
//! `ESC` is `1B` in legacy books and the code unit `1B 00` in Unicode books,
//! where `CRLF` is `0D 00 0A 00`. The tripled escape after the title is
//! collapsed before splitting; some encoders emit it between other fields too.

use bstr::ByteSlice;
use log::debug;
use memchr::memmem;

use crate::error::{Error, Result};

use super::decode::{DecodePolicy, decode_padded};
use super::punct;
use super::variant::Variant;

/// Title, chapter count and chapter titles from section 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    pub title: String,
    /// Number of text sections (chapters), stored as decimal text.
    pub num_records: usize,
    /// `chapter_titles[i - 1]` names chapter `i`. May be longer than
    /// `num_records`; shorter is an error once the missing chapter is read.
    pub chapter_titles: Vec<String>,
    /// Malformed sequences replaced or dropped while decoding the titles.
    pub malformed: usize,
}

impl HeaderRecord {
    pub fn parse(raw: &[u8], variant: Variant, policy: &DecodePolicy) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidHeader {
            ident: variant.ident()[..].to_str_lossy().into_owned(),
            reason,
        };

        let collapsed = trim_leading_whitespace(raw)
            .replace(variant.tripled_delimiter(), variant.delimiter());
        let fields = split_on(&collapsed, variant.delimiter());
        debug!("Header record: {} fields", fields.len());

        let encoding = variant.encoding();
        let title = decode_padded(fields[0], encoding, policy.title, "book title")?;
        let mut malformed = title.malformed;
        let title = punct::normalize(&title.text).into_owned();

        let count_field = fields
            .get(1)
            .ok_or_else(|| invalid("missing record count field".into()))?;
        let num_records = parse_record_count(count_field).ok_or_else(|| {
            invalid(format!(
                "record count {:?} is not a decimal number",
                count_field.as_bstr()
            ))
        })?;

        let raw_titles: Vec<&[u8]> = match variant.chapter_separator() {
            None => fields.get(2..).map(<[_]>::to_vec).unwrap_or_default(),
            Some(separator) => fields
                .get(2)
                .map(|field| split_on(field, separator))
                .unwrap_or_default(),
        };

        let mut chapter_titles = Vec::with_capacity(raw_titles.len());
        for bytes in raw_titles {
            let decoded = decode_padded(bytes, encoding, policy.chapter_titles, "chapter title")?;
            malformed += decoded.malformed;
            chapter_titles.push(punct::normalize(&decoded.text).into_owned());
        }

        if chapter_titles.len() < num_records {
            debug!(
                "Header declares {num_records} chapters but names {}",
                chapter_titles.len()
            );
        }

        Ok(Self {
            title,
            num_records,
            chapter_titles,
            malformed,
        })
    }

    /// Title of chapter `chapter` (1-based).
    pub fn chapter_title(&self, chapter: usize) -> Result<&str> {
        chapter
            .checked_sub(1)
            .and_then(|i| self.chapter_titles.get(i))
            .map(String::as_str)
            .ok_or(Error::MissingChapterTitle {
                chapter,
                available: self.chapter_titles.len(),
            })
    }
}

/// Strip leading ASCII whitespace bytes (space, tab, LF, VT, FF, CR).
fn trim_leading_whitespace(raw: &[u8]) -> &[u8] {
    let start = raw
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r'))
        .unwrap_or(raw.len());
    &raw[start..]
}

/// Split on every non-overlapping occurrence of `delimiter`, keeping empty fields.
fn split_on<'a>(haystack: &'a [u8], delimiter: &[u8]) -> Vec<&'a [u8]> {
    let mut fields = Vec::new();
    let mut start = 0;
    for pos in memmem::find_iter(haystack, delimiter) {
        fields.push(&haystack[start..pos]);
        start = pos + delimiter.len();
    }
    fields.push(&haystack[start..]);
    fields
}

/// Parse the decimal chapter count.
///
/// NUL bytes are skipped so both ASCII and UTF-16LE digits are accepted.
fn parse_record_count(field: &[u8]) -> Option<usize> {
    let digits: Vec<u8> = field.iter().copied().filter(|&b| b != 0).collect();
    let digits = digits.trim_with(|c| c.is_ascii_whitespace());
    let digits = digits.strip_prefix(b"+").unwrap_or(digits);
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    digits.to_str().ok()?.parse().ok()
}
