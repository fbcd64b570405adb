//! Error types for haodoo operations.

use thiserror::Error;

/// Errors that can occur while decoding a HaoDoo book or writing its output.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid PDB: {0}")]
    InvalidPdb(String),

    /// The PDB identifier is neither `BOOKMTIT` nor `BOOKMTIU`.
    #[error("Unsupported format: {ident:?} is not a HaoDoo book")]
    UnsupportedFormat { ident: String },

    /// The header record (section 0) could not be split into its fields.
    #[error("Invalid header record in {ident:?} book: {reason}")]
    InvalidHeader { ident: String, reason: String },

    #[error("Section {index} out of range (container has {count} sections)")]
    SectionOutOfRange { index: usize, count: usize },

    /// The header declares more chapters than it names.
    #[error("Chapter {chapter} has no title (header lists {available} chapter titles)")]
    MissingChapterTitle { chapter: usize, available: usize },

    /// Malformed bytes under [`DecodeMode::FailFast`](crate::DecodeMode::FailFast).
    #[error("Malformed {encoding} in {site} at byte {offset}")]
    Decode {
        site: &'static str,
        encoding: &'static str,
        offset: usize,
    },
}

impl Error {
    /// True for errors caused by the input's structure rather than its content or the sink.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidPdb(_) | Error::UnsupportedFormat { .. } | Error::InvalidHeader { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
