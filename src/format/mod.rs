//! HaoDoo (好讀) PDB and uPDB e-books.
//!
//! A HaoDoo book is a Palm database whose first record holds the book title,
//! the chapter count and the chapter titles; every following record holds
//! the text of one chapter. Legacy `.pdb` books are Big5, `.updb` books are
//! UTF-16LE.

pub mod content;
mod cp950;
pub mod decode;
pub mod header;
pub mod metadata;
pub mod punct;
mod reader;
mod variant;

pub use content::{Block, Chapter, Document};
pub use decode::{DecodeMode, DecodePolicy, Decoded};
pub use header::HeaderRecord;
pub use reader::{CONTENT_HREF, HaodooReader, ReadOptions};
pub use variant::{LEGACY_IDENT, UNICODE_IDENT, Variant};
