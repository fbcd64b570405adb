//! # haodoo
//!
//! Reader for HaoDoo (好讀) PDB and uPDB e-books, with EPUB and OEB output.
//!
//! HaoDoo books are Palm databases tagged `BOOKMTIT` (Big5 text) or
//! `BOOKMTIU` (UTF-16LE text). The first record names the book and its
//! chapters; each later record holds one chapter, written for vertical
//! reading. Conversion swaps vertical punctuation for horizontal forms,
//! detects chapter headings, and packages the result.
//!
//! ## Quick Start
//!
//! ```no_run
//! use haodoo::{read_haodoo, write_epub, write_oeb_dir};
//!
//! let book = read_haodoo("book.updb")?;
//! write_epub(&book, "book.epub")?;
//! write_oeb_dir(&book, "book-oeb")?;
//! # Ok::<(), haodoo::Error>(())
//! ```
//!
//! ## Decoding policy
//!
//! Malformed bytes are replaced with U+FFFD by default (the Unicode book
//! title drops them instead). Pass a [`DecodePolicy`] through
//! [`ReadOptions`] to change that per decode site:
//!
//! ```no_run
//! use std::sync::Arc;
//! use haodoo::{DecodePolicy, HaodooReader, ReadOptions};
//! use haodoo::io::FileSource;
//!
//! let source = Arc::new(FileSource::open("book.pdb")?);
//! let options = ReadOptions::default().with_policy(DecodePolicy::strict());
//! let reader = HaodooReader::from_source(source, options)?;
//! for chapter in reader.document()?.chapters {
//!     println!("{}", chapter.title);
//! }
//! # Ok::<(), haodoo::Error>(())
//! ```

use std::path::Path;

pub mod book;
pub mod error;
pub mod export;
pub mod format;
pub mod io;
pub mod pdb;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use book::{Book, Metadata, Resource, SpineItem, TocEntry};
pub use error::{Error, Result};
pub use export::{EpubConfig, EpubExporter, Exporter, epub_bytes, write_epub, write_oeb_dir};
pub use format::{
    Block, Chapter, DecodeMode, DecodePolicy, Document, HaodooReader, HeaderRecord, ReadOptions,
    Variant,
};

/// Read a HaoDoo book file into a [`Book`].
pub fn read_haodoo(path: impl AsRef<Path>) -> Result<Book> {
    HaodooReader::open(path)?.to_book()
}

/// Convert a HaoDoo book held in memory to EPUB bytes.
pub fn haodoo_bytes_to_epub(data: Vec<u8>) -> Result<Vec<u8>> {
    let book = HaodooReader::from_bytes(data)?.to_book()?;
    epub_bytes(&book)
}
