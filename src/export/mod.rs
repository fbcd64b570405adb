//! Writing books out.
//!
//! The `Exporter` trait uses a builder pattern:
//! - `new()` creates an exporter with default configuration
//! - `with_config()` allows customization
//! - `export()` writes to any `Write + Seek` destination
//!
//! File writers go through a temporary file in the destination directory
//! that is persisted only after it is complete, so a failed conversion
//! leaves nothing behind.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::book::Book;
use crate::error::Result;

mod epub;
pub mod html;
mod oeb;
mod opf;

pub use epub::{EpubConfig, EpubExporter, epub_bytes, write_epub};
pub use oeb::{METADATA_OPF, write_oeb_dir};
pub use opf::package_document;

/// Trait for exporting books to specific formats.
pub trait Exporter {
    /// Export the book to the provided writer.
    ///
    /// The writer can be a `std::fs::File`, a `std::io::Cursor<Vec<u8>>`, or
    /// anything else implementing `Write + Seek`.
    fn export<W: Write + Seek>(&self, book: &Book, writer: &mut W) -> Result<()>;
}

/// Write `path` through a sibling temporary file.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file_mut().flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!("Wrote {}", path.display());
    Ok(())
}
