//! Open eBook directory output: the content documents plus `metadata.opf`.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::book::Book;
use crate::error::{Error, Result};

use super::opf::package_document;
use super::write_atomic;

pub const METADATA_OPF: &str = "metadata.opf";

/// Write every resource of `book` into `dir`, then `metadata.opf`.
///
/// The package document is written last, so a directory with a
/// `metadata.opf` always holds the files it lists.
pub fn write_oeb_dir(book: &Book, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    for (href, resource) in &book.resources {
        if href.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("resource href {href:?} escapes the output directory"),
            )));
        }
        let path = dir.join(href);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        write_atomic(&path, |file| Ok(file.write_all(&resource.data)?))?;
    }

    let opf = package_document(book, false);
    write_atomic(&dir.join(METADATA_OPF), |file| Ok(file.write_all(opf.as_bytes())?))?;

    info!(
        "Wrote {} files to {}",
        book.resources.len() + 1,
        dir.display()
    );
    Ok(())
}
