//! EPUB exporter.
//!
//! Packages a [`Book`] as EPUB 2: an OPF package document, an NCX table of
//! contents and every resource under `OEBPS/`.

use std::fmt::Write as _;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::book::{Book, TocEntry};
use crate::error::Result;

use super::opf::{NCX_HREF, package_document};
use super::{Exporter, write_atomic};

/// Configuration for EPUB export.
#[derive(Debug, Clone, Default)]
pub struct EpubConfig {
    /// Compression level for deflate (0-9, default 6).
    pub compression_level: Option<u32>,
}

/// EPUB format exporter.
///
/// # Example
///
/// ```no_run
/// use haodoo::HaodooReader;
/// use haodoo::export::{EpubExporter, Exporter};
/// use std::fs::File;
///
/// let book = HaodooReader::open("book.updb")?.to_book()?;
/// let mut file = File::create("book.epub")?;
/// EpubExporter::new().export(&book, &mut file)?;
/// # Ok::<(), haodoo::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EpubExporter {
    config: EpubConfig,
}

impl EpubExporter {
    /// Create a new exporter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the exporter with custom settings.
    pub fn with_config(mut self, config: EpubConfig) -> Self {
        self.config = config;
        self
    }
}

impl Exporter for EpubExporter {
    fn export<W: Write + Seek>(&self, book: &Book, writer: &mut W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);

        // Fixed timestamps keep the archive byte-identical across runs.
        let stored = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(DateTime::default());
        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.config.compression_level.unwrap_or(6) as i64))
            .last_modified_time(DateTime::default());

        // mimetype must be first and uncompressed
        zip.start_file("mimetype", stored)?;
        zip.write_all(b"application/epub+zip")?;

        zip.start_file("META-INF/container.xml", deflated)?;
        zip.write_all(CONTAINER_XML)?;

        zip.start_file("OEBPS/content.opf", deflated)?;
        zip.write_all(package_document(book, true).as_bytes())?;

        zip.start_file(format!("OEBPS/{NCX_HREF}"), deflated)?;
        zip.write_all(generate_ncx(book).as_bytes())?;

        for (href, resource) in &book.resources {
            zip.start_file(format!("OEBPS/{href}"), deflated)?;
            zip.write_all(&resource.data)?;
        }

        zip.finish()?;
        Ok(())
    }
}

/// Write `book` as an EPUB file.
///
/// The archive is built in a temporary file next to `path` and moved into
/// place only once complete.
pub fn write_epub(book: &Book, path: impl AsRef<Path>) -> Result<()> {
    let exporter = EpubExporter::new();
    write_atomic(path.as_ref(), |file| exporter.export(book, file))
}

/// EPUB archive bytes.
pub fn epub_bytes(book: &Book) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    EpubExporter::new().export(book, &mut cursor)?;
    Ok(cursor.into_inner())
}

const CONTAINER_XML: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

fn generate_ncx(book: &Book) -> String {
    let metadata = &book.metadata;
    let mut ncx = String::new();

    ncx.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd">
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
"#,
    );
    let _ = writeln!(
        ncx,
        "    <meta name=\"dtb:uid\" content=\"{}\"/>",
        escape(metadata.identifier.as_str())
    );
    ncx.push_str(
        r#"    <meta name="dtb:depth" content="1"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
"#,
    );
    let _ = writeln!(
        ncx,
        "  <docTitle>\n    <text>{}</text>\n  </docTitle>",
        escape(metadata.title.as_str())
    );
    ncx.push_str("  <navMap>\n");

    write_nav_points(&mut ncx, &book.toc);

    ncx.push_str("  </navMap>\n</ncx>\n");
    ncx
}

/// One flat `navPoint` per entry; play order starts at 1.
fn write_nav_points(ncx: &mut String, entries: &[TocEntry]) {
    for (i, entry) in entries.iter().enumerate() {
        let play_order = i + 1;
        let _ = writeln!(
            ncx,
            "    <navPoint id=\"navPoint-{play_order}\" playOrder=\"{play_order}\">"
        );
        let _ = writeln!(
            ncx,
            "      <navLabel><text>{}</text></navLabel>",
            escape(entry.title.as_str())
        );
        let _ = writeln!(ncx, "      <content src=\"{}\"/>", escape(entry.href.as_str()));
        let _ = writeln!(ncx, "    </navPoint>");
    }
}
