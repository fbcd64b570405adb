//! HaoDoo book reader.

use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::book::{Book, Metadata, TocEntry};
use crate::error::Result;
use crate::export::html::xhtml_document;
use crate::io::{ByteSource, FileSource, MemorySource};
use crate::pdb::PdbInfo;

use super::content::{Chapter, Document, extract_chapter};
use super::decode::{DecodePolicy, Decoded, decode_padded};
use super::header::HeaderRecord;
use super::metadata::{build_metadata, content_identifier, read_author};
use super::variant::Variant;

/// Href of the single content document.
pub const CONTENT_HREF: &str = "index.html";
const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";

/// Options for opening a book.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Decode modes; `None` uses [`Variant::default_policy`].
    pub policy: Option<DecodePolicy>,
}

impl ReadOptions {
    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = Some(policy);
        self
    }
}

/// An opened HaoDoo book.
///
/// Opening reads the PDB header and the header record. Text sections are
/// decoded on demand.
pub struct HaodooReader {
    source: Arc<dyn ByteSource>,
    pdb: PdbInfo,
    variant: Variant,
    header: HeaderRecord,
    policy: DecodePolicy,
}

impl HaodooReader {
    /// Open a `.pdb` or `.updb` file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let source = Arc::new(FileSource::open(path)?);
        Self::from_source(source, ReadOptions::default())
    }

    /// Read a book held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_source(Arc::new(MemorySource::new(data)), ReadOptions::default())
    }

    pub fn from_source(source: Arc<dyn ByteSource>, options: ReadOptions) -> Result<Self> {
        let pdb = PdbInfo::read(source.as_ref())?;
        let variant = Variant::from_ident(&pdb.ident)?;
        let policy = options.policy.unwrap_or_else(|| variant.default_policy());
        debug!(
            "PDB {:?}: {} records, {variant:?}",
            pdb.ident_str(),
            pdb.num_records
        );

        let raw_header = pdb.read_record(source.as_ref(), 0)?;
        let header = HeaderRecord::parse(&raw_header, variant, &policy)?;

        Ok(Self {
            source,
            pdb,
            variant,
            header,
            policy,
        })
    }

    pub fn header(&self) -> &HeaderRecord {
        &self.header
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn policy(&self) -> &DecodePolicy {
        &self.policy
    }

    pub fn pdb(&self) -> &PdbInfo {
        &self.pdb
    }

    /// Raw bytes of section `index` (0 is the header record).
    pub fn section_data(&self, index: usize) -> Result<Vec<u8>> {
        self.pdb.read_record(self.source.as_ref(), index)
    }

    /// Decoded text of section `index`, trailing NULs removed.
    pub fn section_text(&self, index: usize) -> Result<String> {
        Ok(self.decode_section(index)?.text)
    }

    fn decode_section(&self, index: usize) -> Result<Decoded> {
        let data = self.section_data(index)?;
        decode_padded(&data, self.variant.encoding(), self.policy.text, "chapter text")
    }

    /// Chapter `number` (1-based), read from the section of the same index.
    pub fn chapter(&self, number: usize) -> Result<Chapter> {
        Ok(self.read_chapter(number)?.0)
    }

    /// The chapter and the number of malformed sequences in its text.
    fn read_chapter(&self, number: usize) -> Result<(Chapter, usize)> {
        let title = self.header.chapter_title(number)?;
        let decoded = self.decode_section(number)?;
        debug!(
            "Chapter {number}: {title:?}, {} bytes of text",
            decoded.text.len()
        );
        Ok((extract_chapter(number, title, &decoded.text), decoded.malformed))
    }

    /// Every chapter the header declares, in order.
    pub fn document(&self) -> Result<Document> {
        info!(
            "Extracting {} chapters from {:?}",
            self.header.num_records, self.header.title
        );
        let mut malformed = self.header.malformed;
        let mut chapters = Vec::with_capacity(self.header.num_records);
        for number in 1..=self.header.num_records {
            let (chapter, count) = self.read_chapter(number)?;
            malformed += count;
            chapters.push(chapter);
        }
        Ok(Document {
            title: self.header.title.clone(),
            chapters,
            malformed,
        })
    }

    /// Title, author, language and identifier.
    pub fn metadata(&self) -> Result<Metadata> {
        let author = read_author(self.source.as_ref(), self.variant, self.policy.author)?;
        let identifier = content_identifier(self.source.as_ref())?;
        Ok(build_metadata(&self.header.title, author, identifier))
    }

    /// Convert to a [`Book`] with one XHTML document and a chapter TOC.
    pub fn to_book(&self) -> Result<Book> {
        self.book_from(&self.document()?)
    }

    /// Package an already extracted [`Document`] with this book's metadata.
    pub fn book_from(&self, document: &Document) -> Result<Book> {
        let mut book = Book::new();
        book.metadata = self.metadata()?;

        let html = xhtml_document(&document.title, &document.render_body());
        book.add_resource(CONTENT_HREF, html.into_bytes(), XHTML_MEDIA_TYPE);
        book.add_spine_item("index", CONTENT_HREF);
        book.toc = document
            .chapters
            .iter()
            .map(|chapter| {
                let title = chapter.heading().unwrap_or(&chapter.title);
                TocEntry::new(title, format!("{CONTENT_HREF}#{}", chapter.anchor()))
            })
            .collect();

        info!(
            "Converted {:?}: {} chapters",
            book.metadata.title,
            book.toc.len()
        );
        Ok(book)
    }
}
