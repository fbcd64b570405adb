//! OPF 2.0 package document.

use std::fmt::Write;

use quick_xml::escape::escape;

use crate::book::Book;

/// Manifest id and href of the NCX table of contents.
pub(crate) const NCX_ID: &str = "ncx";
pub(crate) const NCX_HREF: &str = "toc.ncx";

/// Manifest id for a resource outside the spine: `style.css` becomes `style`.
pub(crate) fn manifest_id(href: &str) -> String {
    let stem = href.rsplit_once('.').map_or(href, |(stem, _)| stem);
    stem.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Build `content.opf`/`metadata.opf`. With `ncx`, the manifest lists
/// `toc.ncx` and the spine points at it.
pub fn package_document(book: &Book, ncx: bool) -> String {
    let metadata = &book.metadata;
    let mut opf = String::new();

    opf.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
"#,
    );
    let _ = writeln!(opf, "    <dc:title>{}</dc:title>", escape(metadata.title.as_str()));
    for author in &metadata.authors {
        let _ = writeln!(
            opf,
            "    <dc:creator opf:role=\"aut\">{}</dc:creator>",
            escape(author.as_str())
        );
    }
    let _ = writeln!(
        opf,
        "    <dc:language>{}</dc:language>",
        escape(metadata.language.as_str())
    );
    let _ = writeln!(
        opf,
        "    <dc:identifier id=\"BookId\">{}</dc:identifier>",
        escape(metadata.identifier.as_str())
    );
    opf.push_str("  </metadata>\n  <manifest>\n");

    if ncx {
        let _ = writeln!(
            opf,
            "    <item id=\"{NCX_ID}\" href=\"{NCX_HREF}\" media-type=\"application/x-dtbncx+xml\"/>"
        );
    }
    for (href, resource) in &book.resources {
        let id = book
            .spine_id(href)
            .map_or_else(|| manifest_id(href), str::to_string);
        let _ = writeln!(
            opf,
            "    <item id=\"{}\" href=\"{}\" media-type=\"{}\"/>",
            escape(id.as_str()),
            escape(href.as_str()),
            escape(resource.media_type.as_str())
        );
    }
    opf.push_str("  </manifest>\n");

    if ncx {
        let _ = writeln!(opf, "  <spine toc=\"{NCX_ID}\">");
    } else {
        opf.push_str("  <spine>\n");
    }
    for item in &book.spine {
        let _ = writeln!(opf, "    <itemref idref=\"{}\"/>", escape(item.id.as_str()));
    }
    opf.push_str("  </spine>\n</package>\n");
    opf
}
