mod common;

use std::fs;
use std::io::{Cursor, Read};

use common::{LEGACY, PdbBuilder, unicode_book};
use haodoo::{HaodooReader, haodoo_bytes_to_epub, read_haodoo, write_epub, write_oeb_dir};
use tempfile::TempDir;

fn sample() -> Vec<u8> {
    unicode_book(
        "︵上︶集",
        &[
            ("第一章", "第一章 開端\n\u{3000}\u{3000}﹁A & B﹂\n<正文>"),
            ("第二章", "沒有標題的一章"),
        ],
    )
    .author(&common::utf16("作者"))
    .build()
}

fn read_entry(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut text = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing {name}"))
        .read_to_string(&mut text)
        .unwrap();
    text
}

#[test]
fn test_epub_contents() {
    let bytes = haodoo_bytes_to_epub(sample()).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

    assert_eq!(read_entry(&mut archive, "mimetype"), "application/epub+zip");
    assert!(read_entry(&mut archive, "META-INF/container.xml").contains("OEBPS/content.opf"));

    let opf = read_entry(&mut archive, "OEBPS/content.opf");
    assert!(opf.contains("<dc:title>（上）集</dc:title>"));
    assert!(opf.contains(">作者</dc:creator>"));
    assert!(opf.contains("<dc:language>zh-TW</dc:language>"));
    assert!(opf.contains("urn:sha1:"));

    let ncx = read_entry(&mut archive, "OEBPS/toc.ncx");
    assert!(ncx.contains("<text>第一章 開端</text>"));
    assert!(ncx.contains("<content src=\"index.html#chapter-2\"/>"));

    let html = read_entry(&mut archive, "OEBPS/index.html");
    assert!(html.contains("<h1 class=\"chapter\" id=\"chapter-1\">第一章 開端</h1>"));
    assert!(html.contains("<p>「A &amp; B」</p>"));
    assert!(html.contains("<p>&lt;正文&gt;</p>"));
    assert!(html.contains(
        "<h1 class=\"chapter\" id=\"chapter-2\">第二章</h1>\n<p>沒有標題的一章</p>"
    ));
}

#[test]
fn test_conversion_is_deterministic() {
    let first = haodoo_bytes_to_epub(sample()).unwrap();
    let second = haodoo_bytes_to_epub(sample()).unwrap();
    assert_eq!(first, second);

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("book.updb");
    fs::write(&input, sample()).unwrap();
    let a = dir.path().join("a.epub");
    let b = dir.path().join("b.epub");
    write_epub(&read_haodoo(&input).unwrap(), &a).unwrap();
    write_epub(&read_haodoo(&input).unwrap(), &b).unwrap();
    assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());
    assert_eq!(fs::read(&a).unwrap(), first);
}

#[test]
fn test_oeb_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("oeb");
    let book = HaodooReader::from_bytes(sample()).unwrap().to_book().unwrap();
    write_oeb_dir(&book, &out).unwrap();

    let html = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains("<title>（上）集</title>"));
    let opf = fs::read_to_string(out.join("metadata.opf")).unwrap();
    assert!(opf.contains("<item id=\"index\" href=\"index.html\""));
    assert!(opf.contains("<itemref idref=\"index\"/>"));

    let mut names: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["index.html", "metadata.opf"]);
}

#[test]
fn test_failed_conversion_leaves_no_artifact() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.pdb");
    fs::write(
        &input,
        PdbBuilder::new(LEGACY)
            .record(b"Book\x1b\x1b\x1b2\x1bOnly".to_vec())
            .record(b"Only".to_vec())
            .record(b"orphan".to_vec())
            .build(),
    )
    .unwrap();

    let output = dir.path().join("bad.epub");
    let result = read_haodoo(&input).and_then(|book| write_epub(&book, &output));
    assert!(result.is_err());
    assert!(!output.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_write_into_missing_directory_fails_cleanly() {
    let dir = TempDir::new().unwrap();
    let book = HaodooReader::from_bytes(sample()).unwrap().to_book().unwrap();
    let output = dir.path().join("missing").join("book.epub");
    assert!(write_epub(&book, &output).is_err());
    assert!(!dir.path().join("missing").exists());
}
