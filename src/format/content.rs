//! Chapter text to heading and paragraph blocks.
//!
//! Each text section holds one chapter, one paragraph per line. The chapter
//! title from the header usually reappears as one of the first lines; that
//! line is promoted to the chapter heading. Chapters whose text never
//! mentions their title get a heading built from the title instead.

use std::fmt::Write;

use quick_xml::escape::partial_escape;

use super::punct;

/// A block-level element of the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
}

/// One chapter: its header-record title and its blocks in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// 1-based chapter number (= text section index).
    pub number: usize,
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Chapter {
    /// Anchor id of the chapter heading in the rendered body.
    pub fn anchor(&self) -> String {
        format!("chapter-{}", self.number)
    }

    /// Text of the chapter's heading block.
    pub fn heading(&self) -> Option<&str> {
        self.blocks.iter().find_map(|block| match block {
            Block::Heading(text) => Some(text.as_str()),
            Block::Paragraph(_) => None,
        })
    }
}

/// The extracted book body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub chapters: Vec<Chapter>,
    /// Malformed sequences replaced or dropped in the header record and the
    /// chapter text.
    pub malformed: usize,
}

impl Document {
    /// All blocks, chapter by chapter.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.chapters.iter().flat_map(|chapter| chapter.blocks.iter())
    }

    /// Body markup: one element per line, headings as `<h1>`, the rest as `<p>`.
    pub fn render_body(&self) -> String {
        let mut body = String::new();
        for chapter in &self.chapters {
            let anchor = chapter.anchor();
            for block in &chapter.blocks {
                if !body.is_empty() {
                    body.push('\n');
                }
                match block {
                    Block::Heading(text) => {
                        let _ = write!(
                            body,
                            "<h1 class=\"chapter\" id=\"{anchor}\">{}</h1>",
                            partial_escape(text.as_str())
                        );
                    }
                    Block::Paragraph(text) => {
                        let _ = write!(body, "<p>{}</p>", partial_escape(text.as_str()));
                    }
                }
            }
        }
        body
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadingState {
    ScanningForTitle,
    HeadingEmitted,
}

/// Build a chapter from its decoded section text.
///
/// Lines are punctuation-normalized and trimmed. The first line containing
/// `title` becomes the heading; without such a line, `title` itself is
/// prepended as the heading.
pub fn extract_chapter(number: usize, title: &str, text: &str) -> Chapter {
    let mut state = HeadingState::ScanningForTitle;
    let mut blocks = Vec::new();

    for line in split_lines(text) {
        let normalized = punct::normalize(line);
        let line = normalized.trim();
        if state == HeadingState::ScanningForTitle && line.contains(title) {
            blocks.push(Block::Heading(line.to_string()));
            state = HeadingState::HeadingEmitted;
        } else {
            blocks.push(Block::Paragraph(line.to_string()));
        }
    }

    if state == HeadingState::ScanningForTitle {
        blocks.insert(0, Block::Heading(title.to_string()));
    }

    Chapter {
        number,
        title: title.to_string(),
        blocks,
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}' | '\u{1D}' | '\u{1E}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split on line boundaries; `\r\n` counts as one. A trailing break does not
/// produce an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
            chars.next();
            start += 1;
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> Block {
        Block::Paragraph(text.to_string())
    }

    fn heading(text: &str) -> Block {
        Block::Heading(text.to_string())
    }

    #[test]
    fn test_heading_detected_in_text() {
        let chapter = extract_chapter(1, "Opening", "Some preface\nOpening Chapter One\nBody text");
        assert_eq!(
            chapter.blocks,
            vec![
                paragraph("Some preface"),
                heading("Opening Chapter One"),
                paragraph("Body text"),
            ]
        );
    }

    #[test]
    fn test_only_first_match_is_heading() {
        let chapter = extract_chapter(1, "Ch", "Ch 1\nCh again");
        assert_eq!(chapter.blocks, vec![heading("Ch 1"), paragraph("Ch again")]);
    }

    #[test]
    fn test_heading_fallback_prepends_title() {
        let chapter = extract_chapter(2, "Missing", "first line\nsecond line");
        assert_eq!(
            chapter.blocks,
            vec![
                heading("Missing"),
                paragraph("first line"),
                paragraph("second line"),
            ]
        );
    }

    #[test]
    fn test_empty_text_gets_heading_only() {
        let chapter = extract_chapter(1, "第一章", "");
        assert_eq!(chapter.blocks, vec![heading("第一章")]);
    }

    #[test]
    fn test_lines_normalized_then_trimmed() {
        let chapter = extract_chapter(1, "T", "T\n\u{3000}\u{3000}﹁你好﹂\u{3000}");
        assert_eq!(chapter.blocks[1], paragraph("「你好」"));
    }

    #[test]
    fn test_title_matched_after_normalization() {
        let chapter = extract_chapter(1, "（上）", "︵上︶");
        assert_eq!(chapter.blocks, vec![heading("（上）")]);
    }

    #[test]
    fn test_blank_lines_kept_as_empty_paragraphs() {
        let chapter = extract_chapter(1, "T", "T\n\nbody");
        assert_eq!(chapter.blocks, vec![heading("T"), paragraph(""), paragraph("body")]);
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n"), vec!["a"]);
        assert_eq!(split_lines("\n"), vec![""]);
        assert_eq!(split_lines("a\u{2029}b"), vec!["a", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_render_body_escapes_markup() {
        let document = Document {
            title: "Book".into(),
            chapters: vec![extract_chapter(1, "A & B", "A & B\n1 < 2 > 0")],
            malformed: 0,
        };
        assert_eq!(
            document.render_body(),
            "<h1 class=\"chapter\" id=\"chapter-1\">A &amp; B</h1>\n<p>1 &lt; 2 &gt; 0</p>"
        );
    }

    #[test]
    fn test_render_body_concatenates_chapters_in_order() {
        let document = Document {
            title: "Book".into(),
            chapters: vec![
                extract_chapter(1, "One", "One\nfirst"),
                extract_chapter(2, "Two", "second"),
            ],
            malformed: 0,
        };
        let body = document.render_body();
        let one = body.find("chapter-1").unwrap();
        let two = body.find("chapter-2").unwrap();
        assert!(one < body.find("first").unwrap());
        assert!(two < body.find("second").unwrap());
        assert!(one < two);
        assert_eq!(document.blocks().count(), 4);
    }

    #[test]
    fn test_chapter_heading_accessor() {
        let chapter = extract_chapter(3, "Three", "intro\nThree: the end");
        assert_eq!(chapter.heading(), Some("Three: the end"));
        assert_eq!(chapter.anchor(), "chapter-3");
    }
}
