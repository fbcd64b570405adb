//! Vertical-typesetting punctuation to horizontal forms.
//!
//! HaoDoo books are laid out for vertical reading and use the CJK vertical
//! presentation forms (U+FE10..U+FE4F and a few others) for brackets,
//! ellipses and dashes. Horizontal readers render those sideways, so every
//! glyph is swapped for its horizontal counterpart.

use std::borrow::Cow;

/// Vertical glyph and its horizontal replacement.
///
/// No key appears in any replacement, so applying the table once is enough
/// and applying it again changes nothing.
pub const PUNCTUATION_TABLE: &[(char, &str)] = &[
    ('︵', "（"),
    ('︶', "）"),
    ('︷', "｛"),
    ('︸', "｝"),
    ('︹', "〔"),
    ('︺', "〕"),
    ('︻', "【"),
    ('︼', "】"),
    ('︗', "〖"),
    ('︘', "〗"),
    ('﹇', "［］"),
    ('﹈', "［］"),
    ('︽', "《"),
    ('︾', "》"),
    ('︿', "〈"),
    ('﹀', "〉"),
    ('﹁', "「"),
    ('﹂', "」"),
    ('﹃', "『"),
    ('﹄', "』"),
    ('｜', "—"),
    ('︙', "…"),
    ('ⸯ', "～"),
    ('│', "…"),
    ('￤', "…"),
    ('\u{3000}', "  "),
];

/// Horizontal replacement for `c`, if it is a vertical form.
pub fn horizontal_form(c: char) -> Option<&'static str> {
    PUNCTUATION_TABLE
        .iter()
        .find(|(vertical, _)| *vertical == c)
        .map(|(_, horizontal)| *horizontal)
}

/// Replace every vertical punctuation glyph in `text`.
///
/// Borrows the input when nothing needs replacing.
pub fn normalize(text: &str) -> Cow<'_, str> {
    let Some(first) = text.find(|c: char| horizontal_form(c).is_some()) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 8);
    out.push_str(&text[..first]);
    for c in text[first..].chars() {
        match horizontal_form(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}
