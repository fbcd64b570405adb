//! XHTML content document.

use quick_xml::escape::escape;

/// Wrap pre-rendered body markup in an XHTML 1.1 document.
///
/// `body` is inserted as is; `title` is escaped.
pub fn xhtml_document(title: &str, body: &str) -> String {
    let mut doc = String::with_capacity(body.len() + 512);
    doc.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="zh-TW">
<head>
  <meta http-equiv="Content-Type" content="application/xhtml+xml; charset=utf-8"/>
  <title>"#,
    );
    doc.push_str(&escape(title));
    doc.push_str("</title>\n</head>\n<body>\n");
    doc.push_str(body);
    if !body.is_empty() && !body.ends_with('\n') {
        doc.push('\n');
    }
    doc.push_str("</body>\n</html>\n");
    doc
}
