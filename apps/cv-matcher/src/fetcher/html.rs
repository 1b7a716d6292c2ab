//! Visible-text extraction from job posting HTML.

use scraper::{ElementRef, Html, Selector};

/// Elements whose text never reaches the reader.
const SKIPPED: [&str; 8] = [
    "script", "style", "noscript", "template", "svg", "head", "iframe", "button",
];

/// Elements that start a new line in the extracted text.
const BLOCKS: [&str; 27] = [
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol",
    "p", "section", "table", "tr",
];

/// Returns the readable text of an HTML document, one block per line.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let root = Selector::parse("body")
        .ok()
        .and_then(|body| document.select(&body).next())
        .unwrap_or_else(|| document.root_element());

    let mut lines = Vec::new();
    let mut current = String::new();
    collect(root, &mut lines, &mut current);
    flush(&mut lines, &mut current);

    lines.join("\n")
}

fn collect(element: ElementRef<'_>, lines: &mut Vec<String>, current: &mut String) {
    let name = element.value().name();
    if SKIPPED.contains(&name) {
        return;
    }

    let is_block = BLOCKS.contains(&name);
    if is_block {
        flush(lines, current);
    }

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            collect(child_element, lines, current);
        } else if let Some(text) = child.value().as_text() {
            current.push_str(text);
        }
    }

    if is_block {
        flush(lines, current);
    }
}

fn flush(lines: &mut Vec<String>, current: &mut String) {
    let line = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !line.is_empty() {
        lines.push(line);
    }
    current.clear();
}
