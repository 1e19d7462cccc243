//! Reference renderer: HTML `<ruby>` markup from an annotation sequence.
//!
//! The core makes no assumption about how annotations are displayed; this
//! module is one concrete consumer, used by the CLI. Each annotated span
//! becomes a `<ruby>` element carrying the tone color and the reading both
//! as ruby text and as a hover tooltip. Everything else passes through
//! HTML-escaped.

use crate::Annotation;

/// Render `text` with its annotations as an HTML fragment.
///
/// Annotations are matched to characters by UTF-16 start offset, so the
/// sequence must come from the same `text` (and window) it was computed
/// over. Annotations outside the walked text are ignored.
#[must_use]
pub fn render_fragment(text: &str, annotations: &[Annotation]) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut pending = annotations.iter().peekable();
    let mut offset = 0;

    for ch in text.chars() {
        // Drop anything the walk has already passed; spans are sorted.
        while pending.next_if(|a| a.start < offset).is_some() {}

        if let Some(annotation) = pending.next_if(|a| a.start == offset) {
            out.push_str("<ruby style=\"color:");
            push_escaped_str(&mut out, &annotation.color);
            out.push_str("\" title=\"");
            push_escaped_str(&mut out, &annotation.tooltip);
            out.push_str("\">");
            push_escaped(&mut out, ch);
            out.push_str("<rt>");
            push_escaped_str(&mut out, &annotation.tooltip);
            out.push_str("</rt></ruby>");
        } else {
            push_escaped(&mut out, ch);
        }

        offset += ch.len_utf16();
    }

    out
}

/// Wrap a rendered fragment in a minimal standalone page.
#[must_use]
pub fn render_page(title: &str, fragment: &str) -> String {
    let mut escaped_title = String::new();
    push_escaped_str(&mut escaped_title, title);

    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{escaped_title}</title>\n<style>\nbody {{ white-space: pre-wrap; font-size: 1.4em; line-height: 2.6; }}\nrt {{ font-size: 0.55em; }}\n</style>\n</head>\n<body>{fragment}</body>\n</html>\n"
    )
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        _ => out.push(ch),
    }
}

fn push_escaped_str(out: &mut String, s: &str) {
    for ch in s.chars() {
        push_escaped(out, ch);
    }
}
