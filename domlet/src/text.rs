//! Plain-text views of element trees.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::element::{Content, Element, Position};

/// Longest text shown for a single node in an outline.
const MAX_TEXT_WIDTH: usize = 60;

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }

    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push('…');
    result
}

/// Render an indented outline of the tree, one element per line.
///
/// ```text
/// div.sortable-table
///   div.sortable-table__header [header]
///     span "Name"
/// ```
pub fn outline(root: &Element) -> String {
    let mut out = String::new();
    write_element(root, 0, &mut out);
    out
}

fn write_element(element: &Element, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(element.tag);
    for class in &element.classes {
        out.push('.');
        out.push_str(class);
    }
    if let Some(region) = &element.region {
        out.push_str(&format!(" [{region}]"));
    }
    if let Some(href) = &element.href {
        out.push_str(&format!(" -> {href}"));
    }
    if element.position == Position::Absolute {
        out.push_str(&format!(
            " @({}, {})",
            element.left.unwrap_or(0),
            element.top.unwrap_or(0)
        ));
    }
    if element.hidden {
        out.push_str(" (hidden)");
    }
    if let Content::Text(text) = &element.content {
        out.push_str(&format!(" {:?}", truncate_to_width(text, MAX_TEXT_WIDTH)));
    }
    out.push('\n');

    for child in element.child_elements() {
        write_element(child, depth + 1, out);
    }
}
