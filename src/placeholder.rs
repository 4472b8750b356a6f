//! The `{{Name}}` field-token convention.
//!
//! `field` elements carry a token naming a piece of application data. The
//! document generator (outside this crate) swaps tokens for values; here we
//! only build tokens, read them back, and list what a template asks for.

#[cfg(test)]
#[path = "placeholder_test.rs"]
mod placeholder_test;

use template_canvas::doc::{ElementKind, Template};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Wrap a field name as a token: `Owner Name` becomes `{{Owner Name}}`.
#[must_use]
pub fn token(name: &str) -> String {
    format!("{OPEN}{}{CLOSE}", name.trim())
}

/// Every field name referenced in `content`, in order of appearance.
///
/// Names are trimmed; empty tokens (`{{ }}`) and unterminated openers are skipped.
#[must_use]
pub fn names_in(content: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = content;
    while let Some(end) = rest.find(CLOSE) {
        let head = &rest[..end];
        // The innermost opener wins: `{{ {{Name}}` names `Name`.
        if let Some(start) = head.rfind(OPEN) {
            let name = head[start + OPEN.len()..].trim();
            if !name.is_empty() {
                names.push(name);
            }
        }
        rest = &rest[end + CLOSE.len()..];
    }
    names
}

/// The name inside `content` when the whole content is exactly one token.
#[must_use]
pub fn parse_token(content: &str) -> Option<&str> {
    let inner = content.trim().strip_prefix(OPEN)?.strip_suffix(CLOSE)?;
    let name = inner.trim();
    if name.is_empty() || name.contains(OPEN) || name.contains(CLOSE) {
        return None;
    }
    Some(name)
}

/// Distinct field names the template's `field` elements reference, first-seen order.
#[must_use]
pub fn field_names(template: &Template) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for el in template.elements.iter().filter(|el| el.kind == ElementKind::Field) {
        for name in names_in(&el.content) {
            if !seen.iter().any(|s| s == name) {
                seen.push(name.to_owned());
            }
        }
    }
    seen
}
