//! Inline `style` attribute declarations
//!
//! Visibility is expressed the way jQuery-style hide/show does it: a
//! `display: none` declaration in the element's inline style.

/// Split a `style` attribute into `(property, value)` pairs.
///
/// Semicolons inside quotes or parentheses do not split declarations.
/// Property names are lowercased; empty or malformed declarations are dropped.
pub fn parse_declarations(style: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let bytes = style.as_bytes();
    let mut start = 0usize;
    let mut paren_depth = 0usize;
    let mut quote: Option<u8> = None;

    for (i, &ch) in bytes.iter().enumerate() {
        match (quote, ch) {
            (Some(q), _) if ch == q => quote = None,
            (Some(_), _) => {}
            (None, b'\'' | b'"') => quote = Some(ch),
            (None, b'(') => paren_depth += 1,
            (None, b')') => paren_depth = paren_depth.saturating_sub(1),
            (None, b';') if paren_depth == 0 => {
                push_declaration(&style[start..i], &mut out);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_declaration(&style[start..], &mut out);

    out
}

fn push_declaration(decl: &str, out: &mut Vec<(String, String)>) {
    let Some((name, value)) = decl.split_once(':') else {
        return;
    };
    let name = name.trim().to_ascii_lowercase();
    let value = value.trim();
    if name.is_empty() || value.is_empty() {
        return;
    }
    out.push((name, value.to_string()));
}

/// Join declarations back into attribute form: `a: b; c: d;`
pub fn serialize_declarations(decls: &[(String, String)]) -> String {
    let mut out = String::new();
    for (idx, (name, value)) in decls.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push(';');
    }
    out
}
