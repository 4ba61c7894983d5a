//! Escaping of user text embedded in overlay markup.

/// Escape the five XML-reserved characters.
///
/// `&` is handled in the same pass as the others, so already-escaped input is escaped again
/// rather than passed through.
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
