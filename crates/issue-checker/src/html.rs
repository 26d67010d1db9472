//! Minimal HTML escaping for text interpolated into issue summaries.

/// Escape the characters that matter for markup injection. The set and the
/// entities follow the OWASP XSS prevention cheat sheet.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '/' => out.push_str("&sol;"),
            _ => out.push(ch),
        }
    }
    out
}
