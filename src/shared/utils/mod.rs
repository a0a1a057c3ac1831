//! Small helpers shared by both widgets.

/// Escape user-supplied text before inserting it into markup.
///
/// Covers the five characters that can open an injection vector in
/// attribute or element context. Server-rendered fragments are trusted;
/// everything read from API JSON goes through here.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Extract a cookie value from a raw `document.cookie` string.
///
/// Values are URL-decoded; a value that fails to decode is returned as-is.
pub fn cookie_value(raw_cookies: &str, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    raw_cookies
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(prefix.as_str()))
        .map(|value| {
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_covers_all_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x" onclick='y'>Bo & Sons</a>"#),
            "&lt;a href=&quot;x&quot; onclick=&#039;y&#039;&gt;Bo &amp; Sons&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_passes_plain_text_through() {
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_cookie_value_finds_named_cookie() {
        let raw = "sessionid=abc123; csrftoken=tok%2Bvalue; theme=dark";
        assert_eq!(cookie_value(raw, "csrftoken").as_deref(), Some("tok+value"));
    }

    #[test]
    fn test_cookie_value_missing_cookie() {
        assert_eq!(cookie_value("sessionid=abc123", "csrftoken"), None);
    }

    #[test]
    fn test_cookie_value_handles_leading_whitespace() {
        assert_eq!(
            cookie_value("a=1;  csrftoken=xyz", "csrftoken").as_deref(),
            Some("xyz")
        );
    }
}
