// src/core/sanitize.rs

/// Escape text for use inside HTML element content or a double-quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// "Turdus rufiventris" → "Turdus_rufiventris". Used for page anchors and wiki titles.
pub fn underscore_spaces(name: &str) -> String {
    name.replace(' ', "_")
}

/// Photo URLs come back at thumbnail size; swap to the display size.
pub fn display_photo_url(url: &str) -> String {
    url.replace("square", "medium")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_covers_markup_chars() {
        assert_eq!(escape_html(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("Pitangus sulphuratus"), "Pitangus sulphuratus");
    }

    #[test]
    fn underscore_spaces_replaces_every_space() {
        assert_eq!(underscore_spaces("Columba livia domestica"), "Columba_livia_domestica");
        assert_eq!(underscore_spaces("Unknown"), "Unknown");
    }

    #[test]
    fn display_photo_url_swaps_size() {
        assert_eq!(
            display_photo_url("https://static.inaturalist.org/photos/1/square.jpg"),
            "https://static.inaturalist.org/photos/1/medium.jpg"
        );
        assert_eq!(display_photo_url(""), "");
    }
}
