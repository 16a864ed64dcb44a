use std::fmt::Write;

/// Escape text for interpolation into HTML element content or a
/// double-quoted attribute value.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape text for interpolation into a single-quoted JS string inside an
/// inline script block.
pub fn escape_js_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '<' => escaped.push_str("\\x3c"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const STYLE: &str = "\
body{margin:0;font-family:sans-serif;background:#0f0f0f;color:#fff}\
main{max-width:640px;margin:0 auto;padding:24px 16px}\
textarea{width:100%;min-height:96px;border-radius:8px;padding:8px;box-sizing:border-box}\
button{cursor:pointer}\
.submit{width:100%;padding:12px;border:0;border-radius:8px;background:#3183ff;color:#fff;font-size:16px}\
.submit:disabled{background:#555;cursor:not-allowed}\
article.task,article.comment{border:1.5px solid #909090;border-radius:8px;padding:14px;margin:14px 0;background:#fff;color:#000}\
.tag{background:#3183ff;color:#fff;border-radius:4px;padding:2px 6px;font-size:12px}\
.icon{border:0;background:none;font-size:18px}\
.row{display:flex;justify-content:space-between;align-items:center;gap:8px}\
a{color:inherit}";

/// Shared page shell: every server-rendered page goes through here.
pub fn page(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 512);
    // Writing to a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title><style>{}</style></head><body><main>{}</main></body></html>",
        escape_html(title),
        STYLE,
        body
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape_html("water the plants"), "water the plants");
    }

    #[test]
    fn js_strings_cannot_break_out_of_quotes_or_script() {
        assert_eq!(escape_js_string("it's"), "it\\'s");
        assert_eq!(escape_js_string("</script>"), "\\x3c/script>");
    }

    #[test]
    fn page_escapes_the_title_but_not_the_body() {
        let html = page("a & b", "<p>hi</p>");
        assert!(html.contains("<title>a &amp; b</title>"));
        assert!(html.contains("<p>hi</p>"));
    }
}
