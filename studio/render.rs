/// Template renderer for the studio page.
///
/// The studio uses a single HTML template (`studio/assets/studio.html`) with
/// placeholder tokens like `{{TOKEN}}`, loaded at compile time. Handlers pass
/// a closure that substitutes the tokens they know about; anything left over
/// is blanked so raw `{{TOKEN}}` strings never reach the browser.

const TEMPLATE: &str = include_str!("assets/studio.html");

/// Renders the full studio page.
pub fn render_page<F>(fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let html = fill(TEMPLATE.to_owned());
    blank_remaining(html)
}

/// Replaces any `{{TOKEN}}` that wasn't already substituted with an empty
/// string.
fn blank_remaining(mut html: String) -> String {
    let mut from = 0;
    while let Some(rel) = html[from..].find("{{") {
        let start = from + rel;
        match html[start..].find("}}") {
            Some(end) => {
                html.replace_range(start..start + end + 2, "");
                from = start;
            }
            None => break,
        }
    }
    html
}

/// Escapes markup and template braces, so escaped text can never form a
/// `{{TOKEN}}`.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
     .replace('{', "&#123;")
     .replace('}', "&#125;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfilled_tokens_are_blanked() {
        assert_eq!(blank_remaining("a{{X}}b{{Y}}c".to_owned()), "abc");
        assert_eq!(blank_remaining("open {{ only".to_owned()), "open {{ only");
    }

    #[test]
    fn rendered_page_has_no_leftover_tokens() {
        let page = render_page(|t| t.replace("{{IN_H}}", "32"));
        assert!(!page.contains("{{"));
        assert!(page.contains("value=\"32\""));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(html_escape("<b>\"x\" & y</b>"), "&lt;b&gt;&quot;x&quot; &amp; y&lt;/b&gt;");
    }

    #[test]
    fn escaped_text_survives_token_blanking() {
        let escaped = html_escape("{{FLASH}}");
        assert_eq!(escaped, "&#123;&#123;FLASH&#125;&#125;");
        assert_eq!(blank_remaining(escaped.clone()), escaped);
    }
}
