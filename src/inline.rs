use crate::config::Options;
use crate::escape::{escape, Html};
use fancy_regex::Regex as FancyRegex;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static RE_BOLD_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static RE_BOLD_UNDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").unwrap());
static RE_ITALIC_STAR: LazyLock<FancyRegex> =
    LazyLock::new(|| FancyRegex::new(r"(?<!\*)\*(?!\*)(.+?)(?<!\*)\*(?!\*)").unwrap());
static RE_ITALIC_UNDER: LazyLock<FancyRegex> =
    LazyLock::new(|| FancyRegex::new(r"(?<!_)_(?!_)(.+?)(?<!_)_(?!_)").unwrap());
static RE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").unwrap());
static RE_SPAN_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\u{27E6}SPAN:(\d+)\u{27E7}").unwrap());

/// Apply inline markup to a block's plain text: code spans, then bold, then
/// italic, then links. Stage order is load-bearing: code spans are parked
/// behind placeholders before anything else runs so their bodies are never
/// reinterpreted, and italic runs after bold so `**` is never half-consumed
/// as `*`.
pub fn format_inline(text: &str, opts: &Options) -> Html {
    let mut spans: Vec<String> = Vec::new();
    let parked = RE_CODE_SPAN.replace_all(text, |caps: &Captures| {
        let idx = spans.len();
        spans.push(format!("<code>{}</code>", escape(&caps[1])));
        format!("\u{27E6}SPAN:{}\u{27E7}", idx)
    });

    let escaped = escape(&parked);

    let text = RE_BOLD_STAR.replace_all(&escaped, "<strong>$1</strong>");
    let text = RE_BOLD_UNDER.replace_all(&text, "<strong>$1</strong>");
    let text = RE_ITALIC_STAR.replace_all(&text, "<em>$1</em>");
    let text = RE_ITALIC_UNDER.replace_all(&text, "<em>$1</em>");

    let text = RE_LINK.replace_all(&text, |caps: &Captures| {
        let label = &caps[1];
        let url = &caps[2];
        if url.starts_with(opts.internal_prefix.as_str()) {
            format!(r#"<a href="{}">{}</a>"#, url, label)
        } else {
            format!(r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#, url, label)
        }
    });

    // A document can contain the placeholder characters literally; only
    // indices we parked are restorable, anything else stays as written.
    let restored = RE_SPAN_REF.replace_all(&text, |caps: &Captures| {
        caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|idx| spans.get(idx))
            .cloned()
            .unwrap_or_else(|| caps[0].to_string())
    });

    Html::raw(restored.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(text: &str) -> String {
        format_inline(text, &Options::default()).into_string()
    }

    #[test]
    fn test_bold() {
        assert_eq!(fmt("**bold**"), "<strong>bold</strong>");
        assert_eq!(fmt("__bold__"), "<strong>bold</strong>");
    }

    #[test]
    fn test_italic() {
        assert_eq!(fmt("*italic*"), "<em>italic</em>");
        assert_eq!(fmt("_italic_"), "<em>italic</em>");
    }

    #[test]
    fn test_bold_italic_mix() {
        assert_eq!(
            fmt("**bold *and* mix**"),
            "<strong>bold <em>and</em> mix</strong>"
        );
    }

    #[test]
    fn test_code_span() {
        assert_eq!(fmt("`code`"), "<code>code</code>");
    }

    #[test]
    fn test_code_span_protects_markers() {
        assert_eq!(fmt("`**bold**`"), "<code>**bold**</code>");
        assert_eq!(fmt("`[x](y)`"), "<code>[x](y)</code>");
    }

    #[test]
    fn test_code_span_escapes_body() {
        assert_eq!(fmt("`<b>`"), "<code>&lt;b&gt;</code>");
    }

    #[test]
    fn test_literal_text_escaped() {
        assert_eq!(fmt("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn test_external_link() {
        assert_eq!(
            fmt("[site](https://example.com)"),
            r#"<a href="https://example.com" target="_blank" rel="noopener">site</a>"#
        );
    }

    #[test]
    fn test_internal_link_no_target() {
        assert_eq!(fmt("[home](#/home)"), r##"<a href="#/home">home</a>"##);
    }

    #[test]
    fn test_link_label_formatting() {
        assert_eq!(
            fmt("[**bold** label](#x)"),
            r##"<a href="#x"><strong>bold</strong> label</a>"##
        );
    }

    #[test]
    fn test_dunder_is_bold_not_italic() {
        // Double markers are consumed whole, never half-matched as italic
        assert_eq!(fmt("__init__"), "<strong>init</strong>");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(fmt("just words"), "just words");
    }
}
