use crate::config::Options;
use crate::escape::{escape, Html};
use crate::highlight::Highlighter;
use crate::inline::format_inline;
use crate::ir::{Block, FencedCode};
use crate::slug::heading_slug;
use indexmap::IndexMap;
use std::sync::LazyLock;

static LANG_ALIASES: LazyLock<IndexMap<&'static str, &'static str>> = LazyLock::new(|| {
    IndexMap::from([
        ("coffee", "coffeescript"),
        ("js", "javascript"),
        ("py", "python"),
        ("sh", "bash"),
        ("txt", "plaintext"),
        ("", "plaintext"),
    ])
});

/// Canonical highlighter identifier for a fence tag. Alias hits win; an
/// unknown tag survives only when the injected capability has a grammar for
/// it; everything else is plaintext.
fn canonical_lang(tag: &str, opts: &Options, highlighter: &dyn Highlighter) -> String {
    let tag = tag.trim();
    if let Some(canon) = opts.lang_aliases.get(tag) {
        return canon.clone();
    }
    if let Some(canon) = LANG_ALIASES.get(tag) {
        return (*canon).to_string();
    }
    if !tag.is_empty() && highlighter.has_grammar(tag) {
        return tag.to_string();
    }
    "plaintext".to_string()
}

fn render_code(fence: &FencedCode, opts: &Options, highlighter: &dyn Highlighter) -> Html {
    let lang = canonical_lang(&fence.lang, opts, highlighter);
    let code = fence.content.trim();

    let body = if highlighter.has_grammar(&lang) {
        highlighter
            .highlight(code, &lang)
            .unwrap_or_else(|_| escape(code))
    } else {
        escape(code)
    };

    let mut out = Html::new();
    out.push_raw(&format!(r#"<pre><code class="language-{}">"#, escape(&lang)));
    out.push_raw(&body);
    out.push_raw("</code></pre>");
    out
}

fn render_table(rows: &[Vec<String>], opts: &Options) -> Html {
    let header = &rows[0];
    let width = header.len();

    let mut out = Html::new();
    out.push_raw("<table><thead><tr>");
    for cell in header {
        out.push_raw("<th>");
        out.push(&format_inline(cell, opts));
        out.push_raw("</th>");
    }
    out.push_raw("</tr></thead><tbody>");
    for row in &rows[1..] {
        out.push_raw("<tr>");
        // Pad short rows, drop cells past header width: always rectangular
        for i in 0..width {
            out.push_raw("<td>");
            if let Some(cell) = row.get(i) {
                out.push(&format_inline(cell, opts));
            }
            out.push_raw("</td>");
        }
        out.push_raw("</tr>");
    }
    out.push_raw("</tbody></table>");
    out
}

fn render_list(items: &[String], opts: &Options) -> Html {
    let mut out = Html::new();
    out.push_raw("<ul>");
    for item in items {
        out.push_raw("<li>");
        out.push(&format_inline(item, opts));
        out.push_raw("</li>");
    }
    out.push_raw("</ul>");
    out
}

fn render_heading(level: usize, text: &str, opts: &Options) -> Html {
    let mut out = Html::new();
    if opts.heading_anchors {
        out.push_raw(&format!(r#"<h{} id="{}">"#, level, heading_slug(text)));
    } else {
        out.push_raw(&format!("<h{}>", level));
    }
    out.push(&format_inline(text, opts));
    out.push_raw(&format!("</h{}>", level));
    out
}

pub fn emit_html(
    ir: &[Block],
    fences: &[FencedCode],
    opts: &Options,
    highlighter: &dyn Highlighter,
) -> String {
    let mut fragments: Vec<Html> = Vec::new();

    for block in ir {
        match block {
            Block::Heading { level, text } => {
                fragments.push(render_heading(*level, text, opts));
            }
            Block::Paragraph { text } => {
                let mut p = Html::new();
                p.push_raw("<p>");
                p.push(&format_inline(text, opts));
                p.push_raw("</p>");
                fragments.push(p);
            }
            Block::List { items } => fragments.push(render_list(items, opts)),
            Block::Table { rows } => fragments.push(render_table(rows, opts)),
            Block::Rule => fragments.push(Html::raw("<hr>")),
            Block::CodeRef { index } => match fences.get(*index) {
                Some(fence) => fragments.push(render_code(fence, opts, highlighter)),
                // Literal placeholder text in the source, not one of ours
                None => {
                    let mut p = Html::new();
                    p.push_raw("<p>");
                    p.push_text(&format!("\u{27E6}CODE:{}\u{27E7}", index));
                    p.push_raw("</p>");
                    fragments.push(p);
                }
            },
            Block::Blank => {}
        }
    }

    fragments
        .iter()
        .map(Html::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{HighlightError, NoHighlight};

    struct StubHighlighter {
        fail: bool,
    }

    impl Highlighter for StubHighlighter {
        fn has_grammar(&self, lang: &str) -> bool {
            lang == "javascript" || lang == "ruby"
        }

        fn highlight(&self, code: &str, lang: &str) -> Result<String, HighlightError> {
            if self.fail {
                Err(HighlightError {
                    lang: lang.to_string(),
                    reason: "stub failure".to_string(),
                })
            } else {
                Ok(format!("<span class=\"hl\">{}</span>", escape(code)))
            }
        }
    }

    fn opts() -> Options {
        Options::default()
    }

    #[test]
    fn test_canonical_lang_aliases() {
        let o = opts();
        assert_eq!(canonical_lang("js", &o, &NoHighlight), "javascript");
        assert_eq!(canonical_lang("py", &o, &NoHighlight), "python");
        assert_eq!(canonical_lang("sh", &o, &NoHighlight), "bash");
        assert_eq!(canonical_lang("coffee", &o, &NoHighlight), "coffeescript");
        assert_eq!(canonical_lang("txt", &o, &NoHighlight), "plaintext");
        assert_eq!(canonical_lang("", &o, &NoHighlight), "plaintext");
    }

    #[test]
    fn test_canonical_lang_unknown_without_grammar() {
        assert_eq!(canonical_lang("brainfuck", &opts(), &NoHighlight), "plaintext");
    }

    #[test]
    fn test_canonical_lang_unknown_with_grammar() {
        let hl = StubHighlighter { fail: false };
        assert_eq!(canonical_lang("ruby", &opts(), &hl), "ruby");
    }

    #[test]
    fn test_canonical_lang_user_alias_wins() {
        let mut o = opts();
        o.lang_aliases.insert("rb".to_string(), "ruby".to_string());
        assert_eq!(canonical_lang("rb", &o, &NoHighlight), "ruby");
    }

    #[test]
    fn test_code_block_escaped_without_grammar() {
        let fence = FencedCode {
            index: 0,
            lang: "js".to_string(),
            content: "if (a < b) {}".to_string(),
        };
        let html = render_code(&fence, &opts(), &NoHighlight).into_string();
        assert_eq!(
            html,
            r#"<pre><code class="language-javascript">if (a &lt; b) {}</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_delegates_to_highlighter() {
        let fence = FencedCode {
            index: 0,
            lang: "js".to_string(),
            content: "let x = 1;".to_string(),
        };
        let hl = StubHighlighter { fail: false };
        let html = render_code(&fence, &opts(), &hl).into_string();
        assert!(html.contains(r#"<span class="hl">let x = 1;</span>"#));
    }

    #[test]
    fn test_code_block_falls_back_on_highlight_failure() {
        let fence = FencedCode {
            index: 0,
            lang: "js".to_string(),
            content: "let x = 1;".to_string(),
        };
        let hl = StubHighlighter { fail: true };
        let html = render_code(&fence, &opts(), &hl).into_string();
        assert_eq!(
            html,
            r#"<pre><code class="language-javascript">let x = 1;</code></pre>"#
        );
    }

    #[test]
    fn test_table_pads_short_rows() {
        let rows = vec![
            vec!["A".to_string(), "B".to_string()],
            vec!["1".to_string()],
        ];
        let html = render_table(&rows, &opts()).into_string();
        assert!(html.contains("<tr><td>1</td><td></td></tr>"));
    }

    #[test]
    fn test_table_truncates_long_rows() {
        let rows = vec![
            vec!["A".to_string()],
            vec!["1".to_string(), "extra".to_string()],
        ];
        let html = render_table(&rows, &opts()).into_string();
        assert!(html.contains("<tr><td>1</td></tr>"));
        assert!(!html.contains("extra"));
    }

    #[test]
    fn test_heading_anchor() {
        let mut o = opts();
        o.heading_anchors = true;
        let html = render_heading(2, "Getting Started", &o).into_string();
        assert_eq!(html, r#"<h2 id="getting-started">Getting Started</h2>"#);
    }

    #[test]
    fn test_blank_contributes_nothing() {
        let html = emit_html(&[Block::Blank], &[], &opts(), &NoHighlight);
        assert_eq!(html, "");
    }

    #[test]
    fn test_rule() {
        let html = emit_html(&[Block::Rule], &[], &opts(), &NoHighlight);
        assert_eq!(html, "<hr>");
    }
}
