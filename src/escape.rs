/// An HTML fragment whose contents are already safe to splice into a page.
///
/// Literal text only enters a fragment through [`Html::text`], which escapes
/// it exactly once; fragments concatenate without re-escaping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Html(String);

impl Html {
    pub fn new() -> Self {
        Html(String::new())
    }

    /// Escape literal text into a fragment.
    pub fn text(text: &str) -> Self {
        Html(escape(text))
    }

    /// Wrap markup that is already escaped or generated. Crate-private so
    /// callers outside the renderer cannot smuggle raw text past escaping.
    pub(crate) fn raw(markup: impl Into<String>) -> Self {
        Html(markup.into())
    }

    pub fn push(&mut self, fragment: &Html) {
        self.0.push_str(&fragment.0);
    }

    pub fn push_text(&mut self, text: &str) {
        escape_into(&mut self.0, text);
    }

    pub(crate) fn push_raw(&mut self, markup: &str) {
        self.0.push_str(markup);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text);
    out
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
