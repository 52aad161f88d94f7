use thiserror::Error;

#[derive(Debug, Error)]
#[error("highlight failed for language {lang}: {reason}")]
pub struct HighlightError {
    pub lang: String,
    pub reason: String,
}

/// Injected syntax-highlighting capability. Highlighting is an enhancement,
/// never a correctness dependency: the renderer treats every call as fallible
/// and falls back to escaped plain text on any error.
///
/// `highlight` must return markup that is already HTML-safe for splicing
/// inside `<pre><code>`.
pub trait Highlighter {
    fn has_grammar(&self, lang: &str) -> bool;
    fn highlight(&self, code: &str, lang: &str) -> Result<String, HighlightError>;
}

/// Default capability: declares no grammars, so every code block renders as
/// escaped plain text.
pub struct NoHighlight;

impl Highlighter for NoHighlight {
    fn has_grammar(&self, _lang: &str) -> bool {
        false
    }

    fn highlight(&self, _code: &str, lang: &str) -> Result<String, HighlightError> {
        Err(HighlightError {
            lang: lang.to_string(),
            reason: "no grammars available".to_string(),
        })
    }
}

#[cfg(feature = "syntect")]
pub use self::syntect_impl::SyntectHighlighter;

#[cfg(feature = "syntect")]
mod syntect_impl {
    use super::{HighlightError, Highlighter};
    use syntect::html::{ClassStyle, ClassedHTMLGenerator};
    use syntect::parsing::SyntaxSet;
    use syntect::util::LinesWithEndings;

    /// Class-based syntect adapter; emits `<span class="...">` markup for
    /// styling by an external stylesheet.
    pub struct SyntectHighlighter {
        syntaxes: SyntaxSet,
    }

    impl SyntectHighlighter {
        pub fn new() -> Self {
            SyntectHighlighter {
                syntaxes: SyntaxSet::load_defaults_newlines(),
            }
        }
    }

    impl Default for SyntectHighlighter {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Highlighter for SyntectHighlighter {
        fn has_grammar(&self, lang: &str) -> bool {
            self.syntaxes.find_syntax_by_token(lang).is_some()
        }

        fn highlight(&self, code: &str, lang: &str) -> Result<String, HighlightError> {
            let syntax = self.syntaxes.find_syntax_by_token(lang).ok_or_else(|| {
                HighlightError {
                    lang: lang.to_string(),
                    reason: "no grammar".to_string(),
                }
            })?;
            let mut generator = ClassedHTMLGenerator::new_with_class_style(
                syntax,
                &self.syntaxes,
                ClassStyle::Spaced,
            );
            for line in LinesWithEndings::from(code) {
                generator
                    .parse_html_for_line_which_includes_newline(line)
                    .map_err(|e| HighlightError {
                        lang: lang.to_string(),
                        reason: e.to_string(),
                    })?;
            }
            Ok(generator.finalize())
        }
    }
}
