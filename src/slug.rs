use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_-]").unwrap());
static RE_LEADING_TRAILING_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-+|-+$").unwrap());

/// Slug for a heading `id` attribute: NFKC fold, lowercase, whitespace to
/// dashes, everything else dropped.
pub fn heading_slug(text: &str) -> String {
    let s: String = text.nfkc().collect();
    let s = s.trim().to_lowercase();
    let s = RE_WHITESPACE.replace_all(&s, "-").to_string();
    let s = RE_NON_SLUG.replace_all(&s, "").to_string();
    RE_LEADING_TRAILING_DASH.replace_all(&s, "").to_string()
}
