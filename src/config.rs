use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Options {
    /// URLs starting with this prefix are internal links and keep navigation
    /// in the current tab.
    #[serde(default = "default_internal_prefix")]
    pub internal_prefix: String,

    /// Emit `id` attributes on headings, slugified from the heading text.
    #[serde(default)]
    pub heading_anchors: bool,

    /// Extra language aliases layered over the builtin table.
    #[serde(default)]
    pub lang_aliases: IndexMap<String, String>,
}

fn default_internal_prefix() -> String {
    "#".to_string()
}

impl Default for Options {
    fn default() -> Self {
        Options {
            internal_prefix: "#".to_string(),
            heading_anchors: false,
            lang_aliases: IndexMap::new(),
        }
    }
}
