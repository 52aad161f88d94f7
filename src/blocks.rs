use crate::ir::{FenceResult, FencedCode};
use regex::Regex;
use std::sync::LazyLock;

static RE_FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(`{3,})\s*([A-Za-z0-9_+#.-]*)\s*$").unwrap());

/// Extract fenced code into a side table, leaving `⟦CODE:n⟧` placeholder
/// lines behind. Fenced content is consumed verbatim, so no later pass can
/// reclassify it; an unterminated fence runs to end of input.
pub fn extract_fences(lines: &[String]) -> FenceResult {
    let mut fences: Vec<FencedCode> = Vec::new();
    let mut out: Vec<String> = Vec::new();
    let mut in_fence = false;
    let mut lang = String::new();
    let mut buf: Vec<String> = Vec::new();
    let mut fence = String::new();

    for line in lines {
        if !in_fence {
            if let Some(caps) = RE_FENCE_OPEN.captures(line.trim_end()) {
                in_fence = true;
                fence = caps[1].to_string();
                lang = caps.get(2).map_or("", |m| m.as_str()).to_string();
                buf.clear();
                continue;
            }
            out.push(line.clone());
        } else if line.trim_end() == fence {
            let idx = fences.len();
            fences.push(FencedCode {
                index: idx,
                lang: lang.clone(),
                content: buf.join("\n"),
            });
            out.push(format!("\u{27E6}CODE:{}\u{27E7}", idx));
            in_fence = false;
            fence.clear();
            lang.clear();
            buf.clear();
        } else {
            buf.push(line.clone());
        }
    }

    // Unterminated fence: emit what was collected, empty body included
    if in_fence {
        let idx = fences.len();
        fences.push(FencedCode {
            index: idx,
            lang,
            content: buf.join("\n"),
        });
        out.push(format!("\u{27E6}CODE:{}\u{27E7}", idx));
    }

    FenceResult { lines: out, fences }
}
