pub mod blocks;
pub mod config;
pub mod emit;
pub mod escape;
pub mod highlight;
pub mod inline;
pub mod ir;
pub mod normalize;
pub mod parse;
pub mod slug;

use config::Options;
use highlight::{Highlighter, NoHighlight};
use std::io;
use std::path::PathBuf;

/// Render a Markdown document to an HTML string with default options and no
/// syntax highlighting. Malformed input is never an error; empty input
/// yields an empty string.
pub fn render(text: &str) -> String {
    render_with(text, &Options::default(), &NoHighlight)
}

/// Render a Markdown document to an HTML string.
pub fn render_with(text: &str, options: &Options, highlighter: &dyn Highlighter) -> String {
    // Stage 0
    let lines = normalize::lines(text);

    // Stage 1
    let ir::FenceResult { lines, fences } = blocks::extract_fences(&lines);

    // Stage 2
    let ir = parse::segment(&lines);

    // Stage 3
    emit::emit_html(&ir, &fences, options, highlighter)
}

pub fn list_files(inputs: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let re = regex::Regex::new(r"(?i)\.(md|markdown)$").unwrap();
    let mut out: Vec<PathBuf> = Vec::new();

    for p in inputs {
        if p.is_dir() {
            for entry in std::fs::read_dir(p)? {
                let entry = entry?;
                let sub_path = entry.path();
                if sub_path.is_dir() {
                    let sub_files = list_files(&[sub_path])?;
                    out.extend(sub_files);
                } else if sub_path.is_file() {
                    if let Some(path_str) = sub_path.to_str() {
                        if re.is_match(path_str) {
                            out.push(sub_path);
                        }
                    }
                }
            }
        } else if p.is_file() {
            if let Some(path_str) = p.to_str() {
                if re.is_match(path_str) {
                    out.push(p.clone());
                }
            }
        }
    }

    out.sort();
    Ok(out)
}
