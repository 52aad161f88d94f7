use clap::Parser;
use mdhtml::config::Options;
#[cfg(not(feature = "syntect"))]
use mdhtml::highlight::NoHighlight;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "mdhtml", about = "Markdown renderer — convert tutorial Markdown to HTML")]
struct Cli {
    /// Input file(s) or directory
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Prefix marking internal links (default: "#")
    #[arg(long)]
    internal_prefix: Option<String>,

    /// Emit id attributes on headings
    #[arg(long)]
    heading_anchors: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn load_options(path: &PathBuf) -> Options {
    let text = fs::read_to_string(path).unwrap_or_else(|e| die(&format!("cannot read config: {}", e)));
    serde_json::from_str(&text).unwrap_or_else(|e| die(&format!("invalid config JSON: {}", e)))
}

fn main() {
    let cli = Cli::parse();

    // Load options
    let mut options = if let Some(ref config_path) = cli.config {
        load_options(config_path)
    } else {
        let defaults = ["mdhtml.config.json", "config/mdhtml.config.json"];
        let mut loaded = None;
        for p in &defaults {
            let path = PathBuf::from(p);
            if path.is_file() {
                loaded = Some(load_options(&path));
                break;
            }
        }
        loaded.unwrap_or_default()
    };

    // CLI overrides
    if let Some(prefix) = cli.internal_prefix {
        options.internal_prefix = prefix;
    }
    if cli.heading_anchors {
        options.heading_anchors = true;
    }

    // Collect input files
    let files = mdhtml::list_files(&cli.inputs).unwrap_or_else(|e| die(&format!("{}", e)));
    if files.is_empty() {
        die("no input files found");
    }

    // Render all files as one document
    let mut all_text = String::new();
    for fp in &files {
        if !all_text.is_empty() {
            all_text.push('\n');
        }
        let content =
            fs::read_to_string(fp).unwrap_or_else(|e| die(&format!("cannot read {}: {}", fp.display(), e)));
        all_text.push_str(&content);
    }

    #[cfg(feature = "syntect")]
    let highlighter = mdhtml::highlight::SyntectHighlighter::new();
    #[cfg(not(feature = "syntect"))]
    let highlighter = NoHighlight;

    let mut result = mdhtml::render_with(&all_text, &options, &highlighter);
    result.push('\n');

    if let Some(ref output_path) = cli.output {
        fs::write(output_path, &result)
            .unwrap_or_else(|e| die(&format!("cannot write {}: {}", output_path.display(), e)));
        eprintln!(
            "rendered {} file(s) -> {} ({} bytes)",
            files.len(),
            output_path.display(),
            result.len()
        );
    } else {
        print!("{}", result);
    }
}
