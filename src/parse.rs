use crate::ir::Block;
use regex::Regex;
use std::sync::LazyLock;

static RE_RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*_]{3,}$").unwrap());
static RE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static RE_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([-*])\s+(.+)$").unwrap());
static RE_CODE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\u{27E6}CODE:(\d+)\u{27E7}$").unwrap());
static RE_TABLE_SEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[|\s:-]+$").unwrap());

fn is_table_line(line: &str) -> bool {
    let t = line.trim();
    t.len() >= 2 && t.starts_with('|') && t.ends_with('|')
}

fn is_structural(line: &str) -> bool {
    let t = line.trim();
    if t.is_empty() {
        return true;
    }
    if RE_CODE_REF.is_match(t) || RE_RULE.is_match(t) || RE_HEADING.is_match(t) {
        return true;
    }
    if is_table_line(t) {
        return true;
    }
    RE_LIST.is_match(line)
}

fn parse_table_row(row: &str) -> Vec<String> {
    let mut cells: Vec<String> = row.split('|').map(|c| c.trim().to_string()).collect();
    if !cells.is_empty() && cells[0].is_empty() {
        cells.remove(0);
    }
    if !cells.is_empty() && cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

/// Classify fence-free lines into blocks, greedy first-match at the start of
/// each unconsumed line. Every line lands in exactly one block; once a run
/// ends the decision is final and earlier lines are never re-examined.
pub fn segment(lines: &[String]) -> Vec<Block> {
    let mut ir: Vec<Block> = Vec::new();
    let mut i = 0;
    let n = lines.len();

    while i < n {
        let line = &lines[i];
        let t = line.trim();

        if t.is_empty() {
            ir.push(Block::Blank);
            i += 1;
            continue;
        }

        if let Some(caps) = RE_CODE_REF.captures(t) {
            // An unparseable index means the line is document text that
            // merely looks like a placeholder; let it fall through.
            if let Ok(index) = caps[1].parse::<usize>() {
                ir.push(Block::CodeRef { index });
                i += 1;
                continue;
            }
        }

        if RE_RULE.is_match(t) {
            ir.push(Block::Rule);
            i += 1;
            continue;
        }

        if let Some(caps) = RE_HEADING.captures(t) {
            let level = caps[1].len();
            let text = caps[2].trim().to_string();
            ir.push(Block::Heading { level, text });
            i += 1;
            continue;
        }

        if is_table_line(t) {
            let mut rows: Vec<Vec<String>> = vec![parse_table_row(t)];
            let mut j = i + 1;
            while j < n && is_table_line(&lines[j]) {
                rows.push(parse_table_row(lines[j].trim()));
                j += 1;
            }
            if rows.len() >= 2 {
                // A separator as the second line is shape only, not a row
                if RE_TABLE_SEP.is_match(lines[i + 1].trim()) {
                    rows.remove(1);
                }
                ir.push(Block::Table { rows });
                i = j;
                continue;
            }
            // Lone pipe line: downgrade to a paragraph, decision final
            ir.push(Block::Paragraph { text: t.to_string() });
            i += 1;
            continue;
        }

        if RE_LIST.is_match(line) {
            let mut items: Vec<String> = Vec::new();
            while i < n {
                if let Some(caps) = RE_LIST.captures(&lines[i]) {
                    items.push(caps[3].trim().to_string());
                    i += 1;
                } else if lines[i].trim().is_empty() {
                    // Blank lines inside a run are absorbed
                    i += 1;
                } else {
                    break;
                }
            }
            ir.push(Block::List { items });
            continue;
        }

        // Paragraph: merge contiguous non-structural lines
        let mut para_lines = vec![t.to_string()];
        i += 1;
        while i < n {
            let nl = lines[i].trim();
            if nl.is_empty() || is_structural(&lines[i]) {
                break;
            }
            para_lines.push(nl.to_string());
            i += 1;
        }
        ir.push(Block::Paragraph {
            text: para_lines.join(" "),
        });
    }
    ir
}
