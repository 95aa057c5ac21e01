use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Range-operation header of a classic line diff, e.g. "3,5c2" or "5a6,7".
    static ref HEADER: Regex = Regex::new(r"^(\d+)(?:,(\d+))?([acd])(\d+)(?:,(\d+))?$").unwrap();
}

/// Operation kind of one diff header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOp {
    Add,
    Change,
    Delete,
}

/// 1-based line numbers implicated by one range operation, per document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    pub op: DiffOp,
    pub first: Vec<usize>,
    pub second: Vec<usize>,
}

/// Parse every range-operation header in a raw diff report. Content lines,
/// separators and blank lines carry no extra line-number information and are
/// skipped.
pub fn parse_diff(raw: &str) -> Vec<LineChange> {
    raw.lines().filter_map(parse_header).collect()
}

/// Parse a single header line. An add changes no lines in the first document
/// and a delete none in the second; the number on that side is only an
/// insertion anchor and must not be counted as a change.
pub fn parse_header(line: &str) -> Option<LineChange> {
    let caps = HEADER.captures(line.trim_end_matches('\r'))?;

    let start_first: usize = caps[1].parse().ok()?;
    let end_first = caps.get(2).and_then(|m| m.as_str().parse().ok());
    let op = match &caps[3] {
        "a" => DiffOp::Add,
        "c" => DiffOp::Change,
        _ => DiffOp::Delete,
    };
    let start_second: usize = caps[4].parse().ok()?;
    let end_second = caps.get(5).and_then(|m| m.as_str().parse().ok());

    let first = match op {
        DiffOp::Add => Vec::new(),
        _ => expand_range(start_first, end_first),
    };
    let second = match op {
        DiffOp::Delete => Vec::new(),
        _ => expand_range(start_second, end_second),
    };

    Some(LineChange { op, first, second })
}

/// All numbers from start to end inclusive; a bare start is a single line.
fn expand_range(start: usize, end: Option<usize>) -> Vec<usize> {
    let end = end.unwrap_or(start).max(start);
    (start..=end).collect()
}
