use crate::ir::LabelRequest;
use crate::placement::Point;
use anyhow::{Context, Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    let num = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?|(?i:[-+]?inf(?:inity)?|nan)";
    Regex::new(&format!(
        r"^(?P<x>{num})\s*(?:,\s*|\s+)(?P<y>{num})(?:\s*,\s*|\s+|$)(?P<label>.*)$"
    ))
    .unwrap()
});

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PointEntry {
    Object {
        x: f64,
        y: f64,
        #[serde(default, alias = "text")]
        label: String,
    },
    Labeled(f64, f64, String),
    Bare(f64, f64),
}

impl From<PointEntry> for LabelRequest {
    fn from(entry: PointEntry) -> Self {
        match entry {
            PointEntry::Object { x, y, label } | PointEntry::Labeled(x, y, label) => {
                LabelRequest::new(Point::new(x, y), label)
            }
            PointEntry::Bare(x, y) => LabelRequest::new(Point::new(x, y), ""),
        }
    }
}

/// Parse a point file. A leading `[` selects JSON5, anything else the line
/// format (`x y label` or `x, y, label`, `#` comments).
pub fn parse_points(input: &str) -> Result<Vec<LabelRequest>> {
    if input.trim_start().starts_with('[') {
        return parse_json_points(input);
    }
    parse_line_points(input)
}

fn parse_json_points(input: &str) -> Result<Vec<LabelRequest>> {
    let entries: Vec<PointEntry> = json5::from_str(input).context("Invalid JSON point list")?;
    Ok(entries.into_iter().map(LabelRequest::from).collect())
}

fn parse_line_points(input: &str) -> Result<Vec<LabelRequest>> {
    let mut requests = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let caps = LINE_RE
            .captures(line)
            .ok_or_else(|| anyhow!("line {}: expected 'x y label', got '{}'", idx + 1, line))?;
        let x = parse_coord(&caps["x"], idx)?;
        let y = parse_coord(&caps["y"], idx)?;
        let label = unquote(caps["label"].trim());
        requests.push(LabelRequest::new(Point::new(x, y), label));
    }
    Ok(requests)
}

fn parse_coord(token: &str, idx: usize) -> Result<f64> {
    token
        .parse::<f64>()
        .with_context(|| format!("line {}: invalid coordinate '{}'", idx + 1, token))
}

fn unquote(label: &str) -> &str {
    label
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(label)
}
