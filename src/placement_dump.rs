use crate::config::PlacementConfig;
use crate::ir::LabelRequest;
use crate::placement::{Placement, PlacementResult, Point};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct PlacementDump {
    pub label_width: f64,
    pub label_height: f64,
    pub offsets: Vec<[f64; 2]>,
    pub total: usize,
    pub placed_count: usize,
    pub placed: Vec<PlacedDump>,
    pub unlabeled: Vec<UnlabeledDump>,
    pub rejected: Vec<RejectedDump>,
}

#[derive(Debug, Serialize)]
pub struct PlacedDump {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub min: [f64; 2],
    pub max: [f64; 2],
}

#[derive(Debug, Serialize)]
pub struct UnlabeledDump {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct RejectedDump {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub reason: String,
}

impl PlacementDump {
    /// `outcomes` holds one entry per request, in request order.
    pub fn from_outcomes(
        requests: &[LabelRequest],
        outcomes: &[Placement],
        config: &PlacementConfig,
    ) -> Self {
        let mut placed = Vec::new();
        let mut unlabeled = Vec::new();
        let mut rejected = Vec::new();
        for (req, outcome) in requests.iter().zip(outcomes) {
            match outcome {
                Placement::Placed(label) => placed.push(PlacedDump {
                    x: label.anchor.x,
                    y: label.anchor.y,
                    label: label.text.clone(),
                    min: point_pair(label.rect.min()),
                    max: point_pair(label.rect.max()),
                }),
                Placement::Unplaced => unlabeled.push(UnlabeledDump {
                    x: req.anchor.x,
                    y: req.anchor.y,
                    label: req.text.clone(),
                }),
                Placement::Rejected(err) => rejected.push(RejectedDump {
                    x: req.anchor.x,
                    y: req.anchor.y,
                    label: req.text.clone(),
                    reason: err.to_string(),
                }),
            }
        }

        PlacementDump {
            label_width: config.label_width,
            label_height: config.label_height,
            offsets: config.offsets.iter().map(|o| [o.dx, o.dy]).collect(),
            total: requests.len(),
            placed_count: placed.len(),
            placed,
            unlabeled,
            rejected,
        }
    }
}

fn point_pair(p: Point) -> [f64; 2] {
    [p.x, p.y]
}

/// Requests whose anchor matches no placed anchor exactly.
///
/// A request that shares its anchor with a placed duplicate counts as
/// labeled, same as any exact-equality lookup would report it. Use the
/// per-request [`Placement`] outcomes when the exact answer matters.
pub fn unlabeled<'a>(
    requests: &'a [LabelRequest],
    result: &PlacementResult,
) -> Vec<&'a LabelRequest> {
    requests
        .iter()
        .filter(|req| !result.has_anchor(req.anchor))
        .collect()
}

/// Text report: placed labels, then requests with no free candidate, then
/// rejected requests, then a summary line.
pub fn format_report(requests: &[LabelRequest], outcomes: &[Placement]) -> String {
    let mut out = String::new();
    let mut placed = 0;
    for label in outcomes.iter().filter_map(Placement::label) {
        let (min, max) = (label.rect.min(), label.rect.max());
        let _ = writeln!(
            out,
            "placed    ({}, {}) -> '{}' at [{},{}]-[{},{}]",
            label.anchor.x, label.anchor.y, label.text, min.x, min.y, max.x, max.y
        );
        placed += 1;
    }
    for (req, outcome) in requests.iter().zip(outcomes) {
        if let Placement::Unplaced = outcome {
            let _ = writeln!(
                out,
                "unlabeled ({}, {}) -> no label for '{}'",
                req.anchor.x, req.anchor.y, req.text
            );
        }
    }
    for (req, outcome) in requests.iter().zip(outcomes) {
        if let Placement::Rejected(err) = outcome {
            let _ = writeln!(
                out,
                "rejected  ({}, {}) -> '{}': {err}",
                req.anchor.x, req.anchor.y, req.text
            );
        }
    }
    let _ = writeln!(out, "Placed {placed} of {} labels.", requests.len());
    out
}

pub fn write_placement_dump(
    path: Option<&Path>,
    requests: &[LabelRequest],
    outcomes: &[Placement],
    config: &PlacementConfig,
) -> anyhow::Result<()> {
    let dump = PlacementDump::from_outcomes(requests, outcomes, config);
    match path {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&dump)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{place_labels, place_labels_with_outcomes};

    fn requests() -> Vec<LabelRequest> {
        vec![
            LabelRequest::new(Point::new(0.0, 0.0), "A"),
            LabelRequest::new(Point::new(0.5, 0.5), "B"),
            LabelRequest::new(Point::new(10.0, 0.0), "C"),
        ]
    }

    fn config() -> PlacementConfig {
        PlacementConfig {
            label_width: 1.0,
            label_height: 1.0,
            offsets: vec![crate::config::Offset::new(0.0, 0.0)],
        }
    }

    #[test]
    fn unlabeled_is_the_complement() {
        let requests = requests();
        let result = place_labels(&requests, &config()).unwrap();
        let missing = unlabeled(&requests, &result);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].text, "B");
    }

    #[test]
    fn report_lists_placed_then_unlabeled() {
        let requests = requests();
        let (_, outcomes) = place_labels_with_outcomes(&requests, &config()).unwrap();
        let report = format_report(&requests, &outcomes);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "placed    (0, 0) -> 'A' at [0,0]-[1,1]");
        assert!(lines[1].starts_with("placed    (10, 0) -> 'C'"));
        assert_eq!(lines[2], "unlabeled (0.5, 0.5) -> no label for 'B'");
        assert_eq!(lines[3], "Placed 2 of 3 labels.");
    }

    #[test]
    fn report_separates_rejected_from_unlabeled() {
        let mut requests = requests();
        requests.push(LabelRequest::new(Point::new(f64::NAN, 1.0), "bad"));
        let (_, outcomes) = place_labels_with_outcomes(&requests, &config()).unwrap();
        let report = format_report(&requests, &outcomes);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "unlabeled (0.5, 0.5) -> no label for 'B'");
        assert_eq!(
            lines[3],
            "rejected  (NaN, 1) -> 'bad': non-finite coordinate (NaN, 1)"
        );
        assert_eq!(lines[4], "Placed 2 of 4 labels.");
        assert!(!report.contains("no label for 'bad'"));
    }

    #[test]
    fn report_names_each_skipped_duplicate() {
        let requests = vec![
            LabelRequest::new(Point::new(0.0, 0.0), "first"),
            LabelRequest::new(Point::new(0.0, 0.0), "second"),
        ];
        let (result, outcomes) = place_labels_with_outcomes(&requests, &config()).unwrap();
        // Exact-anchor lookup cannot tell the duplicates apart.
        assert!(unlabeled(&requests, &result).is_empty());
        let report = format_report(&requests, &outcomes);
        assert!(report.contains("(0, 0) -> no label for 'second'"));
        assert!(report.ends_with("Placed 1 of 2 labels.\n"));
    }

    #[test]
    fn dump_serializes_counts_and_boxes() {
        let mut requests = requests();
        requests.push(LabelRequest::new(Point::new(f64::INFINITY, 0.0), "far"));
        let (_, outcomes) = place_labels_with_outcomes(&requests, &config()).unwrap();
        let dump = PlacementDump::from_outcomes(&requests, &outcomes, &config());
        let value = serde_json::to_value(&dump).unwrap();
        assert_eq!(value["total"], 4);
        assert_eq!(value["placed_count"], 2);
        assert_eq!(value["placed"][1]["min"], serde_json::json!([10.0, 0.0]));
        assert_eq!(value["unlabeled"][0]["label"], "B");
        assert_eq!(value["rejected"][0]["label"], "far");
        assert_eq!(
            value["rejected"][0]["reason"],
            "non-finite coordinate (inf, 0)"
        );
        assert_eq!(value["offsets"], serde_json::json!([[0.0, 0.0]]));
    }
}
