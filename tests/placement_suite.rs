use std::path::Path;

use point_labeler::{
    Config, LabelRequest, PlacementConfig, PlacementResult, Point, format_report, parse_points,
    place_labels, place_labels_with_outcomes, render_svg, unlabeled,
};
use proptest::prelude::*;

fn load_fixture(rel: &str) -> Vec<LabelRequest> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_points(&input).expect("parse failed")
}

fn assert_no_overlap(result: &PlacementResult, fixture: &str) {
    for (i, a) in result.labels.iter().enumerate() {
        for b in &result.labels[i + 1..] {
            assert!(
                !a.rect.intersects(&b.rect),
                "{fixture}: '{}' and '{}' overlap",
                a.text,
                b.text
            );
        }
    }
}

fn texts(result: &PlacementResult) -> Vec<&str> {
    result.labels.iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn render_all_fixtures() {
    let fixtures = [
        "clusters.txt",
        "wide_labels.txt",
        "coincident.txt",
        "grid.json",
    ];
    let config = Config::default();
    for rel in fixtures {
        let requests = load_fixture(rel);
        assert!(!requests.is_empty(), "{rel}: no points");
        let result = place_labels(&requests, &config.placement).expect("placement failed");
        assert_no_overlap(&result, rel);
        let svg = render_svg(&requests, &result, &config.theme, &config.render);
        assert!(svg.contains("<svg"), "{rel}: missing <svg tag");
        assert!(svg.contains("</svg>"), "{rel}: missing </svg tag");
    }
}

#[test]
fn clusters_fit_with_sample_config() {
    let requests = load_fixture("clusters.txt");
    let config = Config::sample();
    let result = place_labels(&requests, &config.placement).unwrap();
    assert_eq!(result.len(), 10);
    assert!(unlabeled(&requests, &result).is_empty());
    // Every label lands top-right of its point.
    for label in &result {
        assert!(label.rect.min().x > label.anchor.x);
        assert!(label.rect.min().y > label.anchor.y);
    }
}

#[test]
fn wide_labels_fall_back_to_top_left() {
    let requests = load_fixture("wide_labels.txt");
    let result = place_labels(&requests, &PlacementConfig::default()).unwrap();
    assert_eq!(result.len(), 5);
    let e = &result.labels[4];
    assert_eq!(e.text, "Label E");
    assert_eq!(e.rect.min(), Point::new(-5.0, 3.0));
    assert_eq!(e.rect.max(), Point::new(1.0, 5.0));
    for label in &result {
        assert!(!label.rect.contains_point(label.anchor));
    }
}

#[test]
fn coincident_points_exhaust_after_four() {
    let requests = load_fixture("coincident.txt");
    let config = PlacementConfig::four_corner(2.0, 1.0, 0.5);
    let (result, outcomes) = place_labels_with_outcomes(&requests, &config).unwrap();
    assert_eq!(texts(&result), vec!["first", "second", "third", "fourth"]);

    let report = format_report(&requests, &outcomes);
    assert!(
        report.contains("'fourth' at [-2.5,-1.5]-[-0.5,-0.5]"),
        "{report}"
    );
    // All five share one anchor, so exact-match lookup sees none as unlabeled.
    assert!(unlabeled(&requests, &result).is_empty());
    // The outcomes still name the one that was skipped.
    assert!(report.contains("no label for 'fifth'"));
    assert!(!report.contains("rejected"));
    assert!(report.ends_with("Placed 4 of 5 labels.\n"));
}

#[test]
fn dense_grid_leaves_gaps() {
    let requests = load_fixture("grid.json");
    assert_eq!(requests.len(), 25);
    let config = PlacementConfig::four_corner(1.5, 0.6, 0.1);
    let result = place_labels(&requests, &config).unwrap();
    assert_no_overlap(&result, "grid.json");
    assert_eq!(result.len(), 17);
    let missing: Vec<&str> = unlabeled(&requests, &result)
        .iter()
        .map(|r| r.text.as_str())
        .collect();
    assert_eq!(
        missing,
        vec![
            "r1c1", "r1c3", "r2c1", "r2c3", "r3c1", "r3c3", "r4c1", "r4c3"
        ]
    );
}

fn request_strategy() -> impl Strategy<Value = Vec<LabelRequest>> {
    prop::collection::vec((-20i32..20, -20i32..20, "[a-z]{0,4}"), 0..40).prop_map(|items| {
        items
            .into_iter()
            .map(|(x, y, text)| LabelRequest::new(Point::new(x as f64 * 0.5, y as f64 * 0.5), text))
            .collect()
    })
}

fn config_strategy() -> impl Strategy<Value = PlacementConfig> {
    (1u32..8, 1u32..6, 0u32..4).prop_map(|(w, h, m)| {
        PlacementConfig::four_corner(w as f64 * 0.5, h as f64 * 0.5, m as f64 * 0.25)
    })
}

proptest! {
    #[test]
    fn placed_labels_never_overlap(requests in request_strategy(), config in config_strategy()) {
        let result = place_labels(&requests, &config).unwrap();
        for (i, a) in result.labels.iter().enumerate() {
            for b in &result.labels[i + 1..] {
                prop_assert!(!a.rect.intersects(&b.rect));
            }
        }
    }

    #[test]
    fn placement_is_deterministic(requests in request_strategy(), config in config_strategy()) {
        let first = place_labels(&requests, &config).unwrap();
        let second = place_labels(&requests, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn result_follows_input_order(requests in request_strategy(), config in config_strategy()) {
        let result = place_labels(&requests, &config).unwrap();
        let mut cursor = 0;
        for label in &result {
            let pos = requests[cursor..]
                .iter()
                .position(|r| r.anchor == label.anchor && r.text == label.text);
            prop_assert!(pos.is_some());
            cursor += pos.unwrap_or(0) + 1;
        }
    }

    #[test]
    fn later_requests_never_revoke(requests in request_strategy(), config in config_strategy(), cut in 0usize..40) {
        let cut = cut.min(requests.len());
        let full = place_labels(&requests, &config).unwrap();
        let prefix = place_labels(&requests[..cut], &config).unwrap();
        prop_assert!(prefix.len() <= full.len());
        prop_assert_eq!(&full.labels[..prefix.len()], &prefix.labels[..]);
    }
}
