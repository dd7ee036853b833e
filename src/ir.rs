use serde::{Deserialize, Serialize};

use crate::placement::Point;

/// One point to label. Input order decides placement priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRequest {
    pub anchor: Point,
    pub text: String,
}

impl LabelRequest {
    pub fn new(anchor: Point, text: impl Into<String>) -> Self {
        Self {
            anchor,
            text: text.into(),
        }
    }
}

/// Clustered sample set used by `lplace --sample`.
pub fn sample_requests() -> Vec<LabelRequest> {
    [
        (1.0, 1.0, "A"),
        (1.5, 1.2, "B"),
        (2.0, 0.8, "C"),
        (4.0, 3.0, "D"),
        (4.5, 3.5, "E"),
        (3.8, 3.8, "F"),
        (2.0, 4.0, "G"),
        (2.5, 4.5, "H"),
        (5.5, 1.0, "I"),
        (1.0, 5.0, "J"),
    ]
    .into_iter()
    .map(|(x, y, text)| LabelRequest::new(Point::new(x, y), text))
    .collect()
}
