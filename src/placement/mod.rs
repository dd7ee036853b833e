//! Label placement core: geometry, candidate generation, overlap checks and
//! the greedy placement engine.

mod candidates;
mod engine;
mod error;
mod geometry;
mod overlap;

use serde::Serialize;

pub use candidates::{Candidates, candidates};
pub use engine::{Placer, place_labels, place_labels_with_outcomes};
pub use error::{PlacementError, Result};
pub use geometry::{Point, Rect};
pub use overlap::OverlapIndex;

/// A committed label. Never modified after the engine creates it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLabel {
    pub anchor: Point,
    pub text: String,
    pub rect: Rect,
}

/// Committed labels in input order. Failed requests are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlacementResult {
    pub labels: Vec<PlacedLabel>,
}

impl PlacementResult {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedLabel> {
        self.labels.iter()
    }

    /// Exact anchor match, the way callers recover the unlabeled complement.
    pub fn has_anchor(&self, anchor: Point) -> bool {
        self.labels.iter().any(|label| label.anchor == anchor)
    }
}

impl<'a> IntoIterator for &'a PlacementResult {
    type Item = &'a PlacedLabel;
    type IntoIter = std::slice::Iter<'a, PlacedLabel>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

/// What happened to one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Placed(PlacedLabel),
    /// Every candidate overlapped an earlier commitment.
    Unplaced,
    /// The request itself was malformed; the run continued without it.
    Rejected(PlacementError),
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed(_))
    }

    pub fn label(&self) -> Option<&PlacedLabel> {
        match self {
            Placement::Placed(label) => Some(label),
            _ => None,
        }
    }
}
