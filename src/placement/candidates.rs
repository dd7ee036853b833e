use std::slice;

use super::error::Result;
use super::geometry::{Point, Rect};
use crate::config::{Offset, PlacementConfig};

/// Lazily yields one candidate rect per configured offset, in configured order.
///
/// Order is priority: nothing is reordered, deduplicated or filtered.
pub struct Candidates<'a> {
    anchor: Point,
    width: f64,
    height: f64,
    offsets: slice::Iter<'a, Offset>,
}

pub fn candidates(anchor: Point, config: &PlacementConfig) -> Candidates<'_> {
    Candidates {
        anchor,
        width: config.label_width,
        height: config.label_height,
        offsets: config.offsets.iter(),
    }
}

impl Iterator for Candidates<'_> {
    type Item = Result<Rect>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.offsets.next()?;
        let corner1 = self.anchor.translate(offset.dx, offset.dy);
        let corner2 = corner1.translate(self.width, self.height);
        Some(Rect::from_corners(corner1, corner2))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl ExactSizeIterator for Candidates<'_> {}
