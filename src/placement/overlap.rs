use super::geometry::Rect;

/// Rects committed so far in one placement run.
///
/// Queries scan every committed rect. Never share one index between runs.
#[derive(Debug, Default, Clone)]
pub struct OverlapIndex {
    committed: Vec<Rect>,
}

impl OverlapIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_overlap(&self, candidate: &Rect) -> bool {
        self.committed
            .iter()
            .any(|existing| candidate.intersects(existing))
    }

    pub fn commit(&mut self, rect: Rect) {
        self.committed.push(rect);
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.committed.iter()
    }
}
