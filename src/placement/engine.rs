// Greedy first-fit placement. Each request is tried against everything
// committed before it; nothing is ever moved or revoked.

use tracing::{debug, info, trace, warn};

use super::candidates::candidates;
use super::error::{PlacementError, Result};
use super::overlap::OverlapIndex;
use super::{PlacedLabel, Placement, PlacementResult};
use crate::config::PlacementConfig;
use crate::ir::LabelRequest;

/// State for a single placement run.
///
/// Owns its overlap index, so independent runs never see each other's
/// commitments.
#[derive(Debug)]
pub struct Placer<'a> {
    config: &'a PlacementConfig,
    index: OverlapIndex,
    placed: Vec<PlacedLabel>,
}

impl<'a> Placer<'a> {
    pub fn new(config: &'a PlacementConfig) -> Result<Self> {
        validate_config(config)?;
        Ok(Self {
            config,
            index: OverlapIndex::new(),
            placed: Vec::new(),
        })
    }

    /// Place one request against everything committed so far.
    ///
    /// A request whose anchor is not finite is rejected on its own and the
    /// run carries on; it commits nothing. The same happens when one of its
    /// candidates cannot be represented (coordinate overflow).
    pub fn place(&mut self, request: &LabelRequest) -> Placement {
        let anchor = request.anchor;
        if !anchor.is_finite() {
            warn!(x = anchor.x, y = anchor.y, text = %request.text, "rejecting non-finite anchor");
            return Placement::Rejected(PlacementError::DegenerateInput {
                x: anchor.x,
                y: anchor.y,
            });
        }

        for (slot, candidate) in candidates(anchor, self.config).enumerate() {
            let rect = match candidate {
                Ok(rect) => rect,
                Err(err) => {
                    warn!(x = anchor.x, y = anchor.y, slot, "rejecting request: {err}");
                    return Placement::Rejected(err);
                }
            };
            if self.index.has_overlap(&rect) {
                trace!(x = anchor.x, y = anchor.y, slot, "candidate overlaps");
                continue;
            }
            self.index.commit(rect);
            let label = PlacedLabel {
                anchor,
                text: request.text.clone(),
                rect,
            };
            debug!(x = anchor.x, y = anchor.y, slot, text = %request.text, "placed label");
            self.placed.push(label.clone());
            return Placement::Placed(label);
        }

        debug!(x = anchor.x, y = anchor.y, text = %request.text, "no free candidate");
        Placement::Unplaced
    }

    pub fn placed(&self) -> &[PlacedLabel] {
        &self.placed
    }

    pub fn committed(&self) -> &OverlapIndex {
        &self.index
    }

    pub fn into_result(self) -> PlacementResult {
        PlacementResult {
            labels: self.placed,
        }
    }
}

fn validate_config(config: &PlacementConfig) -> Result<()> {
    let PlacementConfig {
        label_width,
        label_height,
        offsets,
    } = config;
    if !(label_width.is_finite() && *label_width > 0.0) {
        return Err(PlacementError::Configuration(format!(
            "label width must be positive and finite, got {label_width}"
        )));
    }
    if !(label_height.is_finite() && *label_height > 0.0) {
        return Err(PlacementError::Configuration(format!(
            "label height must be positive and finite, got {label_height}"
        )));
    }
    if offsets.is_empty() {
        return Err(PlacementError::Configuration(
            "at least one candidate offset is required".to_string(),
        ));
    }
    if let Some((idx, offset)) = offsets
        .iter()
        .enumerate()
        .find(|(_, o)| !(o.dx.is_finite() && o.dy.is_finite()))
    {
        return Err(PlacementError::Configuration(format!(
            "offset {idx} is not finite: ({}, {})",
            offset.dx, offset.dy
        )));
    }
    Ok(())
}

/// Run one placement pass over `requests` in order.
pub fn place_labels(
    requests: &[LabelRequest],
    config: &PlacementConfig,
) -> Result<PlacementResult> {
    place_labels_with_outcomes(requests, config).map(|(result, _)| result)
}

/// Like [`place_labels`], also returning one outcome per request.
pub fn place_labels_with_outcomes(
    requests: &[LabelRequest],
    config: &PlacementConfig,
) -> Result<(PlacementResult, Vec<Placement>)> {
    let mut placer = Placer::new(config)?;
    let outcomes: Vec<Placement> = requests.iter().map(|req| placer.place(req)).collect();
    let rejected = outcomes
        .iter()
        .filter(|o| matches!(o, Placement::Rejected(_)))
        .count();
    info!(
        requests = requests.len(),
        placed = placer.placed().len(),
        rejected,
        "placement finished"
    );
    Ok((placer.into_result(), outcomes))
}
