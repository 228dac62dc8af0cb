//! Cross-frame region association by match voting.
//!
//! Every match whose previous keypoint lies in previous region `A` and whose
//! current keypoint lies in current region `B` casts one vote for `(A, B)`.
//! Each previous region links to the current region with the most votes;
//! ties go to the current region listed first. A previous region with no
//! votes has no link.
use crate::error::{resolve_match, FusionError};
use crate::types::{KeyPoint, KeypointMatch, ObjectRegion, RegionId};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Best partner of one previous-frame region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionLink {
    pub prev_id: RegionId,
    /// `None` when no match connects the region to any current region.
    pub curr_id: Option<RegionId>,
    pub votes: usize,
}

/// Links for all previous-frame regions, in previous-region order.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct RegionMatches {
    pub links: Vec<RegionLink>,
}

impl RegionMatches {
    /// Current region matched to `prev_id`, if any.
    pub fn get(&self, prev_id: RegionId) -> Option<RegionId> {
        self.links
            .iter()
            .find(|l| l.prev_id == prev_id)
            .and_then(|l| l.curr_id)
    }

    /// Only the matched pairs, as a `prev → curr` map.
    pub fn to_map(&self) -> BTreeMap<RegionId, RegionId> {
        self.links
            .iter()
            .filter_map(|l| l.curr_id.map(|c| (l.prev_id, c)))
            .collect()
    }

    pub fn matched(&self) -> impl Iterator<Item = (RegionId, RegionId)> + '_ {
        self.links
            .iter()
            .filter_map(|l| l.curr_id.map(|c| (l.prev_id, c)))
    }
}

/// Associate previous-frame regions with current-frame regions.
pub fn match_regions(
    matches: &[KeypointMatch],
    kpts_prev: &[KeyPoint],
    kpts_curr: &[KeyPoint],
    prev_regions: &[ObjectRegion],
    curr_regions: &[ObjectRegion],
) -> Result<RegionMatches, FusionError> {
    let resolved = matches
        .iter()
        .map(|m| resolve_match(kpts_prev, kpts_curr, m))
        .collect::<Result<Vec<_>, _>>()?;

    let mut links = Vec::with_capacity(prev_regions.len());
    let mut votes = vec![0usize; curr_regions.len()];
    for prev_region in prev_regions {
        votes.iter_mut().for_each(|v| *v = 0);
        for (kp_prev, kp_curr) in &resolved {
            if !prev_region.roi.contains_keypoint(kp_prev) {
                continue;
            }
            for (slot, curr_region) in votes.iter_mut().zip(curr_regions) {
                if curr_region.roi.contains_keypoint(kp_curr) {
                    *slot += 1;
                }
            }
        }

        let mut best: Option<(usize, usize)> = None;
        for (idx, &count) in votes.iter().enumerate() {
            if count > 0 && best.map_or(true, |(_, b)| count > b) {
                best = Some((idx, count));
            }
        }
        let link = match best {
            Some((idx, count)) => RegionLink {
                prev_id: prev_region.id,
                curr_id: Some(curr_regions[idx].id),
                votes: count,
            },
            None => RegionLink {
                prev_id: prev_region.id,
                curr_id: None,
                votes: 0,
            },
        };
        debug!(
            "match_regions: {} => {:?} ({} votes)",
            link.prev_id, link.curr_id, link.votes
        );
        links.push(link);
    }
    Ok(RegionMatches { links })
}
