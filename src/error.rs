use serde::Serialize;

/// Which frame of a pair a keypoint index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameSide {
    Prev,
    Curr,
}

impl std::fmt::Display for FrameSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameSide::Prev => write!(f, "previous"),
            FrameSide::Curr => write!(f, "current"),
        }
    }
}

/// Input-contract violations. Degenerate numerics are never reported here;
/// they surface as NaN/infinite TTC values or missing associations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FusionError {
    KeypointIndexOutOfRange {
        side: FrameSide,
        index: usize,
        len: usize,
    },
    InvalidShrinkFactor {
        value: f64,
    },
}

impl std::fmt::Display for FusionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FusionError::KeypointIndexOutOfRange { side, index, len } => write!(
                f,
                "keypoint index {index} out of range for {side} frame ({len} keypoints)"
            ),
            FusionError::InvalidShrinkFactor { value } => {
                write!(f, "shrink factor {value} outside [0, 1)")
            }
        }
    }
}

impl std::error::Error for FusionError {}

/// Resolve both keypoints referenced by a match, failing fast on bad indices.
pub(crate) fn resolve_match<'a>(
    prev: &'a [crate::types::KeyPoint],
    curr: &'a [crate::types::KeyPoint],
    m: &crate::types::KeypointMatch,
) -> Result<(&'a crate::types::KeyPoint, &'a crate::types::KeyPoint), FusionError> {
    let kp_prev = prev
        .get(m.prev_idx)
        .ok_or(FusionError::KeypointIndexOutOfRange {
            side: FrameSide::Prev,
            index: m.prev_idx,
            len: prev.len(),
        })?;
    let kp_curr = curr
        .get(m.curr_idx)
        .ok_or(FusionError::KeypointIndexOutOfRange {
            side: FrameSide::Curr,
            index: m.curr_idx,
            len: curr.len(),
        })?;
    Ok((kp_prev, kp_curr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{KeyPoint, KeypointMatch};

    #[test]
    fn resolve_match_reports_offending_side() {
        let prev = vec![KeyPoint::new(0.0, 0.0)];
        let curr = vec![KeyPoint::new(1.0, 1.0)];
        let err = resolve_match(&prev, &curr, &KeypointMatch::new(0, 3)).unwrap_err();
        assert_eq!(
            err,
            FusionError::KeypointIndexOutOfRange {
                side: FrameSide::Curr,
                index: 3,
                len: 1
            }
        );
        assert!(err.to_string().contains("current frame"));
    }
}
