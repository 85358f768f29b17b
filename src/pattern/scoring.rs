use super::segment::{SegmentKind, classify_segment};

pub const HIGH_PRIORITY_RANK_BONUS: u32 = 1000;

#[inline]
pub fn segment_rank(kind: SegmentKind) -> u32 {
    match kind {
        SegmentKind::Wildcard => 0,
        SegmentKind::Dynamic => 1,
        SegmentKind::Static => 2,
    }
}

/// Structural specificity of a template. Only the leading `/` is dropped;
/// any other empty segment (root, doubled or trailing slash) is static.
pub fn rank_template(template: &str) -> u32 {
    template
        .strip_prefix('/')
        .unwrap_or(template)
        .split('/')
        .map(|seg| segment_rank(classify_segment(seg)))
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankPolicy {
    high_priority_bonus: u32,
}

impl Default for RankPolicy {
    fn default() -> Self {
        Self {
            high_priority_bonus: HIGH_PRIORITY_RANK_BONUS,
        }
    }
}

impl RankPolicy {
    pub fn new(high_priority_bonus: u32) -> Self {
        Self {
            high_priority_bonus,
        }
    }

    pub fn high_priority_bonus(&self) -> u32 {
        self.high_priority_bonus
    }

    pub fn score(&self, template: &str, high_priority: bool) -> u32 {
        let bonus = if high_priority {
            self.high_priority_bonus
        } else {
            0
        };
        bonus.saturating_add(rank_template(template))
    }
}
