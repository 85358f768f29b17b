mod error;
mod matcher;
mod scoring;
mod segment;

pub use error::{PatternError, PatternResult};
pub use matcher::PatternMatcher;
pub use scoring::{HIGH_PRIORITY_RANK_BONUS, RankPolicy, rank_template, segment_rank};
pub use segment::{SegmentKind, SegmentPart, SegmentPattern, classify_segment, parse_template};
