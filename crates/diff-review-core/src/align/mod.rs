//! Intra-line token alignment for paired removed/added lines.

mod inline;

pub use inline::{align_pair, AlignedPair, InlineSegment, SegmentKind};
