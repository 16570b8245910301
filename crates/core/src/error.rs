use thiserror::Error;

/// A malformed interval tree, reported by [`IntervalNode::validate`].
///
/// [`IntervalNode::validate`]: crate::model::IntervalNode::validate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("interval [{start}, {end}) ends before it starts")]
    InvertedInterval { start: i64, end: i64 },
    #[error("child [{start}, {end}) escapes parent [{parent_start}, {parent_end})")]
    EscapesParent {
        start: i64,
        end: i64,
        parent_start: i64,
        parent_end: i64,
    },
    #[error("child starting at {start} follows a sibling starting at {previous}")]
    OutOfOrder { start: i64, previous: i64 },
    #[error("child at depth {found} under a parent at depth {parent}")]
    DepthMismatch { parent: u32, found: u32 },
    #[error("depth {depth} exceeds the limit of {limit}")]
    TooDeep { depth: u32, limit: u32 },
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid tree: {0}")]
    InvalidTree(#[from] TreeError),
    #[error("a node renderer is required")]
    MissingRenderer,
    #[error("reducer returned {rectangles} rectangles for {nodes} nodes")]
    ReducerLengthMismatch { rectangles: usize, nodes: usize },
}
