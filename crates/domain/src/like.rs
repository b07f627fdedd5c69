/// Like count of a content item together with the caller's voter status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeStatus {
    /// Number of likes recorded for the item.
    pub count: i64,
    /// Whether the caller already liked the item.
    pub has_voted: bool,
}

/// Outcome of a successfully recorded vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteReceipt {
    /// Like count after the vote was applied.
    pub count: i64,
}
