// Resolved retrieval query consumed once by the frame fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPlan {
    pub offset: u64,
    pub count: FrameCount,
}

impl FetchPlan {
    pub const EVERYTHING: FetchPlan = FetchPlan {
        offset: 0,
        count: FrameCount::Unbounded,
    };
}

// A bounded count can be zero or negative when the range is inverted; both
// resolve to "no frames".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCount {
    Bounded(i64),
    Unbounded,
}

impl FrameCount {
    // Number of frames still wanted, or None when fetching until exhaustion.
    pub fn limit(self) -> Option<u64> {
        match self {
            FrameCount::Bounded(count) => Some(u64::try_from(count).unwrap_or(0)),
            FrameCount::Unbounded => None,
        }
    }
}

// Per-frame and end-of-loop delays, both in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub frame_delay_ms: u32,
    pub loop_delay_ms: u32,
}
