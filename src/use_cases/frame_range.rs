use crate::domain::{Diagnostics, FetchPlan, FrameCount};

// Turn a "<start>-<end>" expression into a fetch plan. Malformed input never
// fails the request; each bad part falls back and is reported.
pub fn parse_frame_range<D>(expression: Option<&str>, diagnostics: &D) -> FetchPlan
where
    D: Diagnostics + ?Sized,
{
    let Some(expression) = expression else {
        return FetchPlan::EVERYTHING;
    };

    let parts: Vec<&str> = expression.split('-').collect();
    let [start, end] = parts.as_slice() else {
        return FetchPlan::EVERYTHING;
    };

    let offset = match start.parse::<u64>() {
        Ok(offset) => offset,
        Err(err) => {
            diagnostics.input_recovered("frames.start", start, &err.to_string());
            // Without a known start the interval is indeterminate.
            return FetchPlan::EVERYTHING;
        }
    };

    let count = match end.parse::<u64>() {
        Ok(end) => FrameCount::Bounded(span(offset, end)),
        Err(err) => {
            diagnostics.input_recovered("frames.end", end, &err.to_string());
            FrameCount::Unbounded
        }
    };

    FetchPlan { offset, count }
}

// Inclusive length of offset..=end; negative when the range is inverted.
fn span(offset: u64, end: u64) -> i64 {
    let as_signed = |value: u64| i64::try_from(value).unwrap_or(i64::MAX);
    as_signed(end)
        .saturating_sub(as_signed(offset))
        .saturating_add(1)
}
