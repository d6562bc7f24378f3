// Use cases layer: range resolution, paginated retrieval and animation assembly.

pub mod animate;
pub mod fetch_frames;
pub mod frame_range;

#[cfg(test)]
pub(crate) mod test_support;

pub use animate::{AnimationAssembler, AnimationRequest, PreparedAnimation};
pub use fetch_frames::{FrameFetcher, MAX_BATCH_SIZE};
pub use frame_range::parse_frame_range;
