use crate::domain::{Game, GameFrame};
use crate::use_cases::AnimationRequest;
use serde::Deserialize;

// Envelope returned by GET /games/{id}.
#[derive(Debug, Deserialize)]
pub struct GameStatusResponse {
    #[serde(rename = "Game")]
    pub game: Game,
}

// Envelope returned by GET /games/{id}/frames.
#[derive(Debug, Deserialize)]
pub struct GameFramesResponse {
    // The engine sends null instead of [] once the game is exhausted.
    #[serde(rename = "Frames", default, deserialize_with = "null_as_empty")]
    pub frames: Vec<GameFrame>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<GameFrame>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<GameFrame>>::deserialize(deserializer)?.unwrap_or_default())
}

// Query string accepted by the animated export route. Values stay raw strings
// so malformed numbers can fall back instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct AnimationQuery {
    pub frames: Option<String>,
    #[serde(rename = "frameDelay")]
    pub frame_delay: Option<String>,
    #[serde(rename = "loopDelay")]
    pub loop_delay: Option<String>,
}

impl From<AnimationQuery> for AnimationRequest {
    fn from(query: AnimationQuery) -> Self {
        AnimationRequest {
            frames: query.frames,
            frame_delay: query.frame_delay,
            loop_delay: query.loop_delay,
        }
    }
}
