use crate::domain::{ExportError, FrameSource, Game, GameFrame};
use crate::interface_adapters::protocol::{GameFramesResponse, GameStatusResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

// Thin wrapper around reqwest for engine calls. Build it once at startup; the
// inner client pools connections and is cheap to clone.
#[derive(Clone)]
pub struct EngineClient {
    http: Client,
    base_url: Url,
}

impl EngineClient {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }

        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in new(), so path segments are always available here.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_document<T: DeserializeOwned>(&self, url: Url) -> Result<T, ExportError> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| ExportError::Transport(err.to_string()))?;
        let status = res.status();

        if !status.is_success() {
            return Err(ExportError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        // Read the whole body first so a dropped connection is reported as
        // transport, not as a malformed document.
        let body = res
            .bytes()
            .await
            .map_err(|err| ExportError::Transport(err.to_string()))?;
        serde_json::from_slice(&body).map_err(|err| ExportError::Decode(err.to_string()))
    }
}

#[async_trait]
impl FrameSource for EngineClient {
    async fn game(&self, game_id: &str) -> Result<Game, ExportError> {
        let url = self.endpoint(&["games", game_id]);
        let response: GameStatusResponse = self.get_document(url).await?;
        Ok(response.game)
    }

    async fn frames(
        &self,
        game_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<GameFrame>, ExportError> {
        let mut url = self.endpoint(&["games", game_id, "frames"]);
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());

        let response: GameFramesResponse = self.get_document(url).await?;
        Ok(response.frames)
    }
}
