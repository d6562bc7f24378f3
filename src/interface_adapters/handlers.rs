use crate::domain::{
    AnimatedRenderer, ExportError, Game, GameFrame, RequestContext, StillRenderer,
};
use crate::interface_adapters::protocol::AnimationQuery;
use crate::interface_adapters::state::AppState;
use crate::interface_adapters::streaming::stream_render;
use crate::use_cases::{AnimationAssembler, AnimationRequest, FrameFetcher};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::io::Write;
use std::sync::Arc;

pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, state.home_url.clone())],
    )
        .into_response()
}

pub async fn healthz() -> &'static str {
    "ok"
}

#[tracing::instrument(name = "ascii_frame", skip_all, fields(game_id = %game_id, frame = frame))]
pub async fn ascii_frame(
    State(state): State<Arc<AppState>>,
    Path((game_id, frame)): Path<(String, u64)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let renderer = state.ascii.clone();
    let request = request_context(&method, &uri, &headers);
    still_frame(state, renderer, &game_id, frame, request).await
}

#[tracing::instrument(name = "gif_frame", skip_all, fields(game_id = %game_id, frame = frame))]
pub async fn gif_frame(
    State(state): State<Arc<AppState>>,
    Path((game_id, frame)): Path<(String, u64)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let renderer = state.still_gif.clone();
    let request = request_context(&method, &uri, &headers);
    still_frame(state, renderer, &game_id, frame, request).await
}

#[tracing::instrument(name = "animated_game", skip_all, fields(game_id = %game_id))]
pub async fn animated_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    Query(query): Query<AnimationQuery>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let request = request_context(&method, &uri, &headers);
    let assembler = AnimationAssembler {
        fetcher: FrameFetcher::new(state.engine.clone()),
        renderer: state.animation.clone(),
        diagnostics: state.diagnostics.clone(),
    };

    let prepared = match assembler.prepare(&game_id, &AnimationRequest::from(query)).await {
        Ok(prepared) => prepared,
        Err(err) => return handle_error(&state, &request, err),
    };
    tracing::info!(frames = prepared.frames.len(), "exporting animation");

    let content_type = AnimatedRenderer::content_type(&assembler.renderer);
    stream_response(state, request, content_type, move |dest: &mut dyn Write| {
        assembler.render(dest, &prepared.game, &prepared.frames, prepared.timing)
    })
    .await
}

async fn still_frame(
    state: Arc<AppState>,
    renderer: Arc<dyn StillRenderer>,
    game_id: &str,
    frame: u64,
    request: RequestContext,
) -> Response {
    let (game, frame) = match fetch_still(&state, game_id, frame).await {
        Ok(fetched) => fetched,
        Err(err) => return handle_error(&state, &request, err),
    };

    let content_type = StillRenderer::content_type(&renderer);
    stream_response(state, request, content_type, move |dest: &mut dyn Write| {
        renderer.render_still(dest, &game, &frame)
    })
    .await
}

async fn fetch_still(
    state: &AppState,
    game_id: &str,
    frame: u64,
) -> Result<(Game, GameFrame), ExportError> {
    let fetcher = FrameFetcher::new(state.engine.clone());
    let game = fetcher.fetch_game(game_id).await?;
    let frame = fetcher.fetch_single_frame(&game.id, frame).await?;
    Ok((game, frame))
}

// Status and headers go out once rendering has produced its first bytes.
async fn stream_response<F>(
    state: Arc<AppState>,
    request: RequestContext,
    content_type: &'static str,
    render: F,
) -> Response
where
    F: FnOnce(&mut dyn Write) -> Result<(), ExportError> + Send + 'static,
{
    let late_state = state.clone();
    let late_request = request.clone();
    let on_late_failure = move |err: &ExportError| {
        late_state.diagnostics.request_failed(&late_request, err);
    };

    match stream_render(render, on_late_failure).await {
        Ok(body) => ([(header::CONTENT_TYPE, content_type)], body).into_response(),
        Err(err) => handle_error(&state, &request, err),
    }
}

fn request_context(method: &Method, uri: &Uri, headers: &HeaderMap) -> RequestContext {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    RequestContext {
        method: method.to_string(),
        url: uri.to_string(),
        user_agent: header_text(header::USER_AGENT),
        referrer: header_text(header::REFERER),
    }
}

// Every failure in the export chain becomes a 500 carrying the error text.
fn handle_error(state: &AppState, request: &RequestContext, err: ExportError) -> Response {
    state.diagnostics.request_failed(request, &err);
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}
