// Shared primitives for integration tests: a wiremock-backed fake engine and a
// one-time exporter server pointed at it.
#![allow(dead_code)]

use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const LONG_GAME_ID: &str = "game-250";
pub const LONG_GAME_FRAMES: u64 = 250;
pub const BROKEN_GAME_ID: &str = "broken";

static SERVER_URL: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

pub fn game_json(id: &str) -> Value {
    json!({
        "Game": {
            "ID": id,
            "Status": "complete",
            "Width": 7,
            "Height": 7
        }
    })
}

pub fn frame_json(turn: u64) -> Value {
    json!({
        "Turn": turn,
        "Snakes": [{
            "ID": "snake-1",
            "Name": "Pilot",
            "Color": "#00aaff",
            "Body": [{"X": 1, "Y": 1}, {"X": 1, "Y": 2}],
            "Health": 100,
            "Death": null
        }],
        "Food": [{"X": 5, "Y": 5}],
        "Hazards": []
    })
}

// Serves the frames page for a game of `total` turns, honoring offset/limit.
pub struct FramePages {
    pub total: u64,
}

impl Respond for FramePages {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let query = |key: &str| {
            request
                .url
                .query_pairs()
                .find(|(name, _)| name == key)
                .and_then(|(_, value)| value.parse::<u64>().ok())
        };
        let (Some(offset), Some(limit)) = (query("offset"), query("limit")) else {
            return ResponseTemplate::new(400);
        };

        let end = offset.saturating_add(limit).min(self.total);
        let frames: Vec<Value> = (offset..end).map(frame_json).collect();
        ResponseTemplate::new(200).set_body_json(json!({
            "Count": frames.len(),
            "Frames": frames
        }))
    }
}

// Mount the game document and paged frames for one game.
pub async fn mount_game(server: &MockServer, game_id: &str, total: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/games/{game_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(game_json(game_id)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/games/{game_id}/frames")))
        .respond_with(FramePages { total })
        .mount(server)
        .await;
}

// Ensure the exporter is running against the fake engine and return its base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Own runtime on an OS thread so the server outlives each #[tokio::test] runtime.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let engine = MockServer::start().await;
                mount_game(&engine, LONG_GAME_ID, LONG_GAME_FRAMES).await;
                Mock::given(method("GET"))
                    .and(path(format!("/games/{BROKEN_GAME_ID}")))
                    .respond_with(ResponseTemplate::new(502))
                    .mount(&engine)
                    .await;

                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));

                let settings = frame_exporter::ExporterSettings {
                    engine_url: engine.uri(),
                    home_url: "https://example.com/home".to_string(),
                };
                frame_exporter::run(listener, settings)
                    .await
                    .expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
