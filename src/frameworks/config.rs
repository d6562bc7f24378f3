use std::env;

// Runtime/server settings read from the environment (.env is loaded first).

pub fn http_port() -> u16 {
    env::var("EXPORTER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000)
}

pub fn engine_url() -> String {
    env::var("ENGINE_URL").unwrap_or_else(|_| "https://engine.battlesnake.io".to_string())
}

pub fn home_url() -> String {
    env::var("EXPORTER_HOME_URL").unwrap_or_else(|_| "https://battlesnake.io".to_string())
}

#[derive(Debug, Clone)]
pub struct ExporterSettings {
    pub engine_url: String,
    pub home_url: String,
}

impl ExporterSettings {
    pub fn from_env() -> Self {
        Self {
            engine_url: engine_url(),
            home_url: home_url(),
        }
    }
}
