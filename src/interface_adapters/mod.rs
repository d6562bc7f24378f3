// Interface adapters: engine client, renderers, diagnostics and HTTP surface.

pub mod clients;
pub mod diagnostics;
pub mod handlers;
pub mod protocol;
pub mod render;
pub mod routes;
pub mod state;
pub mod streaming;
