#[tokio::main]
async fn main() -> std::io::Result<()> {
    frame_exporter::run_with_config().await
}
