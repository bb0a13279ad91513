#[tokio::main]
async fn main() -> std::io::Result<()> {
    tetracore_server::run_with_config().await
}
