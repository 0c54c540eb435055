//! Standalone entry point: serve both emulator APIs.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::load()?;
    server::start_server(config).await
}
