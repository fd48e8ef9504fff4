#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pollchat_server::run().await
}
