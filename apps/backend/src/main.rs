#[tokio::main]
async fn main() -> anyhow::Result<()> {
    memory_game_backend::run().await
}
