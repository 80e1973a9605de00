#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quizhost_backend::run().await
}
