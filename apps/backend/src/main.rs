#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_review_backend::run().await
}
