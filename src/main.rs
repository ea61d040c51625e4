#[tokio::main]
async fn main() -> anyhow::Result<()> {
    revisit::tracing::init();
    revisit::app::run().await
}
