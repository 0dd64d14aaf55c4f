use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use transaction_generator::publisher::BOOTSTRAP_SERVERS;
use transaction_generator::{Feed, FeedConfig, KafkaPublisher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting transaction generator...");

    let publisher = KafkaPublisher::new(BOOTSTRAP_SERVERS)?;

    info!("Producer created successfully. Starting to send transactions...");

    let mut feed = Feed::new(FeedConfig::default(), publisher, StdRng::from_entropy());
    feed.run().await;

    // in-flight messages are not flushed; whatever is still queued is lost
    Ok(())
}
