use rdkafka::error::KafkaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The producer's local queue has no room for another message.
    #[error("Producer queue is full")]
    QueueFull,
    #[error("Kafka error: {0}")]
    Kafka(#[from] KafkaError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
