pub mod catalog;
pub mod error;
pub mod feed;
pub mod publisher;
pub mod transaction;

pub use error::GeneratorError;
pub use feed::{Feed, FeedConfig, FeedSummary};
pub use publisher::{KafkaPublisher, Publisher};
pub use transaction::Transaction;
