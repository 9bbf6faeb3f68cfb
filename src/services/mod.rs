//! Services for collecting and persisting stats

pub mod aggregator;
pub mod output;

pub use aggregator::Aggregator;
