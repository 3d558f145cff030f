//! Per-stock merge logic: profile resolution and sentiment aggregation

pub mod profile;
pub mod sentiment;

pub use profile::{ProfileOrigin, ProfileResolver, ResolvedProfile};
pub use sentiment::SentimentAggregator;
