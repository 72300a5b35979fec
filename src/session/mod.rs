pub mod aggregator;
pub mod controller;

pub use aggregator::SessionAggregator;
pub use controller::{ScoreView, SessionController};
