pub mod frame;
pub mod score;
pub mod session;

pub use frame::FrameMeasurement;
pub use score::{AuxBreakdown, CoreBreakdown, ScoreBreakdown, ScoreSnapshot};
pub use session::{FocusSegment, SessionSummary};
