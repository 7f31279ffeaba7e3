mod engine;
mod schedule;

pub use engine::{CountdownEngine, CountdownEvent, TimerState};
pub use schedule::{Segment, SegmentKind, SetPlan, BETWEEN_SETS_SECS};
