mod controller;
mod engine;
pub mod progress;
mod session;

pub use controller::Workout;
pub use engine::WorkoutEngine;
pub use session::{Screen, Session};
