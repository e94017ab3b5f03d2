pub mod controller;
pub mod scheduler;
pub mod state;

pub use controller::{TimerController, TimerSnapshot};
pub use scheduler::FinishScheduler;
pub use state::{TimerState, TimerStatus};
