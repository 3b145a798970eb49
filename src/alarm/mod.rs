//! Alarm module: spoken time parsing and the blocking wait

mod scheduler;
mod target;

pub use scheduler::{AlarmScheduler, Clock, SystemClock, DEFAULT_POLL_INTERVAL};
pub use target::AlarmTarget;
