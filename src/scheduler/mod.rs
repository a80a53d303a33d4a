pub mod cycle;
pub mod daily;
pub mod registry;
pub mod timer;

pub use cycle::{arm_cycle, draw_delays, Jitter, RandomJitter};
pub use daily::{refresh_words, schedule_daily, RefreshOutcome};
pub use registry::SessionRegistry;
pub use timer::Timer;
