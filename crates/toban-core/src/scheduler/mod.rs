//! The assignment engine: board state, candidate enumeration, slot scoring,
//! the greedy allocator with its relaxation phase, the fallback sweep, and
//! the statistics reporter.

pub mod allocator;
pub mod candidates;
pub mod config;
pub mod fallback;
pub mod scoring;
pub mod state;
pub mod statistics;

pub use allocator::GreedyAllocator;
pub use candidates::{admissible_slots, Slot};
pub use config::SchedulerConfig;
pub use fallback::fallback_assign;
pub use scoring::score_slot;
pub use state::BoardState;
pub use statistics::{
    build_statistics, MemberSummary, RoomRoster, ScheduleStatistics, WeekdayCount,
};
