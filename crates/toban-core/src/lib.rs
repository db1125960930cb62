pub mod domain;
pub mod ports;
pub mod scheduler;
pub mod services;

#[cfg(test)]
pub mod testing;

// Re-export commonly used types
pub use domain::{
    Assignment, AssignmentRecord, DomainError, LibraryRoom, Member, NewSchedule, Schedule,
    ScheduleStatus, Weekday,
};

pub use ports::ScheduleRepository;

pub use scheduler::{
    admissible_slots, build_statistics, fallback_assign, score_slot, BoardState, GreedyAllocator,
    MemberSummary, RoomRoster, ScheduleStatistics, SchedulerConfig, Slot, WeekdayCount,
};

pub use services::{GenerationOutcome, GenerationRequest, GenerationService};
