pub mod errors;
pub mod models;

pub use errors::DomainError;
pub use models::{
    Assignment, AssignmentRecord, LibraryRoom, Member, NewSchedule, Schedule, ScheduleStatus,
    Weekday,
};
