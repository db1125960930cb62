pub mod schedule_repository;

pub use schedule_repository::ScheduleRepository;

#[cfg(any(test, feature = "testing"))]
pub use schedule_repository::MockScheduleRepository;
