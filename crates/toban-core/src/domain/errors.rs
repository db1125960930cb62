use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("no active committee members in grades 5-6 for school {school_id}, year {academic_year}")]
    NoMembers { school_id: i64, academic_year: i32 },

    #[error("no active library rooms for school {school_id}")]
    NoRooms { school_id: i64 },

    #[error("school not found: {0}")]
    SchoolNotFound(i64),

    #[error("active schedule for school {school_id}, year {academic_year} could not be demoted")]
    ActivationConflict { school_id: i64, academic_year: i32 },
}

impl DomainError {
    /// Stable machine-readable kind, used in the result envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NoMembers { .. } | DomainError::NoRooms { .. } => "empty_input",
            DomainError::SchoolNotFound(_) => "not_found",
            DomainError::ActivationConflict { .. } => "conflict",
        }
    }
}
