use serde::{Deserialize, Serialize};

/// Duty weekday. Weekend days are never scheduled.
///
/// The numeric form (1 = Monday .. 5 = Friday) is what gets persisted and
/// what appears in serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn number(self) -> u8 {
        match self {
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            _ => None,
        }
    }

    /// Whether this day is subject to the term-to-term rotation rule.
    pub fn is_wednesday_or_friday(self) -> bool {
        matches!(self, Weekday::Wednesday | Weekday::Friday)
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
        }
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> u8 {
        day.number()
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Weekday::from_number(n).ok_or_else(|| format!("weekday out of range: {}", n))
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Schedule lifecycle state. At most one schedule per (school, year, half)
/// should be active at a time; the commit path enforces this by demoting
/// peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Draft,
    Active,
    Inactive,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Draft => "draft",
            ScheduleStatus::Active => "active",
            ScheduleStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("unknown schedule status: {}", s)),
        }
    }
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A committee member eligible for duty. Immutable during one generation.
///
/// `class_id` is the identity the class-diversity rule keys on; the class
/// name and grade ride along for scoring and statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub class_id: i64,
    pub class_name: String,
    pub grade: u8,
    pub position: Option<String>,
    pub academic_year: i32,
}

/// A library room duty is served in.
///
/// `capacity` is recorded for display but deliberately not enforced as a
/// placement constraint; `room_id` is the stable ordering key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryRoom {
    pub id: i64,
    pub room_id: i64,
    pub name: String,
    pub capacity: u32,
}

/// A persisted schedule row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub description: String,
    pub academic_year: i32,
    pub is_first_half: bool,
    pub status: ScheduleStatus,
}

/// Insert shape for a schedule; the repository assigns id and status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSchedule {
    pub school_id: i64,
    pub name: String,
    pub description: String,
    pub academic_year: i32,
    pub is_first_half: bool,
}

/// One duty placement produced by the allocator. The owning schedule id is
/// supplied when the set is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub weekday: Weekday,
    pub room_id: i64,
    pub member_id: i64,
}

/// Read-side assignment row joined with member and room names, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub weekday: Weekday,
    pub room_id: i64,
    pub room_name: String,
    pub member_id: i64,
    pub member_name: String,
    pub class_name: String,
    pub grade: u8,
}
