/// Database row types for the duty database.
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub id: i64,
    pub name: String,
    pub class_id: i64,
    pub class_name: String,
    pub grade: i64,
    pub position_name: Option<String>,
    pub academic_year: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct RoomRow {
    pub id: i64,
    pub room_id: i64,
    pub room_name: String,
    pub capacity: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct ScheduleRow {
    pub id: i64,
    pub school_id: i64,
    pub schedule_name: String,
    pub description: String,
    pub academic_year: i64,
    pub is_first_half: i64,
    pub status: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct AssignmentRow {
    pub day_of_week: i64,
    pub library_room_id: i64,
    pub room_name: String,
    pub committee_member_id: i64,
    pub member_name: String,
    pub class_name: String,
    pub grade: i64,
}
