//! Pre-built members and rooms so tests don't repeat row literals.

use crate::domain::{LibraryRoom, Member};

/// A member with sensible defaults for fields the allocator ignores.
pub fn member(id: i64, name: &str, class_id: i64, grade: u8) -> Member {
    Member {
        id,
        name: name.to_string(),
        class_id,
        class_name: format!("{}-{}", grade, class_id),
        grade,
        position: None,
        academic_year: 2025,
    }
}

/// `per_class` members in each of `class_count` classes, ids ascending,
/// grades alternating 5/6 by class.
pub fn members_grid(class_count: i64, per_class: i64) -> Vec<Member> {
    let mut members = Vec::new();
    for class in 1..=class_count {
        let grade = if class % 2 == 1 { 5 } else { 6 };
        for slot in 0..per_class {
            let id = (class - 1) * per_class + slot + 1;
            members.push(member(id, &format!("member-{}", id), class, grade));
        }
    }
    members
}

pub fn room(id: i64, name: &str) -> LibraryRoom {
    LibraryRoom {
        id,
        room_id: id,
        name: name.to_string(),
        capacity: 4,
    }
}

pub fn rooms(count: i64) -> Vec<LibraryRoom> {
    (1..=count).map(|id| room(id, &format!("room-{}", id))).collect()
}
