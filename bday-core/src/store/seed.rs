//! Demo data a fresh local store starts with.

use crate::birthday::Birthday;
use crate::group::Group;

pub(crate) fn birthdays() -> Vec<Birthday> {
    [
        ("1", "John Doe", "1990-04-15", "1", "Likes chocolate cake"),
        ("2", "Jane Smith", "1985-07-22", "2", "Prefers gifts to parties"),
        ("3", "Mike Johnson", "1992-03-30", "3", "Allergic to nuts"),
        ("4", "Sarah Williams", "1988-11-05", "1", ""),
    ]
    .into_iter()
    .map(|(id, name, date, group_id, notes)| Birthday {
        id: id.to_string(),
        name: name.to_string(),
        raw_birth_date: date.to_string(),
        group_id: group_id.to_string(),
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    })
    .collect()
}

pub(crate) fn groups() -> Vec<Group> {
    ["Family", "Friends", "Work", "School"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| Group {
            id: (i + 1).to_string(),
            name: name.to_string(),
            description: None,
            member_count: None,
        })
        .collect()
}
