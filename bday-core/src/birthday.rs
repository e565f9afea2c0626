//! Birthday records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{BirthDate, MonthDay};
use crate::error::{BdayError, BdayResult};
use crate::group::Group;

/// A stored birthday.
///
/// `birth_date` is kept as the raw string it was stored with, so records
/// written by older clients survive a load/save cycle untouched even when
/// the date does not parse. Use [`Birthday::birth_date`] for the typed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    #[serde(alias = "birthday_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "birth_date", alias = "birthDate")]
    pub raw_birth_date: String,
    #[serde(default, alias = "group", alias = "groupId")]
    pub group_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Birthday {
    pub fn new(id: String, new: NewBirthday) -> Self {
        Birthday {
            id,
            name: new.name.trim().to_string(),
            raw_birth_date: new.birth_date.to_string(),
            group_id: new.group_id.trim().to_string(),
            notes: non_empty(new.notes),
        }
    }

    /// The parsed birth date, or None if the stored value is malformed.
    pub fn birth_date(&self) -> Option<BirthDate> {
        self.raw_birth_date.parse().ok()
    }

    /// MM-DD derived from the birth date.
    pub fn birth_month_day(&self) -> Option<MonthDay> {
        self.birth_date().map(|d| d.month_day())
    }

    /// Whether this birthday points at `group`. Older data stores the
    /// group's name rather than its id, so either one counts.
    pub fn belongs_to(&self, group: &Group) -> bool {
        let reference = self.group_id.trim();
        !reference.is_empty()
            && (reference == group.id || reference.eq_ignore_ascii_case(group.name.trim()))
    }

    /// Merge the supplied fields into this record.
    pub fn apply(&mut self, update: BirthdayUpdate) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(date) = update.birth_date {
            self.raw_birth_date = date.to_string();
        }
        if let Some(group_id) = update.group_id {
            self.group_id = group_id.trim().to_string();
        }
        if let Some(notes) = update.notes {
            self.notes = non_empty(Some(notes));
        }
    }

    /// Required-field checks shared by add and update.
    pub fn validate(&self, today: NaiveDate) -> BdayResult<()> {
        if self.name.trim().is_empty() {
            return Err(BdayError::Validation("Name is required".into()));
        }
        if self.group_id.trim().is_empty() {
            return Err(BdayError::Validation("Group is required".into()));
        }
        let date = self
            .birth_date()
            .ok_or_else(|| BdayError::InvalidDate(self.raw_birth_date.clone()))?;
        if date.is_after(today) {
            return Err(BdayError::Validation(format!(
                "Birth date {date} is in the future"
            )));
        }
        Ok(())
    }
}

/// Fields for a birthday that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewBirthday {
    pub name: String,
    pub birth_date: BirthDate,
    pub group_id: String,
    pub notes: Option<String>,
}

/// A merge-style update: only `Some` fields change.
///
/// `notes: Some("")` clears the notes.
#[derive(Debug, Clone, Default)]
pub struct BirthdayUpdate {
    pub name: Option<String>,
    pub birth_date: Option<BirthDate>,
    pub group_id: Option<String>,
    pub notes: Option<String>,
}

impl BirthdayUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.birth_date.is_none()
            && self.group_id.is_none()
            && self.notes.is_none()
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::parse_date;

    fn make_birthday() -> Birthday {
        Birthday::new(
            "1".into(),
            NewBirthday {
                name: "  John Doe ".into(),
                birth_date: "1990-04-15".parse().unwrap(),
                group_id: "1".into(),
                notes: Some("Likes chocolate cake".into()),
            },
        )
    }

    #[test]
    fn new_trims_fields() {
        let b = make_birthday();
        assert_eq!(b.name, "John Doe");
        assert_eq!(b.raw_birth_date, "1990-04-15");
        assert_eq!(b.birth_month_day().unwrap().to_string(), "04-15");
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut b = make_birthday();
        b.apply(BirthdayUpdate {
            name: Some("Johnny".into()),
            ..Default::default()
        });
        assert_eq!(b.name, "Johnny");
        assert_eq!(b.raw_birth_date, "1990-04-15");
        assert_eq!(b.notes.as_deref(), Some("Likes chocolate cake"));

        b.apply(BirthdayUpdate {
            notes: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(b.notes, None);
    }

    #[test]
    fn validate_rejects_missing_fields_and_future_dates() {
        let today = parse_date("2024-04-10").unwrap();
        let mut b = make_birthday();
        assert!(b.validate(today).is_ok());

        b.name = "   ".into();
        assert!(matches!(b.validate(today), Err(BdayError::Validation(_))));

        let mut b = make_birthday();
        b.group_id.clear();
        assert!(matches!(b.validate(today), Err(BdayError::Validation(_))));

        let mut b = make_birthday();
        b.raw_birth_date = "2024-04-11".into();
        assert!(matches!(b.validate(today), Err(BdayError::Validation(_))));

        b.raw_birth_date = "not a date".into();
        assert!(matches!(b.validate(today), Err(BdayError::InvalidDate(_))));
    }

    #[test]
    fn deserializes_legacy_field_names() {
        let json = r#"{"id":"2","name":"Jane Smith","birthDate":"1985-07-22","group":"Friends","notes":"Prefers gifts to parties"}"#;
        let b: Birthday = serde_json::from_str(json).unwrap();
        assert_eq!(b.raw_birth_date, "1985-07-22");
        assert_eq!(b.group_id, "Friends");

        let json = r#"{"birthday_id":"9","name":"Api","birth_date":"1985-07-22","group_id":"3","birthMonthDay":"07-22"}"#;
        let b: Birthday = serde_json::from_str(json).unwrap();
        assert_eq!(b.id, "9");
        assert_eq!(b.group_id, "3");
        assert_eq!(b.notes, None);
    }

    #[test]
    fn malformed_dates_still_load() {
        let b: Birthday = serde_json::from_str(r#"{"id":"3","name":"X","birthDate":"soon"}"#).unwrap();
        assert_eq!(b.birth_date(), None);
        assert_eq!(b.group_id, "");
    }

    #[test]
    fn belongs_to_matches_id_or_legacy_name() {
        let family = Group {
            id: "1".into(),
            name: "Family".into(),
            description: None,
            member_count: None,
        };
        let mut b = make_birthday();
        assert!(b.belongs_to(&family));

        b.group_id = "family".into();
        assert!(b.belongs_to(&family));

        b.group_id = "2".into();
        assert!(!b.belongs_to(&family));
    }
}
