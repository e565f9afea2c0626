//! Upcoming birthdays within a forward window.

use chrono::NaiveDate;

use crate::birthday::Birthday;

/// Default look-ahead for the dashboard.
pub const DEFAULT_UPCOMING_DAYS: i64 = 30;

/// A birthday whose next anniversary falls inside the window.
#[derive(Debug, Clone, PartialEq)]
pub struct Upcoming {
    pub birthday: Birthday,
    pub next_anniversary: NaiveDate,
    pub days_until: i64,
    /// Age reached on the next anniversary.
    pub turning: i32,
}

/// Birthdays with an anniversary in `[today, today + window_days]`,
/// soonest first. Ties keep their source order; records with missing or
/// malformed dates are skipped.
pub fn upcoming(birthdays: &[Birthday], today: NaiveDate, window_days: i64) -> Vec<Upcoming> {
    let mut found: Vec<Upcoming> = birthdays
        .iter()
        .filter_map(|birthday| {
            let Some(date) = birthday.birth_date() else {
                tracing::warn!(id = %birthday.id, "skipping birthday with unreadable date");
                return None;
            };
            let days_until = date.days_until(today);
            if !(0..=window_days).contains(&days_until) {
                return None;
            }
            let next_anniversary = date.next_anniversary(today);
            Some(Upcoming {
                birthday: birthday.clone(),
                next_anniversary,
                days_until,
                turning: date.age_on(next_anniversary),
            })
        })
        .collect();

    // Stable sort, so equal distances stay in source order
    found.sort_by_key(|u| u.days_until);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::parse_date;

    fn birthday(id: &str, date: &str) -> Birthday {
        Birthday {
            id: id.to_string(),
            name: format!("Person {id}"),
            raw_birth_date: date.to_string(),
            group_id: "1".to_string(),
            notes: None,
        }
    }

    fn ids(list: &[Upcoming]) -> Vec<String> {
        list.iter().map(|u| u.birthday.id.clone()).collect()
    }

    #[test]
    fn includes_birthday_five_days_out() {
        let list = vec![birthday("1", "1990-04-15")];
        let found = upcoming(&list, parse_date("2024-04-10").unwrap(), DEFAULT_UPCOMING_DAYS);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].days_until, 5);
        assert_eq!(found[0].turning, 34);
    }

    #[test]
    fn excludes_birthday_that_just_passed() {
        let list = vec![birthday("1", "1990-04-15")];
        let found = upcoming(&list, parse_date("2024-04-20").unwrap(), DEFAULT_UPCOMING_DAYS);
        assert!(found.is_empty());
    }

    #[test]
    fn window_edges_are_inclusive() {
        let list = vec![
            birthday("today", "1990-04-10"),
            birthday("edge", "1990-05-10"),
            birthday("beyond", "1990-05-11"),
        ];
        let found = upcoming(&list, parse_date("2024-04-10").unwrap(), 30);
        assert_eq!(ids(&found), vec!["today", "edge"]);
    }

    #[test]
    fn sorts_across_year_boundary_by_distance() {
        let list = vec![
            birthday("jan", "1980-01-05"),
            birthday("dec", "1980-12-28"),
        ];
        let found = upcoming(&list, parse_date("2024-12-20").unwrap(), 30);
        assert_eq!(ids(&found), vec!["dec", "jan"]);
        assert_eq!(found[1].next_anniversary, parse_date("2025-01-05").unwrap());
    }

    #[test]
    fn ties_keep_source_order_and_malformed_dates_are_skipped() {
        let list = vec![
            birthday("b", "1991-04-12"),
            birthday("bad", "04/12/1991"),
            birthday("a", "1985-04-12"),
            birthday("empty", ""),
            birthday("first", "2000-04-11"),
        ];
        let found = upcoming(&list, parse_date("2024-04-10").unwrap(), 30);
        assert_eq!(ids(&found), vec!["first", "b", "a"]);
    }

    #[test]
    fn never_returns_past_or_out_of_window_anniversaries() {
        let list: Vec<Birthday> = (1..=12)
            .flat_map(|m| [1, 15, 28].map(move |d| (m, d)))
            .map(|(m, d)| birthday(&format!("{m}-{d}"), &format!("1990-{m:02}-{d:02}")))
            .collect();

        for today in ["2024-01-01", "2024-02-29", "2024-07-15", "2024-12-31"] {
            let today = parse_date(today).unwrap();
            for u in upcoming(&list, today, 30) {
                assert!(u.next_anniversary >= today);
                assert!((u.next_anniversary - today).num_days() <= 30);
            }
        }
    }
}
