//! TUI rendering for bday types.
//!
//! Extension traits and helpers that add colored terminal output to
//! bday-core types using owo_colors.

use bday_core::{BdayError, Birthday, Group, Upcoming, group_name};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Group {
    fn render(&self) -> String {
        let members = match self.member_count {
            Some(n) => format!("{} {}", n, pluralize("member", n as usize)),
            None => "0 members".to_string(),
        };
        let description = self.description.as_deref().unwrap_or("No description available");

        format!(
            "👥 {} {}\n   {}  {}",
            self.name.bold(),
            format!("[{}]", self.id).dimmed(),
            description,
            members.dimmed()
        )
    }
}

/// "today", "tomorrow" or "in N days"
pub fn days_label(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} days", n),
    }
}

/// One line for an upcoming birthday.
pub fn render_upcoming(upcoming: &Upcoming, groups: &[Group]) -> String {
    let b = &upcoming.birthday;
    let when = days_label(upcoming.days_until);
    let when = if upcoming.days_until == 0 {
        when.green().bold().to_string()
    } else {
        when.green().to_string()
    };

    let mut line = format!(
        "🎂 {} turns {} on {} {} {}",
        b.name.bold(),
        upcoming.turning,
        upcoming.next_anniversary.format("%B %-d"),
        when,
        format!("[{}]", group_name(groups, &b.group_id)).dimmed()
    );
    if let Some(notes) = &b.notes {
        line.push_str(&format!("\n   {}", notes.italic()));
    }
    line
}

/// One line for any stored birthday.
pub fn render_birthday(b: &Birthday, groups: &[Group], today: NaiveDate) -> String {
    let group = format!("[{}]", group_name(groups, &b.group_id));
    let id = format!("#{}", b.id);

    match b.birth_date() {
        Some(date) => format!(
            "{} {}  {} (age {}, {})  {}",
            id.dimmed(),
            b.name.bold(),
            date.long_format(),
            date.age_on(today),
            days_label(date.days_until(today)),
            group.dimmed()
        ),
        None => format!(
            "{} {}  {}  {}",
            id.dimmed(),
            b.name.bold(),
            format!("unreadable date '{}'", b.raw_birth_date).yellow(),
            group.dimmed()
        ),
    }
}

/// Full detail view of one birthday.
pub fn render_birthday_details(b: &Birthday, groups: &[Group], today: NaiveDate) -> String {
    let mut lines = vec![format!("{} {}", b.name.bold(), format!("#{}", b.id).dimmed())];

    match b.birth_date() {
        Some(date) => {
            lines.push(format!("  Born:      {}", date.long_format()));
            lines.push(format!("  Age:       {}", date.age_on(today)));
            lines.push(format!(
                "  Next:      {} ({})",
                date.next_anniversary(today).format("%a %b %-d, %Y"),
                days_label(date.days_until(today))
            ));
        }
        None => lines.push(format!(
            "  Born:      {}",
            format!("unreadable date '{}'", b.raw_birth_date).yellow()
        )),
    }
    lines.push(format!("  Group:     {}", group_name(groups, &b.group_id)));
    if let Some(notes) = &b.notes {
        lines.push(format!("  Notes:     {}", notes));
    }

    lines.join("\n")
}

/// Validation and conflicts are shown as a plain message; anything else
/// is an error with its cause chain.
pub fn render_error(err: &anyhow::Error) -> String {
    if let Some(bday_err) = err.downcast_ref::<BdayError>()
        && bday_err.is_user_error()
    {
        return format!("{} {}", "✗".yellow(), bday_err.to_string().yellow());
    }

    let mut text = format!("{} {}", "Error:".red().bold(), err);
    for cause in err.chain().skip(1) {
        text.push_str(&format!("\n  {} {}", "caused by:".dimmed(), cause));
    }
    text
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_label_words() {
        assert_eq!(days_label(0), "today");
        assert_eq!(days_label(1), "tomorrow");
        assert_eq!(days_label(5), "in 5 days");
    }

    #[test]
    fn pluralizes() {
        assert_eq!(pluralize("member", 1), "member");
        assert_eq!(pluralize("member", 3), "members");
        assert_eq!(pluralize("birthday", 0), "birthdays");
    }

    #[test]
    fn user_errors_skip_the_error_prefix() {
        let conflict = anyhow::Error::new(BdayError::GroupInUse {
            group: "Family".into(),
            count: 2,
        });
        assert!(!render_error(&conflict).contains("Error:"));

        let network = anyhow::Error::new(BdayError::Config("missing api_url".into()));
        assert!(render_error(&network).contains("Error:"));
    }
}
