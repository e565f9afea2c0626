pub mod add;
pub mod clear;
pub mod config;
pub mod dashboard;
pub mod delete;
pub mod edit;
pub mod export;
pub mod groups;
pub mod import;
pub mod show;
pub mod test_message;
pub mod upcoming;

use anyhow::{Context, Result};
use bday_core::date::{self, parse_date};
use bday_core::{Backend, BdayConfig, BirthdayBook, Group};
use chrono::NaiveDate;
use dialoguer::Confirm;

pub type Book = BirthdayBook<Backend>;

pub fn open_book(config: &BdayConfig) -> Result<Book> {
    tracing::debug!(backend = %config.backend, "opening birthday store");
    let backend = Backend::from_config(config).context("Could not open birthday store")?;
    Ok(BirthdayBook::new(backend))
}

/// `--on` date, or today.
pub fn resolve_today(on: Option<&str>) -> Result<NaiveDate> {
    match on {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(date::today()),
    }
}

/// Find a group by id, or failing that by case-insensitive name.
pub fn resolve_group<'a>(groups: &'a [Group], input: &str) -> Result<&'a Group> {
    let input = input.trim();
    if let Some(group) = groups.iter().find(|g| g.id == input) {
        return Ok(group);
    }
    if let Some(group) = groups.iter().find(|g| g.name.eq_ignore_ascii_case(input)) {
        return Ok(group);
    }

    let available: Vec<_> = groups
        .iter()
        .map(|g| format!("{} ({})", g.name, g.id))
        .collect();
    anyhow::bail!(
        "Group '{}' not found. Available: {}",
        input,
        if available.is_empty() { "none".to_string() } else { available.join(", ") }
    )
}

/// Ask before doing something destructive, unless `--yes` was given.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
