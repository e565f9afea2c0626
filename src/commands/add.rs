use anyhow::Result;
use bday_core::date::{self, parse_date};
use bday_core::{BirthDate, Group, NewBirthday};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use super::{Book, resolve_group};
use crate::render::days_label;

pub async fn run(
    book: &mut Book,
    name: Option<String>,
    birth_date: Option<String>,
    group: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let interactive = name.is_none() || birth_date.is_none() || group.is_none();
    let today = date::today();

    let groups = book.groups().await?;
    if groups.is_empty() {
        anyhow::bail!(
            "No groups yet.\n\n\
            Add one first with:\n  \
            bday groups add <name>"
        );
    }

    // --- Name ---
    let name = match name {
        Some(n) => n,
        None => Input::<String>::new().with_prompt("  Name").interact_text()?,
    };

    // --- Birth date ---
    let birth_date = match birth_date {
        Some(s) => s.parse::<BirthDate>()?,
        None => prompt_with_retry("  Birth date (YYYY-MM-DD)", |s| Ok(s.parse::<BirthDate>()?))?,
    };

    // --- Group ---
    let group_id = match group {
        Some(g) => resolve_group(&groups, &g)?.id.clone(),
        None => prompt_group(&groups)?,
    };

    // --- Notes ---
    let notes = match notes {
        Some(n) => Some(n),
        None if interactive => {
            let n: String = Input::new()
                .with_prompt("  Notes (skip)")
                .default(String::new())
                .show_default(false)
                .interact_text()?;
            Some(n)
        }
        None => None,
    };

    let birthday = book
        .add_birthday(
            NewBirthday {
                name,
                birth_date,
                group_id,
                notes,
            },
            today,
        )
        .await?;

    let when = birthday
        .birth_date()
        .map(|d| days_label(d.days_until(today)))
        .unwrap_or_default();
    println!(
        "{} Added {} {} {}",
        "+".green(),
        birthday.name.bold(),
        format!("#{}", birthday.id).dimmed(),
        format!("(next birthday {})", when).dimmed()
    );
    Ok(())
}

/// Pick a group from a list.
pub fn prompt_group(groups: &[Group]) -> Result<String> {
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    let index = Select::new()
        .with_prompt("  WhatsApp group")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(groups[index].id.clone())
}

/// Prompt until the input parses.
pub fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Parse an optional `--date` argument.
pub fn parse_birth_date(s: Option<&str>) -> Result<Option<BirthDate>> {
    Ok(s.map(parse_date).transpose()?.map(BirthDate::from))
}
