use anyhow::Result;
use bday_core::BirthdayUpdate;
use bday_core::date;
use owo_colors::OwoColorize;

use super::add::parse_birth_date;
use super::{Book, resolve_group};

pub async fn run(
    book: &mut Book,
    id: &str,
    name: Option<String>,
    birth_date: Option<String>,
    group: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let group_id = match group {
        Some(g) => Some(resolve_group(&book.groups().await?, &g)?.id.clone()),
        None => None,
    };

    let update = BirthdayUpdate {
        name,
        birth_date: parse_birth_date(birth_date.as_deref())?,
        group_id,
        notes,
    };
    if update.is_empty() {
        anyhow::bail!("Nothing to change. Pass --name, --date, --group or --notes");
    }

    let birthday = book.update_birthday(id, update, date::today()).await?;
    println!(
        "{} Updated {} {}",
        "~".yellow(),
        birthday.name.bold(),
        format!("#{}", birthday.id).dimmed()
    );
    Ok(())
}
