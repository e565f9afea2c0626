use anyhow::Result;
use bday_core::BdayConfig;
use owo_colors::OwoColorize;

use super::{Book, resolve_today};
use crate::render::{render_birthday, render_upcoming};
use crate::utils::tui::spin;

pub async fn run(book: &Book, config: &BdayConfig, on: Option<&str>) -> Result<()> {
    let today = resolve_today(on)?;
    let kind = book.store().kind();

    let (birthdays, groups) = spin(kind, "Loading birthdays", async {
        Ok::<_, anyhow::Error>((book.birthdays().await?, book.groups().await?))
    })
    .await?;
    let upcoming = bday_core::upcoming::upcoming(&birthdays, today, config.upcoming_days);

    println!("{}", "Upcoming Birthdays".bold());
    if upcoming.is_empty() {
        println!(
            "  {}",
            format!("No upcoming birthdays in the next {} days.", config.upcoming_days).dimmed()
        );
    } else {
        for u in &upcoming {
            println!("  {}", render_upcoming(u, &groups).replace('\n', "\n  "));
        }
    }

    println!();
    println!("{}", "All Birthdays".bold());
    if birthdays.is_empty() {
        println!(
            "  {}",
            "You haven't added any birthdays yet. Add one with: bday add".dimmed()
        );
    } else {
        for b in &birthdays {
            println!("  {}", render_birthday(b, &groups, today));
        }
    }

    Ok(())
}
