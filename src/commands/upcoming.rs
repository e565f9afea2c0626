use anyhow::Result;
use owo_colors::OwoColorize;

use super::{Book, resolve_today};
use crate::render::render_upcoming;
use crate::utils::tui::spin;

pub async fn run(book: &Book, days: i64, on: Option<&str>) -> Result<()> {
    if days < 0 {
        anyhow::bail!("--days must not be negative");
    }
    let today = resolve_today(on)?;
    let kind = book.store().kind();

    let (upcoming, groups) = spin(kind, "Loading birthdays", async {
        Ok::<_, anyhow::Error>((book.upcoming(today, days).await?, book.groups().await?))
    })
    .await?;

    if upcoming.is_empty() {
        println!("{}", format!("No upcoming birthdays in the next {} days.", days).dimmed());
        return Ok(());
    }

    for u in &upcoming {
        println!("{}", render_upcoming(u, &groups));
    }

    Ok(())
}
