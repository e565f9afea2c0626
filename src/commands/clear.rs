use anyhow::Result;
use owo_colors::OwoColorize;

use super::{Book, confirm};

pub async fn run(book: &mut Book, yes: bool) -> Result<()> {
    if !confirm("Delete all locally stored birthdays and groups?", yes)? {
        println!("{}", "Nothing cleared".dimmed());
        return Ok(());
    }

    book.clear().await?;
    println!(
        "{} Local storage cleared. Demo data will be loaded next time.",
        "✓".green()
    );
    Ok(())
}
