use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::Book;
use crate::utils::tui::spin;

pub async fn run(book: &Book, output: Option<&Path>) -> Result<()> {
    let snapshot = spin(book.store().kind(), "Exporting", book.export()).await?;
    let json = snapshot.to_json()?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Exported {} birthdays and {} groups to {}",
                "✓".green(),
                snapshot.birthdays.as_ref().map_or(0, Vec::len),
                snapshot.groups.as_ref().map_or(0, Vec::len),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
