use std::path::Path;

use anyhow::{Context, Result};
use bday_core::Snapshot;
use owo_colors::OwoColorize;

use super::{Book, confirm};

pub async fn run(book: &mut Book, file: &Path, yes: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let snapshot = Snapshot::from_json(&content)
        .with_context(|| format!("{} is not a bday export", file.display()))?;

    let mut parts = Vec::new();
    if let Some(birthdays) = &snapshot.birthdays {
        parts.push(format!("{} birthdays", birthdays.len()));
    }
    if let Some(groups) = &snapshot.groups {
        parts.push(format!("{} groups", groups.len()));
    }
    if parts.is_empty() {
        anyhow::bail!("{} has neither birthdays nor groups", file.display());
    }
    let summary = parts.join(" and ");

    let prompt = format!("Replace current data with {}?", summary);
    if !confirm(&prompt, yes)? {
        println!("{}", "Nothing imported".dimmed());
        return Ok(());
    }

    book.import(snapshot).await?;
    println!("{} Imported {}", "✓".green(), summary);
    Ok(())
}
