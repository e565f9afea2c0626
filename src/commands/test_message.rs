use anyhow::Result;
use owo_colors::OwoColorize;

use super::{Book, resolve_group};
use crate::utils::tui::spin;

const DEFAULT_MESSAGE: &str = "This is a test message from bday 🎂";

pub async fn run(book: &Book, group: &str, message: Option<String>) -> Result<()> {
    let kind = book.store().kind();
    let groups = spin(kind, "Loading groups", book.groups()).await?;
    let group = resolve_group(&groups, group)?;
    let message = message.unwrap_or_else(|| DEFAULT_MESSAGE.to_string());

    let ack = spin(
        kind,
        &format!("Sending to {}", group.name),
        book.send_test_message(&group.id, &message),
    )
    .await?;

    println!("{} Test message sent to {}", "✓".green(), group.name.bold());
    if !ack.is_null() {
        println!("  {}", ack.to_string().dimmed());
    }
    Ok(())
}
