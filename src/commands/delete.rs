use anyhow::Result;
use owo_colors::OwoColorize;

use super::{Book, confirm};

pub async fn run(book: &mut Book, id: &str, yes: bool) -> Result<()> {
    let birthday = book.birthday(id).await?;

    let prompt = format!("Delete the birthday of {}?", birthday.name);
    if !confirm(&prompt, yes)? {
        println!("{}", "Nothing deleted".dimmed());
        return Ok(());
    }

    book.delete_birthday(id).await?;
    println!("{} Deleted {}", "-".red(), birthday.name);
    Ok(())
}
