use anyhow::Result;
use bday_core::date;

use super::Book;
use crate::render::render_birthday_details;

pub async fn run(book: &Book, id: &str) -> Result<()> {
    let birthday = book.birthday(id).await?;
    let groups = book.groups().await?;

    println!("{}", render_birthday_details(&birthday, &groups, date::today()));
    Ok(())
}
