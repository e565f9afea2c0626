use anyhow::Result;
use bday_core::{GroupUpdate, NewGroup};
use owo_colors::OwoColorize;

use super::{Book, confirm, resolve_group};
use crate::GroupCommands;
use crate::render::{Render, pluralize};
use crate::utils::tui::spin;

pub async fn run(book: &mut Book, command: GroupCommands) -> Result<()> {
    match command {
        GroupCommands::List => list(book).await,
        GroupCommands::Add {
            name,
            description,
            members,
        } => {
            let group = book
                .add_group(NewGroup {
                    name,
                    description,
                    member_count: members,
                })
                .await?;
            println!(
                "{} Added group {} {}",
                "+".green(),
                group.name.bold(),
                format!("[{}]", group.id).dimmed()
            );
            Ok(())
        }
        GroupCommands::Edit {
            id,
            name,
            description,
            members,
        } => {
            let update = GroupUpdate {
                name,
                description,
                member_count: members,
            };
            if update.is_empty() {
                anyhow::bail!("Nothing to change. Pass --name, --description or --members");
            }
            let id = resolve_group(&book.groups().await?, &id)?.id.clone();
            let group = book.update_group(&id, update).await?;
            println!("{} Updated group {}", "~".yellow(), group.name.bold());
            Ok(())
        }
        GroupCommands::Delete { id, yes } => delete(book, &id, yes).await,
    }
}

async fn list(book: &Book) -> Result<()> {
    let kind = book.store().kind();
    let (groups, birthdays) = spin(kind, "Loading groups", async {
        Ok::<_, anyhow::Error>((book.groups().await?, book.birthdays().await?))
    })
    .await?;

    if groups.is_empty() {
        println!("{}", "No groups yet. Add one with: bday groups add <name>".dimmed());
        return Ok(());
    }

    for group in &groups {
        let count = birthdays.iter().filter(|b| b.belongs_to(group)).count();
        println!("{}", group.render());
        println!(
            "   {}",
            format!("{} {}", count, pluralize("birthday", count)).dimmed()
        );
    }
    Ok(())
}

async fn delete(book: &mut Book, id: &str, yes: bool) -> Result<()> {
    let group = resolve_group(&book.groups().await?, id)?.clone();

    // Check the guard before asking, so an in-use group never gets a prompt
    let in_use = book.birthdays_in_group(&group.id).await?.len();
    if in_use > 0 {
        return Err(bday_core::BdayError::GroupInUse {
            group: group.name,
            count: in_use,
        }
        .into());
    }

    let prompt = format!("Delete the group {}?", group.name);
    if !confirm(&prompt, yes)? {
        println!("{}", "Nothing deleted".dimmed());
        return Ok(());
    }

    book.delete_group(&group.id).await?;
    println!("{} Deleted group {}", "-".red(), group.name);
    Ok(())
}
