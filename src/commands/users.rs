use std::io::{BufRead, Write};

use super::prompt;
use crate::error::Result;
use crate::manager::UserManager;
use crate::output::{self, UserRow};

pub fn add<W: Write>(manager: &mut UserManager, name: &str, email: &str, out: &mut W) -> Result<()> {
    let user = manager.add(name, email)?;

    output::write_item(out, &user, |out, u| {
        writeln!(out, "Added user {} ({}) with ID {}", u.name, u.email, u.id)
    })?;
    Ok(())
}

pub fn list<W: Write>(manager: &UserManager, all: bool, out: &mut W) -> Result<()> {
    let users = manager.list(!all);

    if users.is_empty() && !output::is_json_output() {
        writeln!(out, "No users found.")?;
        return Ok(());
    }

    output::write_table(out, &users, |u| UserRow::from(*u))?;
    Ok(())
}

pub fn get<W: Write>(manager: &UserManager, id: u64, out: &mut W) -> Result<()> {
    let user = manager.get(id)?;
    output::write_item(out, user, |out, u| output::write_user_details(out, u))?;
    Ok(())
}

/// Soft delete, asking for confirmation on `input` unless `yes` is set.
pub fn delete<R: BufRead, W: Write>(
    manager: &mut UserManager,
    id: u64,
    yes: bool,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    // Resolve first so a bad ID fails before prompting.
    let name = manager.get(id)?.name.clone();

    if !yes {
        let label = format!("Mark user {id} ({name}) inactive? [y/N] ");
        let answer = prompt(input, out, &label)?.unwrap_or_default();
        if !answer.eq_ignore_ascii_case("y") {
            output::write_message(out, "Aborted.")?;
            return Ok(());
        }
    }

    manager.delete(id)?;
    output::write_message(out, &format!("User {id} marked as inactive."))?;
    Ok(())
}
