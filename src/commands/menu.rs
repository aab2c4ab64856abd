//! Interactive numbered menu over a [`UserManager`].

use std::io::{BufRead, Write};

use tracing::{debug, error};

use super::{parse_id, prompt};
use crate::error::Result;
use crate::manager::{LoadOutcome, UserManager};
use crate::output::{self, UserRow};

const RULE: &str = "==================================================";

enum Flow {
    Continue,
    Exit,
}

/// Run the menu until the user exits or input ends.
///
/// Errors inside one iteration are logged and reported, then the menu is
/// shown again. Only a failure to write the report itself ends the loop.
pub fn run<R: BufRead, W: Write>(manager: &mut UserManager, input: &mut R, out: &mut W) -> Result<()> {
    writeln!(out, "Welcome to the User Management System!")?;
    if matches!(
        manager.load_outcome(),
        LoadOutcome::Invalid | LoadOutcome::Unreadable
    ) {
        writeln!(
            out,
            "Warning: could not read {}; starting with an empty list. Saving will overwrite it.",
            manager.path().display()
        )?;
    }

    loop {
        display_menu(out)?;

        match step(manager, input, out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => {
                error!("Unexpected error in main loop: {e}");
                writeln!(out, "Unexpected error: {e}")?;
            }
        }
    }

    Ok(())
}

fn display_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "USER MANAGEMENT SYSTEM")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "1. Add User")?;
    writeln!(out, "2. List Users")?;
    writeln!(out, "3. Get User Details")?;
    writeln!(out, "4. Delete User")?;
    writeln!(out, "5. Exit")?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

fn step<R: BufRead, W: Write>(manager: &mut UserManager, input: &mut R, out: &mut W) -> Result<Flow> {
    let Some(choice) = prompt(input, out, "\nEnter your choice (1-5): ")? else {
        return goodbye(out);
    };

    match choice.as_str() {
        "1" => add_user(manager, input, out),
        "2" => list_users(manager, out),
        "3" => show_user(manager, input, out),
        "4" => delete_user(manager, input, out),
        "5" => goodbye(out),
        _ => {
            writeln!(out, "Invalid choice. Please enter 1-5.")?;
            Ok(Flow::Continue)
        }
    }
}

fn add_user<R: BufRead, W: Write>(manager: &mut UserManager, input: &mut R, out: &mut W) -> Result<Flow> {
    writeln!(out, "\n--- ADD USER ---")?;
    let Some(name) = prompt(input, out, "Name: ")? else {
        return goodbye(out);
    };
    let Some(email) = prompt(input, out, "Email: ")? else {
        return goodbye(out);
    };

    match manager.add(&name, &email) {
        Ok(user) => writeln!(out, "User added successfully! ID: {}", user.id)?,
        Err(e) => writeln!(out, "Failed to add user: {e}")?,
    }
    Ok(Flow::Continue)
}

fn list_users<W: Write>(manager: &UserManager, out: &mut W) -> Result<Flow> {
    writeln!(out, "\n--- ALL USERS ---")?;
    let users = manager.list(false);

    if users.is_empty() {
        writeln!(out, "No users found.")?;
    } else {
        output::write_table(out, &users, |u| UserRow::from(*u))?;
    }
    Ok(Flow::Continue)
}

fn show_user<R: BufRead, W: Write>(manager: &UserManager, input: &mut R, out: &mut W) -> Result<Flow> {
    writeln!(out, "\n--- USER DETAILS ---")?;
    let Some(raw) = prompt(input, out, "Enter User ID: ")? else {
        return goodbye(out);
    };
    let id = match parse_id(&raw) {
        Ok(id) => id,
        Err(e) => {
            debug!("{e}");
            writeln!(out, "Please enter a valid number.")?;
            return Ok(Flow::Continue);
        }
    };

    match manager.get(id) {
        Ok(user) => {
            writeln!(out, "\nUser Details:")?;
            output::write_user_details(out, user)?;
        }
        Err(_) => writeln!(out, "User with ID {id} not found.")?,
    }
    Ok(Flow::Continue)
}

fn delete_user<R: BufRead, W: Write>(manager: &mut UserManager, input: &mut R, out: &mut W) -> Result<Flow> {
    writeln!(out, "\n--- DELETE USER ---")?;
    let Some(raw) = prompt(input, out, "Enter User ID to delete: ")? else {
        return goodbye(out);
    };
    let id = match parse_id(&raw) {
        Ok(id) => id,
        Err(e) => {
            debug!("{e}");
            writeln!(out, "Please enter a valid number.")?;
            return Ok(Flow::Continue);
        }
    };

    let label = format!("Are you sure you want to delete user {id}? (y/n): ");
    let Some(confirm) = prompt(input, out, &label)? else {
        return goodbye(out);
    };
    if !confirm.eq_ignore_ascii_case("y") {
        writeln!(out, "Deletion cancelled.")?;
        return Ok(Flow::Continue);
    }

    match manager.delete(id) {
        Ok(()) => writeln!(out, "User {id} marked as inactive.")?,
        Err(e) => writeln!(out, "Failed to delete user {id}: {e}")?,
    }
    Ok(Flow::Continue)
}

fn goodbye<W: Write>(out: &mut W) -> Result<Flow> {
    writeln!(out, "\nThank you for using User Management System!")?;
    Ok(Flow::Exit)
}
