use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::types::User;

/// Global output format setting
static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);

pub fn set_json_output(json: bool) {
    OUTPUT_JSON.store(json, Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

/// Write a table or JSON depending on output mode
pub fn write_table<W, T, R, F>(out: &mut W, items: &[T], to_row: F) -> io::Result<()>
where
    W: Write,
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if is_json_output() {
        writeln!(out, "{}", serde_json::to_string_pretty(items).unwrap_or_default())
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        writeln!(out, "{table}")
    }
}

/// Write a single item or JSON depending on output mode
pub fn write_item<W, T>(
    out: &mut W,
    item: &T,
    display: impl FnOnce(&mut W, &T) -> io::Result<()>,
) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    if is_json_output() {
        writeln!(out, "{}", serde_json::to_string_pretty(item).unwrap_or_default())
    } else {
        display(out, item)
    }
}

/// Write a message (as a simple object in JSON mode)
pub fn write_message<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    if is_json_output() {
        writeln!(out, "{}", serde_json::json!({ "message": message }))
    } else {
        writeln!(out, "{message}")
    }
}

#[derive(Tabled)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: truncate(&user.name, 40),
            email: truncate(&user.email, 40),
            status: user.status().colored(),
        }
    }
}

/// Write the detail view of one user
pub fn write_user_details<W: Write>(out: &mut W, user: &User) -> io::Result<()> {
    writeln!(out, "  ID:     {}", user.id)?;
    writeln!(out, "  Name:   {}", user.name)?;
    writeln!(out, "  Email:  {}", user.email)?;
    writeln!(out, "  Status: {}", user.status().colored())
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
