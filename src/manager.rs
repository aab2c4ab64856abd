//! JSON-backed store of user records.
//!
//! The whole store is read once on open and rewritten on every mutation.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{error, info, warn};

use crate::error::{Result, UserError};
use crate::types::User;

/// How the store file was found when the manager was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    Missing,
    Invalid,
    Unreadable,
}

pub struct UserManager {
    path: PathBuf,
    users: Vec<User>,
    outcome: LoadOutcome,
}

impl UserManager {
    /// Open the store at `path`. Never fails: a missing, unreadable or
    /// malformed file is logged and yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (users, outcome) = load_users(&path);
        info!("UserManager initialized with {} users", users.len());

        Self {
            path,
            users,
            outcome,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// Rewrite the store file with the in-memory records.
    pub fn persist(&self) -> Result<()> {
        match self.write_store() {
            Ok(()) => {
                info!(
                    "Saved {} users to {}",
                    self.users.len(),
                    self.path.display()
                );
                Ok(())
            }
            Err(e) => {
                error!("Error saving to {}: {e}", self.path.display());
                Err(e)
            }
        }
    }

    /// Validate and append a new active user, then persist.
    ///
    /// On a failed write the record is removed again so memory and disk agree.
    pub fn add(&mut self, name: &str, email: &str) -> Result<User> {
        if let Err(e) = self.check_new(name, email) {
            warn!("Rejected new user: {e}");
            return Err(e);
        }

        let id = match self.next_id() {
            Ok(id) => id,
            Err(e) => {
                error!("Cannot add user {name}: {e}");
                return Err(e);
            }
        };

        let user = User::new(id, name, email);
        self.users.push(user.clone());

        if let Err(e) = self.persist() {
            self.users.pop();
            return Err(e);
        }

        info!("Added user: {name} ({email}) with ID {}", user.id);
        Ok(user)
    }

    pub fn get(&self, id: u64) -> Result<&User> {
        match self.users.iter().find(|u| u.id == id) {
            Some(user) => Ok(user),
            None => {
                warn!("User with ID {id} not found");
                Err(UserError::NotFound(id))
            }
        }
    }

    /// Records in insertion order, optionally only the active ones.
    pub fn list(&self, active_only: bool) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| !active_only || u.active)
            .collect()
    }

    /// Soft delete: mark the user inactive and persist.
    pub fn delete(&mut self, id: u64) -> Result<()> {
        let Some(index) = self.users.iter().position(|u| u.id == id) else {
            warn!("User ID {id} not found for deletion");
            return Err(UserError::NotFound(id));
        };

        let before = self.users[index].clone();
        self.users[index].deactivate();

        if let Err(e) = self.persist() {
            self.users[index] = before;
            return Err(e);
        }

        info!("Soft deleted user ID {id}");
        Ok(())
    }

    fn check_new(&self, name: &str, email: &str) -> Result<()> {
        if name.is_empty() || email.is_empty() {
            return Err(UserError::EmptyField);
        }

        if !email.contains('@') {
            return Err(UserError::InvalidEmail(email.to_string()));
        }

        // Inactive records keep their email reserved.
        if self.users.iter().any(|u| u.email == email) {
            return Err(UserError::DuplicateEmail(email.to_string()));
        }

        Ok(())
    }

    fn next_id(&self) -> Result<u64> {
        let max = self.users.iter().map(|u| u.id).max().unwrap_or(0);
        max.checked_add(1).ok_or(UserError::IdsExhausted(max))
    }

    fn write_store(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.users)?;

        // Write beside the target and rename over it, so an interrupted
        // write never leaves a truncated file behind. A symlinked store is
        // replaced at its destination, keeping the link.
        let target = std::fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir).map_err(|e| self.storage_error(e))?;
        if let Ok(metadata) = std::fs::metadata(&target) {
            file.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| self.storage_error(e))?;
        }
        file.write_all(contents.as_bytes())
            .map_err(|e| self.storage_error(e))?;
        file.as_file()
            .sync_all()
            .map_err(|e| self.storage_error(e))?;
        file.persist(&target)
            .map_err(|e| self.storage_error(e.error))?;

        Ok(())
    }

    fn storage_error(&self, source: io::Error) -> UserError {
        UserError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}

fn load_users(path: &Path) -> (Vec<User>, LoadOutcome) {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(
                "File {} not found, starting with empty list",
                path.display()
            );
            return (Vec::new(), LoadOutcome::Missing);
        }
        Err(e) => {
            error!("Unexpected error loading users from {}: {e}", path.display());
            return (Vec::new(), LoadOutcome::Unreadable);
        }
    };

    match serde_json::from_str::<Vec<User>>(&contents) {
        Ok(users) => {
            info!("Loaded users from {}", path.display());
            let count = users.len();
            (users, LoadOutcome::Loaded(count))
        }
        Err(e) => {
            error!("Invalid JSON in {}: {e}", path.display());
            (Vec::new(), LoadOutcome::Invalid)
        }
    }
}
