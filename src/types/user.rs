use serde::{Deserialize, Serialize};

use super::Status;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            active: true,
        }
    }

    pub fn status(&self) -> Status {
        Status::from_active(self.active)
    }

    /// Soft delete. One-way: records are never reactivated.
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }
}
