//! Student record.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one, then stable.
//! - Text fields may be empty; `marks` is unbounded.

use serde::{Deserialize, Serialize};

/// Store-assigned row identifier.
pub type StudentId = i64;

/// One row of the `students` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default)]
    pub id: Option<StudentId>,
    pub name: String,
    /// Domain identifier; uniqueness is not enforced by core.
    pub roll_no: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    pub marks: f64,
}

impl Student {
    /// Builds an unsaved record.
    pub fn new(
        name: impl Into<String>,
        roll_no: impl Into<String>,
        department: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        marks: f64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            roll_no: roll_no.into(),
            department: department.into(),
            email: email.into(),
            phone: phone.into(),
            marks,
        }
    }

    /// Returns this record keyed by `id`, as read back from the store.
    pub fn with_id(self, id: StudentId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Compares the six business fields, ignoring `id`.
    pub fn same_fields(&self, other: &Student) -> bool {
        self.name == other.name
            && self.roll_no == other.roll_no
            && self.department == other.department
            && self.email == other.email
            && self.phone == other.phone
            && self.marks == other.marks
    }
}
