//! Course record definitions.

use serde::{Deserialize, Serialize};

/// A single catalog entry.
///
/// `code` is unique by convention only; the store does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub instructor: String,
}

impl Course {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        instructor: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            instructor: instructor.into(),
        }
    }
}
