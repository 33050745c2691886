//! Flat-file persistence for course records.
//!
//! The backing file is a single JSON array of course objects. Every write
//! loads the full collection, appends, and rewrites the file. Not atomic: a
//! crash mid-write can truncate the file, and concurrent writers can lose
//! records.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::types::Course;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access course data at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("course data at {path} is corrupt: {source}")]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load/append access to the course collection.
pub struct CourseStore {
    path: PathBuf,
}

impl CourseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full course collection.
    ///
    /// A missing file is an empty catalog. An existing file that is not a
    /// JSON array of course objects fails with [`StoreError::CorruptData`].
    pub fn load(&self) -> Result<Vec<Course>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::CorruptData {
            path: self.path.clone(),
            source,
        })
    }

    /// Append one course and rewrite the whole file.
    ///
    /// Not safe under concurrent writers; the last rewrite wins.
    pub fn append(&self, course: Course) -> Result<(), StoreError> {
        let mut courses = self.load()?;
        courses.push(course);
        let serialized = serde_json::to_string_pretty(&courses).map_err(|source| {
            StoreError::CorruptData {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, serialized).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store(name: &str) -> CourseStore {
        let path = std::env::temp_dir().join(format!(
            "course-catalog-store-{}-{name}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        CourseStore::new(path)
    }

    #[test]
    fn load_missing_file_is_empty() {
        let store = scratch_store("missing");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn append_preserves_order_and_grows_by_one() {
        let store = scratch_store("append");
        store
            .append(Course::new("CS203", "Systems", "Dr. Y"))
            .unwrap();
        store
            .append(Course::new("CS101", "Intro", "Dr. Z"))
            .unwrap();

        let courses = store.load().unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].code, "CS203");
        assert_eq!(courses[1].code, "CS101");
    }

    #[test]
    fn non_json_file_is_corrupt() {
        let store = scratch_store("garbage");
        fs::write(store.path(), "definitely not json").unwrap();
        assert!(matches!(
            store.load(),
            Err(StoreError::CorruptData { .. })
        ));
    }

    #[test]
    fn json_object_instead_of_array_is_corrupt() {
        let store = scratch_store("object");
        fs::write(store.path(), r#"{"code":"CS203"}"#).unwrap();
        assert!(matches!(
            store.load(),
            Err(StoreError::CorruptData { .. })
        ));
    }

    #[test]
    fn duplicate_codes_are_stored_verbatim() {
        let store = scratch_store("dup");
        store
            .append(Course::new("CS203", "Systems", "Dr. Y"))
            .unwrap();
        store
            .append(Course::new("CS203", "Systems II", "Dr. Z"))
            .unwrap();
        assert_eq!(store.load().unwrap().len(), 2);
    }
}
