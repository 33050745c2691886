//! Catalog operations over the course store.

use thiserror::Error;

use crate::catalog::store::{CourseStore, StoreError};
use crate::catalog::types::Course;

/// Display labels for the three required submission fields.
pub const FIELD_CODE: &str = "Course Code";
pub const FIELD_NAME: &str = "Course Name";
pub const FIELD_INSTRUCTOR: &str = "Instructor";

/// Error type for course submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("missing required fields: {}", missing_fields.join(", "))]
    Validation { missing_fields: Vec<&'static str> },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// List, lookup, and submission logic over [`CourseStore`].
pub struct CatalogService {
    store: CourseStore,
}

impl CatalogService {
    pub fn new(store: CourseStore) -> Self {
        Self { store }
    }

    /// All courses, in insertion order.
    pub fn list_all(&self) -> Result<Vec<Course>, StoreError> {
        self.store.load()
    }

    /// First course whose code matches exactly, if any.
    pub fn find_by_code(&self, code: &str) -> Result<Option<Course>, StoreError> {
        Ok(self.list_all()?.into_iter().find(|c| c.code == code))
    }

    /// Validate and persist a new course.
    ///
    /// Fails with [`SubmitError::Validation`] listing every empty field.
    /// Duplicate codes are accepted; lookups return the first occurrence.
    pub fn submit(
        &self,
        code: &str,
        name: &str,
        instructor: &str,
    ) -> Result<Course, SubmitError> {
        let mut missing_fields = Vec::new();
        if code.is_empty() {
            missing_fields.push(FIELD_CODE);
        }
        if name.is_empty() {
            missing_fields.push(FIELD_NAME);
        }
        if instructor.is_empty() {
            missing_fields.push(FIELD_INSTRUCTOR);
        }
        if !missing_fields.is_empty() {
            return Err(SubmitError::Validation { missing_fields });
        }

        let course = Course::new(code, name, instructor);
        self.store.append(course.clone())?;
        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_service(name: &str) -> CatalogService {
        let path = std::env::temp_dir().join(format!(
            "course-catalog-service-{}-{name}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        CatalogService::new(CourseStore::new(path))
    }

    #[test]
    fn submit_then_find_by_code() {
        let service = scratch_service("roundtrip");
        service.submit("CS203", "Systems", "Dr. Y").unwrap();

        let found = service.find_by_code("CS203").unwrap();
        assert_eq!(found, Some(Course::new("CS203", "Systems", "Dr. Y")));
        assert_eq!(service.find_by_code("NOPE").unwrap(), None);
    }

    #[test]
    fn submit_reports_exactly_the_missing_fields() {
        let service = scratch_service("missing");

        let err = service.submit("", "Algo", "Dr. X").unwrap_err();
        match err {
            SubmitError::Validation { missing_fields } => {
                assert_eq!(missing_fields, vec![FIELD_CODE]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let err = service.submit("", "", "").unwrap_err();
        match err {
            SubmitError::Validation { missing_fields } => {
                assert_eq!(
                    missing_fields,
                    vec![FIELD_CODE, FIELD_NAME, FIELD_INSTRUCTOR]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        // Nothing was persisted.
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn duplicate_code_returns_first_occurrence() {
        let service = scratch_service("dup");
        service.submit("CS203", "Systems", "Dr. Y").unwrap();
        service.submit("CS203", "Systems II", "Dr. Z").unwrap();

        let found = service.find_by_code("CS203").unwrap().unwrap();
        assert_eq!(found.instructor, "Dr. Y");
        assert_eq!(service.list_all().unwrap().len(), 2);
    }
}
