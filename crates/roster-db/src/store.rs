use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use roster_models::{Student, StudentId, StudentStatus, Teacher, TeacherId, TeacherRoster};

use crate::error::StoreError;

/// Persistence boundary for teachers, students and their association.
///
/// Lookups by email are exact, case-sensitive matches against the stored
/// value. No method retries or times out.
#[async_trait]
pub trait EntityStore: Send + Sync + fmt::Debug {
    /// Rosters in the order their emails first appear in `emails`.
    /// Unknown emails are skipped.
    async fn find_teachers_by_emails(
        &self,
        emails: &[String],
    ) -> Result<Vec<TeacherRoster>, StoreError>;

    async fn find_teacher_by_email(&self, email: &str) -> Result<Option<TeacherRoster>, StoreError> {
        let mut rosters = self.find_teachers_by_emails(&[email.to_string()]).await?;
        Ok(rosters.pop())
    }

    /// Students in the order their emails first appear in `emails`.
    /// Unknown emails are skipped.
    async fn find_students_by_emails(&self, emails: &[String]) -> Result<Vec<Student>, StoreError>;

    async fn find_student_by_email(&self, email: &str) -> Result<Option<Student>, StoreError> {
        let mut students = self.find_students_by_emails(&[email.to_string()]).await?;
        Ok(students.pop())
    }

    async fn create_teacher(&self, teacher: &Teacher) -> Result<Teacher, StoreError>;

    async fn create_student(&self, student: &Student) -> Result<Student, StoreError>;

    /// Returns the number of rows updated.
    async fn update_student_status(
        &self,
        id: StudentId,
        status: StudentStatus,
    ) -> Result<u64, StoreError>;

    /// Fails with [`StoreError::DuplicateAssociation`] when the pair exists.
    async fn link_teacher_student(
        &self,
        teacher_id: TeacherId,
        student_id: StudentId,
    ) -> Result<(), StoreError>;
}

pub(crate) fn in_request_order<T>(
    emails: &[String],
    items: Vec<T>,
    email_of: impl Fn(&T) -> &str,
) -> Vec<T> {
    let mut by_email: HashMap<String, T> = items
        .into_iter()
        .map(|item| (email_of(&item).to_string(), item))
        .collect();

    emails
        .iter()
        .filter_map(|email| by_email.remove(email))
        .collect()
}
