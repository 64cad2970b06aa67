//! Store doubles shared by the service unit tests.

use async_trait::async_trait;
use roster_db::{EntityStore, StoreError};
use roster_models::{
    RegisterStudentsDto, Student, StudentId, StudentStatus, Teacher, TeacherId, TeacherRoster,
};

use crate::modules::teachers::service::TeacherService;

/// Every call fails as if the database were unreachable.
#[derive(Debug)]
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl EntityStore for FailingStore {
    async fn find_teachers_by_emails(&self, _: &[String]) -> Result<Vec<TeacherRoster>, StoreError> {
        Err(unavailable())
    }

    async fn find_students_by_emails(&self, _: &[String]) -> Result<Vec<Student>, StoreError> {
        Err(unavailable())
    }

    async fn create_teacher(&self, _: &Teacher) -> Result<Teacher, StoreError> {
        Err(unavailable())
    }

    async fn create_student(&self, _: &Student) -> Result<Student, StoreError> {
        Err(unavailable())
    }

    async fn update_student_status(&self, _: StudentId, _: StudentStatus) -> Result<u64, StoreError> {
        Err(unavailable())
    }

    async fn link_teacher_student(&self, _: TeacherId, _: StudentId) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

/// Delegates to `inner` except for student lookups, which fail.
#[derive(Debug)]
pub struct StudentLookupFails<S>(pub S);

#[async_trait]
impl<S: EntityStore> EntityStore for StudentLookupFails<S> {
    async fn find_teachers_by_emails(
        &self,
        emails: &[String],
    ) -> Result<Vec<TeacherRoster>, StoreError> {
        self.0.find_teachers_by_emails(emails).await
    }

    async fn find_students_by_emails(&self, _: &[String]) -> Result<Vec<Student>, StoreError> {
        Err(unavailable())
    }

    async fn create_teacher(&self, teacher: &Teacher) -> Result<Teacher, StoreError> {
        self.0.create_teacher(teacher).await
    }

    async fn create_student(&self, student: &Student) -> Result<Student, StoreError> {
        self.0.create_student(student).await
    }

    async fn update_student_status(
        &self,
        id: StudentId,
        status: StudentStatus,
    ) -> Result<u64, StoreError> {
        self.0.update_student_status(id, status).await
    }

    async fn link_teacher_student(
        &self,
        teacher_id: TeacherId,
        student_id: StudentId,
    ) -> Result<(), StoreError> {
        self.0.link_teacher_student(teacher_id, student_id).await
    }
}

pub async fn register(store: &dyn EntityStore, teacher: &str, students: &[&str]) {
    TeacherService::register_students(
        store,
        RegisterStudentsDto {
            teacher: teacher.to_string(),
            students: students.iter().map(|s| s.to_string()).collect(),
        },
    )
    .await
    .unwrap();
}

pub async fn suspend(store: &dyn EntityStore, email: &str) {
    let student = store.find_student_by_email(email).await.unwrap().unwrap();
    store
        .update_student_status(student.id, StudentStatus::Suspended)
        .await
        .unwrap();
}
