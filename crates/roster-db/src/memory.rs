//! In-process [`EntityStore`] guarded by a tokio `RwLock`.
//!
//! Enforces the same constraints as the Postgres schema: unique teacher
//! email, unique student email and unique teacher-student pair.

use std::collections::HashMap;

use async_trait::async_trait;
use roster_models::{Student, StudentId, StudentStatus, Teacher, TeacherId, TeacherRoster};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::{EntityStore, in_request_order};

#[derive(Debug)]
struct Association {
    teacher_id: TeacherId,
    student_id: StudentId,
}

#[derive(Debug, Default)]
struct Tables {
    teachers: HashMap<String, Teacher>,
    students: HashMap<StudentId, Student>,
    student_ids: HashMap<String, StudentId>,
    // Insertion order is roster order.
    associations: Vec<Association>,
}

impl Tables {
    fn roster(&self, teacher: &Teacher) -> TeacherRoster {
        let students = self
            .associations
            .iter()
            .filter(|a| a.teacher_id == teacher.id)
            .filter_map(|a| self.students.get(&a.student_id).cloned())
            .collect();

        TeacherRoster {
            teacher: teacher.clone(),
            students,
        }
    }
}

/// Row counts, mostly useful in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub teachers: usize,
    pub students: usize,
    pub associations: usize,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stats(&self) -> StoreStats {
        let tables = self.tables.read().await;
        StoreStats {
            teachers: tables.teachers.len(),
            students: tables.students.len(),
            associations: tables.associations.len(),
        }
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_teachers_by_emails(
        &self,
        emails: &[String],
    ) -> Result<Vec<TeacherRoster>, StoreError> {
        let tables = self.tables.read().await;
        let rosters: Vec<TeacherRoster> = emails
            .iter()
            .filter_map(|email| tables.teachers.get(email))
            .map(|teacher| tables.roster(teacher))
            .collect();

        Ok(in_request_order(emails, rosters, |roster| {
            roster.teacher.email.as_str()
        }))
    }

    async fn find_students_by_emails(&self, emails: &[String]) -> Result<Vec<Student>, StoreError> {
        let tables = self.tables.read().await;
        let students: Vec<Student> = emails
            .iter()
            .filter_map(|email| tables.student_ids.get(email))
            .filter_map(|id| tables.students.get(id).cloned())
            .collect();

        Ok(in_request_order(emails, students, |s| s.email.as_str()))
    }

    async fn create_teacher(&self, teacher: &Teacher) -> Result<Teacher, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.teachers.contains_key(&teacher.email) {
            return Err(StoreError::DuplicateEmail {
                entity: "teacher",
                email: teacher.email.clone(),
            });
        }

        tables
            .teachers
            .insert(teacher.email.clone(), teacher.clone());
        Ok(teacher.clone())
    }

    async fn create_student(&self, student: &Student) -> Result<Student, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.student_ids.contains_key(&student.email) {
            return Err(StoreError::DuplicateEmail {
                entity: "student",
                email: student.email.clone(),
            });
        }

        tables
            .student_ids
            .insert(student.email.clone(), student.id);
        tables.students.insert(student.id, student.clone());
        Ok(student.clone())
    }

    async fn update_student_status(
        &self,
        id: StudentId,
        status: StudentStatus,
    ) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        match tables.students.get_mut(&id) {
            Some(student) => {
                student.status = status;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn link_teacher_student(
        &self,
        teacher_id: TeacherId,
        student_id: StudentId,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.teachers.values().any(|t| t.id == teacher_id)
            || !tables.students.contains_key(&student_id)
        {
            return Err(StoreError::MissingReference {
                teacher_id,
                student_id,
            });
        }

        if tables
            .associations
            .iter()
            .any(|a| a.teacher_id == teacher_id && a.student_id == student_id)
        {
            return Err(StoreError::DuplicateAssociation {
                teacher_id,
                student_id,
            });
        }

        tables.associations.push(Association {
            teacher_id,
            student_id,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher(email: &str) -> Teacher {
        Teacher {
            id: TeacherId::generate(),
            email: email.into(),
        }
    }

    fn student(email: &str) -> Student {
        Student {
            id: StudentId::generate(),
            email: email.into(),
            status: StudentStatus::Normal,
        }
    }

    #[tokio::test]
    async fn rosters_follow_registration_order() {
        let store = MemoryStore::new();
        let ken = store.create_teacher(&teacher("ken@x.com")).await.unwrap();
        let b = store.create_student(&student("b@x.com")).await.unwrap();
        let a = store.create_student(&student("a@x.com")).await.unwrap();
        store.link_teacher_student(ken.id, b.id).await.unwrap();
        store.link_teacher_student(ken.id, a.id).await.unwrap();

        let roster = store.find_teacher_by_email("ken@x.com").await.unwrap().unwrap();
        assert_eq!(roster.student_emails(), vec!["b@x.com", "a@x.com"]);
    }

    #[tokio::test]
    async fn lookups_are_case_sensitive_and_skip_unknown_emails() {
        let store = MemoryStore::new();
        store.create_student(&student("a@x.com")).await.unwrap();

        assert!(store.find_student_by_email("A@x.com").await.unwrap().is_none());
        let found = store
            .find_students_by_emails(&["ghost@x.com".into(), "a@x.com".into()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].email, "a@x.com");
    }

    #[tokio::test]
    async fn teachers_come_back_in_request_order() {
        let store = MemoryStore::new();
        store.create_teacher(&teacher("one@x.com")).await.unwrap();
        store.create_teacher(&teacher("two@x.com")).await.unwrap();

        let rosters = store
            .find_teachers_by_emails(&["two@x.com".into(), "one@x.com".into(), "two@x.com".into()])
            .await
            .unwrap();
        let emails: Vec<_> = rosters.iter().map(|r| r.teacher.email.as_str()).collect();
        assert_eq!(emails, vec!["two@x.com", "one@x.com"]);
    }

    #[tokio::test]
    async fn duplicate_emails_are_rejected() {
        let store = MemoryStore::new();
        store.create_teacher(&teacher("ken@x.com")).await.unwrap();
        store.create_student(&student("a@x.com")).await.unwrap();

        assert!(matches!(
            store.create_teacher(&teacher("ken@x.com")).await,
            Err(StoreError::DuplicateEmail { entity: "teacher", .. })
        ));
        assert!(matches!(
            store.create_student(&student("a@x.com")).await,
            Err(StoreError::DuplicateEmail { entity: "student", .. })
        ));
    }

    #[tokio::test]
    async fn duplicate_pairs_are_rejected() {
        let store = MemoryStore::new();
        let ken = store.create_teacher(&teacher("ken@x.com")).await.unwrap();
        let a = store.create_student(&student("a@x.com")).await.unwrap();

        store.link_teacher_student(ken.id, a.id).await.unwrap();
        assert!(matches!(
            store.link_teacher_student(ken.id, a.id).await,
            Err(StoreError::DuplicateAssociation { .. })
        ));
        assert_eq!(store.stats().await.associations, 1);
    }

    #[tokio::test]
    async fn status_update_reports_rows_touched() {
        let store = MemoryStore::new();
        let a = store.create_student(&student("a@x.com")).await.unwrap();

        assert_eq!(
            store
                .update_student_status(a.id, StudentStatus::Suspended)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            store
                .find_student_by_email("a@x.com")
                .await
                .unwrap()
                .unwrap()
                .status,
            StudentStatus::Suspended
        );
        assert_eq!(
            store
                .update_student_status(StudentId::generate(), StudentStatus::Suspended)
                .await
                .unwrap(),
            0
        );
    }
}
