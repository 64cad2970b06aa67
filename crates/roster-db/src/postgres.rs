//! Postgres-backed [`EntityStore`].
//!
//! Tables are created by the migrations under `migrations/`. All queries are
//! runtime-checked (`sqlx::query_as`) so the crate builds without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use roster_models::{
    Student, StudentId, StudentStatus, Teacher, TeacherId, TeacherRoster, TeacherStudentId,
};
use sqlx::{FromRow, PgPool};
use tracing::Instrument;

use crate::error::StoreError;
use crate::store::{EntityStore, in_request_order};

/// Span for one database round trip, named after the operation and table.
macro_rules! db_span {
    ($operation:expr, $table:expr) => {
        tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = $operation,
            db.sql.table = $table,
        )
    };
}

#[derive(FromRow)]
struct RosterRow {
    teacher_id: TeacherId,
    id: StudentId,
    email: String,
    status: StudentStatus,
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn find_teachers_by_emails(
        &self,
        emails: &[String],
    ) -> Result<Vec<TeacherRoster>, StoreError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        let teachers =
            sqlx::query_as::<_, Teacher>("SELECT id, email FROM teachers WHERE email = ANY($1)")
                .bind(emails)
                .fetch_all(&self.pool)
                .instrument(db_span!("SELECT", "teachers"))
                .await?;

        if teachers.is_empty() {
            return Ok(Vec::new());
        }

        let teacher_ids: Vec<TeacherId> = teachers.iter().map(|t| t.id).collect();
        let rows = sqlx::query_as::<_, RosterRow>(
            r#"SELECT ts.teacher_id, s.id, s.email, s.status
               FROM teacher_students ts
               JOIN students s ON s.id = ts.student_id
               WHERE ts.teacher_id = ANY($1)
               ORDER BY ts.created_at, ts.id"#,
        )
        .bind(teacher_ids.as_slice())
        .fetch_all(&self.pool)
        .instrument(db_span!("SELECT", "teacher_students"))
        .await?;

        let mut rosters: HashMap<TeacherId, TeacherRoster> = teachers
            .into_iter()
            .map(|teacher| (teacher.id, TeacherRoster::new(teacher)))
            .collect();

        for row in rows {
            if let Some(roster) = rosters.get_mut(&row.teacher_id) {
                roster.students.push(Student {
                    id: row.id,
                    email: row.email,
                    status: row.status,
                });
            }
        }

        Ok(in_request_order(
            emails,
            rosters.into_values().collect(),
            |roster| roster.teacher.email.as_str(),
        ))
    }

    async fn find_students_by_emails(&self, emails: &[String]) -> Result<Vec<Student>, StoreError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        let students = sqlx::query_as::<_, Student>(
            "SELECT id, email, status FROM students WHERE email = ANY($1)",
        )
        .bind(emails)
        .fetch_all(&self.pool)
        .instrument(db_span!("SELECT", "students"))
        .await?;

        Ok(in_request_order(emails, students, |s| s.email.as_str()))
    }

    async fn create_teacher(&self, teacher: &Teacher) -> Result<Teacher, StoreError> {
        sqlx::query_as::<_, Teacher>(
            "INSERT INTO teachers (id, email) VALUES ($1, $2) RETURNING id, email",
        )
        .bind(teacher.id)
        .bind(&teacher.email)
        .fetch_one(&self.pool)
        .instrument(db_span!("INSERT", "teachers"))
        .await
        .map_err(|e| {
            if StoreError::is_unique_violation(&e) {
                return StoreError::DuplicateEmail {
                    entity: "teacher",
                    email: teacher.email.clone(),
                };
            }
            StoreError::from(e)
        })
    }

    async fn create_student(&self, student: &Student) -> Result<Student, StoreError> {
        sqlx::query_as::<_, Student>(
            r#"INSERT INTO students (id, email, status)
               VALUES ($1, $2, $3)
               RETURNING id, email, status"#,
        )
        .bind(student.id)
        .bind(&student.email)
        .bind(student.status)
        .fetch_one(&self.pool)
        .instrument(db_span!("INSERT", "students"))
        .await
        .map_err(|e| {
            if StoreError::is_unique_violation(&e) {
                return StoreError::DuplicateEmail {
                    entity: "student",
                    email: student.email.clone(),
                };
            }
            StoreError::from(e)
        })
    }

    async fn update_student_status(
        &self,
        id: StudentId,
        status: StudentStatus,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE students SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .instrument(db_span!("UPDATE", "students"))
            .await?;

        Ok(result.rows_affected())
    }

    async fn link_teacher_student(
        &self,
        teacher_id: TeacherId,
        student_id: StudentId,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO teacher_students (id, teacher_id, student_id) VALUES ($1, $2, $3)",
        )
        .bind(TeacherStudentId::generate())
        .bind(teacher_id)
        .bind(student_id)
        .execute(&self.pool)
        .instrument(db_span!("INSERT", "teacher_students"))
        .await
        .map_err(|e| {
            if StoreError::is_unique_violation(&e) {
                return StoreError::DuplicateAssociation {
                    teacher_id,
                    student_id,
                };
            }
            StoreError::from(e)
        })?;

        Ok(())
    }
}
