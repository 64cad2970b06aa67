use roster_models::{StudentId, TeacherId};
use thiserror::Error;

/// Failures reported by an [`EntityStore`](crate::EntityStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("{entity} with email {email} already exists")]
    DuplicateEmail { entity: &'static str, email: String },

    #[error("student {student_id} is already registered to teacher {teacher_id}")]
    DuplicateAssociation {
        teacher_id: TeacherId,
        student_id: StudentId,
    },

    #[error("teacher {teacher_id} or student {student_id} does not exist")]
    MissingReference {
        teacher_id: TeacherId,
        student_id: StudentId,
    },
}

impl StoreError {
    pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
        matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
    }
}
