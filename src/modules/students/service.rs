use roster_core::AppError;
use roster_db::EntityStore;
use tracing::{info, instrument};
use validator::Validate;

use crate::metrics::track_student_suspended;
use crate::modules::students::model::{StudentStatus, SuspendStudentDto};

pub struct StudentService;

impl StudentService {
    /// Marks the student as suspended. Suspending an already suspended
    /// student succeeds and changes nothing.
    #[instrument(skip(store))]
    pub async fn suspend_student(
        store: &dyn EntityStore,
        dto: SuspendStudentDto,
    ) -> Result<(), AppError> {
        Self::try_suspend_student(store, dto).await.map_err(|e| {
            e.rewrap(
                "Failed to suspend student.",
                "Unexpected error on student suspension.",
            )
        })
    }

    async fn try_suspend_student(
        store: &dyn EntityStore,
        dto: SuspendStudentDto,
    ) -> Result<(), AppError> {
        dto.validate().map_err(AppError::from_validation)?;

        let student = store
            .find_student_by_email(&dto.student)
            .await?
            .ok_or_else(|| AppError::not_found("No student records found"))?;

        store
            .update_student_status(student.id, StudentStatus::Suspended)
            .await?;

        track_student_suspended();
        info!(student = %student.email, "Student suspended");
        Ok(())
    }
}
