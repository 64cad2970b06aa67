use roster_core::AppError;
use roster_db::EntityStore;
use roster_models::{Student, StudentId, StudentStatus, TeacherId};
use tracing::{info, instrument};
use validator::Validate;

use crate::metrics::{track_student_created, track_students_registered, track_teacher_created};
use crate::modules::teachers::model::{
    CommonStudentsResponse, RegisterStudentsDto, Teacher, TeacherRoster,
};

pub struct TeacherService;

impl TeacherService {
    /// Registers every student in `dto` under the teacher, creating the
    /// teacher and any unknown student on the way.
    ///
    /// Registration runs one student at a time and is not transactional: a
    /// failure part way leaves the earlier links in place. Re-registering an
    /// existing pair fails.
    #[instrument(skip(store, dto), fields(teacher = %dto.teacher, students = dto.students.len()))]
    pub async fn register_students(
        store: &dyn EntityStore,
        dto: RegisterStudentsDto,
    ) -> Result<(), AppError> {
        Self::try_register_students(store, dto).await.map_err(|e| {
            e.rewrap(
                "Failed to register students.",
                "Unexpected error on student registration.",
            )
        })
    }

    async fn try_register_students(
        store: &dyn EntityStore,
        dto: RegisterStudentsDto,
    ) -> Result<(), AppError> {
        dto.validate().map_err(AppError::from_validation)?;

        let teacher = Self::find_or_create_teacher(store, &dto.teacher).await?;

        for email in &dto.students {
            let student = Self::find_or_create_student(store, email).await?;
            store.link_teacher_student(teacher.id, student.id).await?;
            info!(student = %student.email, "Student registered to teacher");
        }

        track_students_registered(dto.students.len());
        info!(
            "Successfully registered {} students for {}",
            dto.students.len(),
            teacher.email
        );
        Ok(())
    }

    async fn find_or_create_teacher(
        store: &dyn EntityStore,
        email: &str,
    ) -> Result<Teacher, AppError> {
        if let Some(roster) = store.find_teacher_by_email(email).await? {
            return Ok(roster.teacher);
        }

        let teacher = store
            .create_teacher(&Teacher {
                id: TeacherId::generate(),
                email: email.to_string(),
            })
            .await?;
        track_teacher_created();
        info!(teacher = %teacher.email, "Teacher created");
        Ok(teacher)
    }

    async fn find_or_create_student(
        store: &dyn EntityStore,
        email: &str,
    ) -> Result<Student, AppError> {
        if let Some(student) = store.find_student_by_email(email).await? {
            return Ok(student);
        }

        let student = store
            .create_student(&Student {
                id: StudentId::generate(),
                email: email.to_string(),
                status: StudentStatus::Normal,
            })
            .await?;
        track_student_created();
        info!(student = %student.email, "Student created");
        Ok(student)
    }

    /// Students registered under every one of `teacher_emails`, in the
    /// roster order of the first teacher. Suspended students are included.
    #[instrument(skip(store))]
    pub async fn common_students(
        store: &dyn EntityStore,
        teacher_emails: &[String],
    ) -> Result<CommonStudentsResponse, AppError> {
        Self::try_common_students(store, teacher_emails)
            .await
            .map_err(|e| {
                e.rewrap(
                    "Failed to retrieve students.",
                    "Unexpected error on common students retrieval.",
                )
            })
    }

    async fn try_common_students(
        store: &dyn EntityStore,
        teacher_emails: &[String],
    ) -> Result<CommonStudentsResponse, AppError> {
        if teacher_emails.is_empty() {
            return Err(AppError::validation(
                "At least one teacher email is required.",
            ));
        }

        let rosters = store.find_teachers_by_emails(teacher_emails).await?;
        if rosters.is_empty() {
            return Err(AppError::not_found("No teachers found"));
        }
        if rosters.len() != teacher_emails.len() {
            return Err(AppError::not_found("Some teachers not found"));
        }

        let students = intersect_rosters(&rosters);
        info!(
            teachers = rosters.len(),
            students = students.len(),
            "Common students retrieved"
        );
        Ok(CommonStudentsResponse { students })
    }
}

/// Emails present in every roster, ordered as in the first one.
fn intersect_rosters(rosters: &[TeacherRoster]) -> Vec<String> {
    let Some((first, rest)) = rosters.split_first() else {
        return Vec::new();
    };

    let mut common = first.student_emails();
    for roster in rest {
        common.retain(|email| roster.students.iter().any(|s| &s.email == email));
    }
    common
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingStore, register};
    use roster_core::ErrorKind;
    use roster_db::{MemoryStore, StoreStats};

    fn dto(teacher: &str, students: &[&str]) -> RegisterStudentsDto {
        RegisterStudentsDto {
            teacher: teacher.into(),
            students: students.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn emails(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn register_creates_teacher_students_and_links() {
        let store = MemoryStore::new();

        TeacherService::register_students(
            &store,
            dto("teacherken@gmail.com", &["studentjon@gmail.com", "studenthon@gmail.com"]),
        )
        .await
        .unwrap();

        let stats = store.stats().await;
        assert_eq!((stats.teachers, stats.students, stats.associations), (1, 2, 2));
        let roster = store
            .find_teacher_by_email("teacherken@gmail.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            roster.student_emails(),
            vec!["studentjon@gmail.com", "studenthon@gmail.com"]
        );
    }

    #[tokio::test]
    async fn register_reuses_existing_students_across_teachers() {
        let store = MemoryStore::new();
        register(&store, "ken@x.com", &["shared@x.com"]).await;
        register(&store, "joe@x.com", &["shared@x.com", "solo@x.com"]).await;

        let stats = store.stats().await;
        assert_eq!((stats.teachers, stats.students, stats.associations), (2, 2, 3));
    }

    #[tokio::test]
    async fn register_rejects_invalid_payload_without_touching_store() {
        let store = MemoryStore::new();

        let err = TeacherService::register_students(&store, dto("ken@x.com", &[]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "students must contain at least 1 email");

        let err = TeacherService::register_students(&store, dto("ken", &["a@x.com"]))
            .await
            .unwrap_err();
        assert_eq!(err.message, "teacher must be a valid email");

        assert_eq!(store.stats().await, StoreStats::default());
    }

    #[tokio::test]
    async fn re_registering_a_pair_fails_but_keeps_earlier_links() {
        let store = MemoryStore::new();
        register(&store, "ken@x.com", &["a@x.com"]).await;

        let err = TeacherService::register_students(&store, dto("ken@x.com", &["b@x.com", "a@x.com"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, "Failed to register students.");
        assert!(err.detail.is_some());

        let roster = store.find_teacher_by_email("ken@x.com").await.unwrap().unwrap();
        assert_eq!(roster.student_emails(), vec!["a@x.com", "b@x.com"]);
    }

    #[tokio::test]
    async fn repeated_student_in_one_call_fails_on_second_link() {
        let store = MemoryStore::new();

        let err = TeacherService::register_students(&store, dto("t@x.com", &["a@x.com", "a@x.com"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, "Failed to register students.");

        let stats = store.stats().await;
        assert_eq!((stats.teachers, stats.students, stats.associations), (1, 1, 1));
    }

    #[tokio::test]
    async fn register_store_failure_is_internal() {
        let err = TeacherService::register_students(&FailingStore, dto("ken@x.com", &["a@x.com"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, "Failed to register students.");
    }

    #[tokio::test]
    async fn common_students_of_one_teacher_is_the_roster() {
        let store = MemoryStore::new();
        register(&store, "ken@x.com", &["b@x.com", "a@x.com"]).await;

        let response = TeacherService::common_students(&store, &emails(&["ken@x.com"]))
            .await
            .unwrap();
        assert_eq!(response.students, vec!["b@x.com", "a@x.com"]);
    }

    #[tokio::test]
    async fn common_students_intersects_in_first_teacher_order() {
        let store = MemoryStore::new();
        register(&store, "ken@x.com", &["c@x.com", "a@x.com", "b@x.com"]).await;
        register(&store, "joe@x.com", &["b@x.com", "c@x.com", "z@x.com"]).await;

        let response =
            TeacherService::common_students(&store, &emails(&["ken@x.com", "joe@x.com"]))
                .await
                .unwrap();
        assert_eq!(response.students, vec!["c@x.com", "b@x.com"]);
    }

    #[tokio::test]
    async fn common_students_may_be_empty() {
        let store = MemoryStore::new();
        register(&store, "ken@x.com", &["a@x.com"]).await;
        register(&store, "joe@x.com", &["b@x.com"]).await;

        let response =
            TeacherService::common_students(&store, &emails(&["ken@x.com", "joe@x.com"]))
                .await
                .unwrap();
        assert!(response.students.is_empty());
    }

    #[tokio::test]
    async fn common_students_includes_suspended_students() {
        let store = MemoryStore::new();
        register(&store, "ken@x.com", &["a@x.com"]).await;
        let student = store.find_student_by_email("a@x.com").await.unwrap().unwrap();
        store
            .update_student_status(student.id, StudentStatus::Suspended)
            .await
            .unwrap();

        let response = TeacherService::common_students(&store, &emails(&["ken@x.com"]))
            .await
            .unwrap();
        assert_eq!(response.students, vec!["a@x.com"]);
    }

    #[tokio::test]
    async fn common_students_reports_missing_teachers() {
        let store = MemoryStore::new();
        register(&store, "ken@x.com", &["a@x.com"]).await;

        let err = TeacherService::common_students(&store, &emails(&["ghost@x.com"]))
            .await
            .unwrap_err();
        assert_eq!((err.kind, err.message.as_str()), (ErrorKind::NotFound, "No teachers found"));

        let err = TeacherService::common_students(&store, &emails(&["ken@x.com", "ghost@x.com"]))
            .await
            .unwrap_err();
        assert_eq!(
            (err.kind, err.message.as_str()),
            (ErrorKind::NotFound, "Some teachers not found")
        );
    }

    #[tokio::test]
    async fn common_students_requires_a_teacher() {
        let err = TeacherService::common_students(&MemoryStore::new(), &[])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn common_students_store_failure_is_internal() {
        let err = TeacherService::common_students(&FailingStore, &emails(&["ken@x.com"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert_eq!(err.message, "Failed to retrieve students.");
    }
}
