use utoipa::OpenApi;

use roster_core::ErrorResponse;

use crate::modules::notifications::model::{NotificationDto, NotificationRecipientsResponse};
use crate::modules::students::model::{Student, StudentStatus, SuspendStudentDto};
use crate::modules::teachers::model::{CommonStudentsResponse, RegisterStudentsDto, Teacher};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::teachers::controller::register_students,
        crate::modules::teachers::controller::get_common_students,
        crate::modules::students::controller::suspend_student,
        crate::modules::notifications::controller::retrieve_for_notifications,
    ),
    components(
        schemas(
            Teacher,
            Student,
            StudentStatus,
            RegisterStudentsDto,
            CommonStudentsResponse,
            SuspendStudentDto,
            NotificationDto,
            NotificationRecipientsResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Teachers", description = "Student registration and common students"),
        (name = "Students", description = "Student suspension"),
        (name = "Notifications", description = "Notification recipient resolution")
    ),
    info(
        title = "Roster API",
        version = "0.1.0",
        description = "Registers students under teachers, finds common students, suspends students and resolves notification recipients.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
