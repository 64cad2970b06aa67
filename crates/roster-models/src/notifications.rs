//! Notification request and recipient list.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /api/retrievefornotifications`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct NotificationDto {
    #[validate(email(message = "teacher must be a valid email"))]
    #[schema(example = "teacherken@gmail.com")]
    pub teacher: String,
    /// Free text; `@email` tokens add mentioned students to the recipients.
    #[validate(length(min = 1, message = "notification is not allowed to be empty"))]
    #[schema(example = "Hello students! @studentagnes@gmail.com @studentmiche@gmail.com")]
    pub notification: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotificationRecipientsResponse {
    /// Deduplicated, never contains a suspended student.
    #[schema(example = json!(["studentbob@gmail.com", "studentagnes@gmail.com"]))]
    pub recipients: Vec<String>,
}
