use std::collections::HashSet;

use roster_core::AppError;
use roster_db::EntityStore;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::metrics::track_notification_recipients;
use crate::modules::notifications::mentions::extract_mentions;
use crate::modules::notifications::model::{NotificationDto, NotificationRecipientsResponse};

pub struct NotificationService;

impl NotificationService {
    /// Validates `dto` and resolves its recipients.
    #[instrument(skip(store, dto), fields(teacher = %dto.teacher))]
    pub async fn retrieve_for_notifications(
        store: &dyn EntityStore,
        dto: NotificationDto,
    ) -> Result<NotificationRecipientsResponse, AppError> {
        dto.validate().map_err(AppError::from_validation)?;

        Self::resolve_recipients(store, &dto.teacher, &dto.notification).await
    }

    /// Students who should receive `notification` from the teacher: the
    /// teacher's active roster followed by the active students mentioned in
    /// the text. Suspended students never appear and no email appears twice.
    ///
    /// Mentions that match no student are dropped.
    pub async fn resolve_recipients(
        store: &dyn EntityStore,
        teacher_email: &str,
        notification: &str,
    ) -> Result<NotificationRecipientsResponse, AppError> {
        Self::try_resolve_recipients(store, teacher_email, notification)
            .await
            .map_err(|e| {
                e.rewrap(
                    "Failed to retrieve notify students.",
                    "Unexpected error on notification recipients retrieval.",
                )
            })
    }

    async fn try_resolve_recipients(
        store: &dyn EntityStore,
        teacher_email: &str,
        notification: &str,
    ) -> Result<NotificationRecipientsResponse, AppError> {
        let roster = store
            .find_teacher_by_email(teacher_email)
            .await?
            .ok_or_else(|| AppError::not_found("No teacher found"))?;

        let mentions = extract_mentions(notification);
        let mentioned = store
            .find_students_by_emails(&mentions)
            .await
            .map_err(|e| {
                warn!(error = %e, "Mentioned student lookup failed");
                AppError::not_found("No student records found")
            })?;

        let active_mentions = mentioned
            .into_iter()
            .filter(|s| s.is_active())
            .map(|s| s.email);

        let recipients = dedupe(roster.active_student_emails().into_iter().chain(active_mentions));

        track_notification_recipients(recipients.len());
        info!(
            mentions = mentions.len(),
            recipients = recipients.len(),
            "Notification recipients resolved"
        );
        Ok(NotificationRecipientsResponse { recipients })
    }
}

/// Keeps the first occurrence of every email.
fn dedupe(emails: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    emails
        .into_iter()
        .filter(|email| seen.insert(email.clone()))
        .collect()
}
