pub use roster_models::{NotificationDto, NotificationRecipientsResponse};
