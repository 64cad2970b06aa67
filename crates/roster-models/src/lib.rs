//! # Roster Models
//!
//! Domain models and DTOs for the roster API.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed entity ids
//! - [`teachers`]: Teachers, rosters and the registration / common-students payloads
//! - [`students`]: Students, their status and the suspension payload
//! - [`notifications`]: Notification request and recipient list
//!
//! # Example
//!
//! ```ignore
//! use roster_models::{RegisterStudentsDto, StudentStatus};
//! use validator::Validate;
//!
//! let dto = RegisterStudentsDto {
//!     teacher: "teacherken@gmail.com".into(),
//!     students: vec!["studentjon@gmail.com".into()],
//! };
//! assert!(dto.validate().is_ok());
//! assert!(StudentStatus::default().is_active());
//! ```

pub mod ids;
pub mod notifications;
pub mod students;
pub mod teachers;

pub use ids::{StudentId, TeacherId, TeacherStudentId};
pub use notifications::{NotificationDto, NotificationRecipientsResponse};
pub use students::{ParseStatusError, Student, StudentStatus, SuspendStudentDto};
pub use teachers::{
    CommonStudentsQuery, CommonStudentsResponse, RegisterStudentsDto, Teacher, TeacherRoster,
};
