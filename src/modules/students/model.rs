pub use roster_models::{Student, StudentStatus, SuspendStudentDto};
