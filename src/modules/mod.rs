pub mod notifications;
pub mod students;
pub mod teachers;
