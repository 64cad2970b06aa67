pub use roster_models::{
    CommonStudentsQuery, CommonStudentsResponse, RegisterStudentsDto, Teacher, TeacherRoster,
};
