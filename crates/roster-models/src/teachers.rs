//! Teacher domain models, rosters and the registration payloads.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidateEmail, ValidationError};

use crate::ids::TeacherId;
use crate::students::Student;

/// A teacher, identified externally by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: TeacherId,
    #[schema(example = "teacherken@gmail.com")]
    pub email: String,
}

/// A teacher together with every student registered under them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherRoster {
    pub teacher: Teacher,
    /// In registration order.
    pub students: Vec<Student>,
}

impl TeacherRoster {
    pub fn new(teacher: Teacher) -> Self {
        Self {
            teacher,
            students: Vec::new(),
        }
    }

    pub fn student_emails(&self) -> Vec<String> {
        self.students.iter().map(|s| s.email.clone()).collect()
    }

    /// Emails of the students that are not suspended.
    pub fn active_student_emails(&self) -> Vec<String> {
        self.students
            .iter()
            .filter(|s| s.is_active())
            .map(|s| s.email.clone())
            .collect()
    }
}

/// Body of `POST /api/register`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct RegisterStudentsDto {
    #[validate(email(message = "teacher must be a valid email"))]
    #[schema(example = "teacherken@gmail.com")]
    pub teacher: String,
    #[validate(
        length(min = 1, message = "students must contain at least 1 email"),
        custom(function = "validate_student_emails")
    )]
    #[schema(example = json!(["studentjon@gmail.com", "studenthon@gmail.com"]))]
    pub students: Vec<String>,
}

fn validate_student_emails(students: &[String]) -> Result<(), ValidationError> {
    match students.iter().position(|email| !email.validate_email()) {
        Some(index) => Err(ValidationError::new("email").with_message(Cow::Owned(format!(
            "students[{}] must be a valid email",
            index
        )))),
        None => Ok(()),
    }
}

/// Query string of `GET /api/commonstudents`; `teacher` may repeat.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommonStudentsQuery {
    /// Teacher emails; repeat the key for several teachers.
    #[serde(default)]
    pub teacher: Vec<String>,
}

impl CommonStudentsQuery {
    /// Requested emails, without blank values.
    pub fn teacher_emails(&self) -> Vec<String> {
        self.teacher
            .iter()
            .filter(|email| !email.trim().is_empty())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommonStudentsResponse {
    #[schema(example = json!(["commonstudent1@gmail.com", "commonstudent2@gmail.com"]))]
    pub students: Vec<String>,
}
