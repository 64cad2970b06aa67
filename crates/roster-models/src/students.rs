//! Student domain models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, FromRow, Type,
    postgres::{PgTypeInfo, Postgres},
};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::StudentId;

/// Whether a student still receives notifications.
///
/// Stored as the strings `NORMAL` and `SUSPENDED`. The only transition is
/// `Normal` to `Suspended`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatus {
    #[default]
    Normal,
    Suspended,
}

impl StudentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            StudentStatus::Normal => "NORMAL",
            StudentStatus::Suspended => "SUSPENDED",
        }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, StudentStatus::Normal)
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown student status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for StudentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(StudentStatus::Normal),
            "SUSPENDED" => Ok(StudentStatus::Suspended),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl Type<Postgres> for StudentStatus {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Postgres> for StudentStatus {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> Decode<'r, Postgres> for StudentStatus {
    fn decode(
        value: <Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as Decode<'r, Postgres>>::decode(value)?;
        Ok(raw.parse()?)
    }
}

/// A student, identified externally by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: StudentId,
    #[schema(example = "studentjon@gmail.com")]
    pub email: String,
    pub status: StudentStatus,
}

impl Student {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Body of `POST /api/suspend`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct SuspendStudentDto {
    #[validate(email(message = "student must be a valid email"))]
    #[schema(example = "studentmary@gmail.com")]
    pub student: String,
}
