//! Fake data for local development.
//!
//! Teachers and students get `fake` names turned into addresses under
//! `example.com`, tagged with a per-run suffix so repeated runs do not
//! collide. Every registration goes through [`TeacherService`], so seeded
//! data obeys the same rules as API traffic.

use std::collections::HashSet;
use std::time::Instant;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use roster_core::AppError;
use roster_db::EntityStore;
use uuid::Uuid;

use crate::modules::teachers::model::RegisterStudentsDto;
use crate::modules::teachers::service::TeacherService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    pub teachers: usize,
    pub students: usize,
    /// Students registered under each teacher, capped at `students`.
    pub per_teacher: usize,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            teachers: 3,
            students: 20,
            per_teacher: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub teachers: usize,
    pub students: usize,
    pub registrations: usize,
}

/// One registration per teacher. Teacher `t` gets a window of
/// `per_teacher` students starting at `t * per_teacher`, wrapping around the
/// student pool, so neighbouring teachers share students once the pool is
/// exhausted.
pub fn generate_registrations(plan: &SeedPlan) -> Vec<RegisterStudentsDto> {
    let run = Uuid::new_v4().simple().to_string();
    let run = &run[..8];

    let students: Vec<String> = (0..plan.students)
        .map(|i| fake_email("student", i, run))
        .collect();
    if students.is_empty() {
        return Vec::new();
    }

    let per_teacher = plan.per_teacher.min(students.len());
    if per_teacher == 0 {
        return Vec::new();
    }

    (0..plan.teachers)
        .map(|t| RegisterStudentsDto {
            teacher: fake_email("teacher", t, run),
            students: (0..per_teacher)
                .map(|j| students[(t * per_teacher + j) % students.len()].clone())
                .collect(),
        })
        .collect()
}

fn fake_email(role: &str, index: usize, run: &str) -> String {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    format!(
        "{}.{}+{}{}-{}@example.com",
        local_part(&first),
        local_part(&last),
        role,
        index,
        run
    )
}

fn local_part(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub async fn seed_store(store: &dyn EntityStore, plan: &SeedPlan) -> Result<SeedSummary, AppError> {
    let start = Instant::now();
    let registrations = generate_registrations(plan);

    let mut summary = SeedSummary::default();
    let mut students = HashSet::new();

    for dto in registrations {
        summary.registrations += dto.students.len();
        students.extend(dto.students.iter().cloned());
        TeacherService::register_students(store, dto).await?;
        summary.teachers += 1;
    }
    summary.students = students.len();

    tracing::info!(
        teachers = summary.teachers,
        students = summary.students,
        registrations = summary.registrations,
        elapsed_ms = %start.elapsed().as_millis(),
        "Seeding complete"
    );
    Ok(summary)
}
