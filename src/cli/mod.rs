//! Support code for the `roster-cli` binary.

pub mod seeder;

pub use seeder::{SeedPlan, SeedSummary, generate_registrations, seed_store};
