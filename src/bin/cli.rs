use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use roster::cli::{SeedPlan, seed_store};
use roster::modules::notifications::model::NotificationDto;
use roster::modules::notifications::service::NotificationService;
use roster::modules::students::model::SuspendStudentDto;
use roster::modules::students::service::StudentService;
use roster::modules::teachers::model::RegisterStudentsDto;
use roster::modules::teachers::service::TeacherService;
use roster::state::init_store;
use roster_config::{DatabaseConfig, ServerConfig};
use roster_core::AppError;
use roster_db::{EntityStore, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "roster-cli")]
#[command(about = "Roster CLI - Administrative tools for the roster API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Register students under a teacher
    Register {
        /// Teacher email
        #[arg(short = 't', long)]
        teacher: String,

        /// Student emails
        #[arg(required = true)]
        students: Vec<String>,
    },
    /// Suspend a student
    Suspend {
        /// Student email
        student: String,
    },
    /// List students registered under every given teacher
    CommonStudents {
        /// Teacher emails
        #[arg(required = true)]
        teachers: Vec<String>,
    },
    /// List the recipients of a notification
    Notify {
        /// Teacher email
        #[arg(short = 't', long)]
        teacher: String,

        /// Notification text; `@email` mentions add students
        notification: String,
    },
    /// Seed the store with fake teachers and students
    Seed {
        /// Number of teachers to create
        #[arg(long, default_value = "3")]
        teachers: usize,

        /// Size of the student pool
        #[arg(long, default_value = "20")]
        students: usize,

        /// Students registered under each teacher
        #[arg(long, default_value = "5")]
        per_teacher: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Migrate = cli.command {
        let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
        run_migrations(&pool).await?;
        println!("✅ Migrations applied");
        return Ok(());
    }

    let store = init_store(ServerConfig::from_env()?.store_backend).await?;

    if let Err(e) = run(store, cli.command).await {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(store: Arc<dyn EntityStore>, command: Commands) -> Result<(), AppError> {
    let store = store.as_ref();

    match command {
        Commands::Migrate => {}
        Commands::Register { teacher, students } => {
            let count = students.len();
            TeacherService::register_students(
                store,
                RegisterStudentsDto {
                    teacher: teacher.clone(),
                    students,
                },
            )
            .await?;
            println!("✅ Registered {} students for {}", count, teacher);
        }
        Commands::Suspend { student } => {
            StudentService::suspend_student(
                store,
                SuspendStudentDto {
                    student: student.clone(),
                },
            )
            .await?;
            println!("✅ Suspended {}", student);
        }
        Commands::CommonStudents { teachers } => {
            let response = TeacherService::common_students(store, &teachers).await?;
            print_emails(&response.students);
        }
        Commands::Notify {
            teacher,
            notification,
        } => {
            let response = NotificationService::retrieve_for_notifications(
                store,
                NotificationDto {
                    teacher,
                    notification,
                },
            )
            .await?;
            print_emails(&response.recipients);
        }
        Commands::Seed {
            teachers,
            students,
            per_teacher,
        } => {
            println!("🌱 Seeding...");
            let summary = seed_store(
                store,
                &SeedPlan {
                    teachers,
                    students,
                    per_teacher,
                },
            )
            .await?;
            println!(
                "✅ Seeded {} teachers, {} students, {} registrations",
                summary.teachers, summary.students, summary.registrations
            );
        }
    }

    Ok(())
}

fn print_emails(emails: &[String]) {
    if emails.is_empty() {
        println!("(none)");
    }
    for email in emails {
        println!("{}", email);
    }
}
