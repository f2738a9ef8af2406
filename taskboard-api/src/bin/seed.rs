/// Development database seeder
///
/// Inserts sample users, projects, and tasks for local development.
/// Run with:
///
/// ```text
/// DATABASE_URL=postgresql://... cargo run --bin seed
/// ```
///
/// Both sample users log in with the password "password123".

use chrono::{DateTime, Utc};
use taskboard_api::config::Config;
use taskboard_shared::{
    auth::password::hash_password,
    db::{
        migrations::run_migrations,
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    models::{
        project::{CreateProject, Project},
        task::{CreateTask, Task},
        user::{CreateUser, User},
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SEED_PASSWORD: &str = "password123";

/// Parses a YYYY-MM-DD seed date as midnight UTC
fn seed_date(s: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(format!("{}T00:00:00Z", s).parse::<DateTime<Utc>>()?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let password_hash = hash_password(SEED_PASSWORD)?;

    let john = User::create(
        &pool,
        CreateUser {
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
            password_hash: password_hash.clone(),
        },
    )
    .await?;

    let jane = User::create(
        &pool,
        CreateUser {
            username: "jane_smith".to_string(),
            email: "jane@example.com".to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(john = john.id, jane = jane.id, "Sample users inserted");

    let website = Project::create(
        &pool,
        CreateProject {
            name: "Website Redesign".to_string(),
            description: Some(
                "Complete overhaul of company website with modern design".to_string(),
            ),
            status: Some("active".to_string()),
            due_date: Some(seed_date("2026-12-31")?),
            user_id: john.id,
        },
    )
    .await?;

    let mobile = Project::create(
        &pool,
        CreateProject {
            name: "Mobile App Development".to_string(),
            description: Some("Build iOS and Android app for customer portal".to_string()),
            status: Some("active".to_string()),
            due_date: Some(seed_date("2026-11-15")?),
            user_id: john.id,
        },
    )
    .await?;

    let marketing = Project::create(
        &pool,
        CreateProject {
            name: "Marketing Campaign".to_string(),
            description: Some("Q4 social media and advertising campaign".to_string()),
            status: Some("planning".to_string()),
            due_date: Some(seed_date("2026-10-01")?),
            user_id: jane.id,
        },
    )
    .await?;

    tracing::info!("Sample projects inserted");

    let tasks = [
        CreateTask {
            title: "Create wireframes".to_string(),
            description: Some("Design initial wireframes for all main pages".to_string()),
            completed: Some(false),
            priority: Some("high".to_string()),
            due_date: Some(seed_date("2026-09-15")?),
            project_id: website.id,
        },
        CreateTask {
            title: "Set up development environment".to_string(),
            description: Some(
                "Configure local dev environment with necessary tools".to_string(),
            ),
            completed: Some(true),
            priority: Some("high".to_string()),
            due_date: Some(seed_date("2026-08-20")?),
            project_id: website.id,
        },
        CreateTask {
            title: "Research mobile frameworks".to_string(),
            description: Some(
                "Compare React Native vs Flutter for app development".to_string(),
            ),
            completed: Some(false),
            priority: Some("medium".to_string()),
            due_date: Some(seed_date("2026-09-30")?),
            project_id: mobile.id,
        },
        CreateTask {
            title: "Create app mockups".to_string(),
            description: Some(
                "Design user interface mockups for key app screens".to_string(),
            ),
            completed: Some(false),
            priority: Some("medium".to_string()),
            due_date: Some(seed_date("2026-10-05")?),
            project_id: mobile.id,
        },
        CreateTask {
            title: "Define target audience".to_string(),
            description: Some(
                "Research and define primary target demographics".to_string(),
            ),
            completed: Some(true),
            priority: Some("high".to_string()),
            due_date: Some(seed_date("2026-08-25")?),
            project_id: marketing.id,
        },
        CreateTask {
            title: "Create content calendar".to_string(),
            description: Some("Plan social media posts for next 3 months".to_string()),
            completed: Some(false),
            priority: Some("medium".to_string()),
            due_date: Some(seed_date("2026-09-20")?),
            project_id: marketing.id,
        },
    ];

    for task in tasks {
        Task::create(&pool, task).await?;
    }

    tracing::info!("Sample tasks inserted");

    close_pool(pool).await;
    tracing::info!("Database seeding completed");

    Ok(())
}
