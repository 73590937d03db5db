use colored::*;
use futures::FutureExt;
use sea_orm::ConnectOptions;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

/// Applies every migration in order with a status line each.
///
/// Tables and indexes are created `IF NOT EXISTS`, so running this against an
/// already migrated database is harmless.
pub async fn run_all_migrations(url: &str) {
    let mut options = ConnectOptions::new(url.to_owned());
    options.sqlx_logging(false);
    let db = sea_orm::Database::connect(options)
        .await
        .expect("DB connection failed");

    let migrations = <crate::Migrator as MigratorTrait>::migrations();
    let total = migrations.len();
    println!("Running {total} migrations against {}", url.dimmed());

    let schema_manager = SchemaManager::new(&db);
    let started = Instant::now();
    for (i, migration) in migrations.into_iter().enumerate() {
        apply(&schema_manager, migration, i + 1, total).await;
    }

    println!(
        "{} {}",
        "Schema up to date".green().bold(),
        format!("({:.2?})", started.elapsed()).dimmed()
    );
}

async fn apply(
    schema_manager: &SchemaManager<'_>,
    migration: Box<dyn MigrationTrait>,
    position: usize,
    total: usize,
) {
    let label = format!("[{position}/{total}] {}", migration.name().bold());
    print!("{label}{} ", ".".repeat(STATUS_COLUMN.saturating_sub(label.len())));
    io::stdout().flush().ok();

    let start = Instant::now();
    let outcome = std::panic::AssertUnwindSafe(migration.up(schema_manager))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(())) => println!("{} {}", "done".green(), format!("({:.2?})", start.elapsed()).dimmed()),
        Ok(Err(err)) => {
            println!("{}", "failed".red());
            eprintln!("  {err}");
            std::process::exit(1);
        }
        Err(_) => {
            println!("{}", "panicked".red());
            std::process::exit(1);
        }
    }
}
