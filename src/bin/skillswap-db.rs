//! Terminal viewer for the skill swap SQLite database.
//!
//! Commands:
//! - skillswap-db show [--compact]
//! - skillswap-db dump
//! - skillswap-db schema
//! - skillswap-db seed

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use sqlx::SqliteConnection;

use skillswap::config::DEFAULT_DATABASE_URL;
use skillswap::viewer::{self, render};

/// Inspect or seed the skill swap database
#[derive(Parser, Debug)]
#[command(name = "skillswap-db")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Database file or sqlite url (defaults to DATABASE_URL)
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print users and skill swap requests, then the table schemas
    Show {
        /// One line per row instead of a grid
        #[arg(long)]
        compact: bool,
    },
    /// Print every table's columns and rows
    Dump,
    /// Print every table's columns
    Schema,
    /// Insert sample users and requests, then show the contents
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let url = cli
        .database
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
    let path: PathBuf = viewer::database_path(&url);

    let db = viewer::open_existing(&path).await?;

    let tables = {
        let mut conn = db.acquire().await?;
        viewer::list_tables(&mut conn).await?
    };
    if tables.is_empty() {
        println!("{}", viewer::NO_TABLES.red());
        return Ok(());
    }

    if let Command::Seed = cli.command {
        let summary = viewer::seed_sample_data(&db).await?;
        println!(
            "{}",
            format!(
                "Sample data added: {} user(s), {} request(s)",
                summary.users, summary.requests
            )
            .green()
        );
        println!("\n{}", "=".repeat(50));
    }

    let mut conn = db.acquire().await?;
    match cli.command {
        Command::Show { compact } => show(&mut conn, &tables, compact).await?,
        Command::Seed => show(&mut conn, &tables, false).await?,
        Command::Dump => dump(&mut conn, &tables).await?,
        Command::Schema => schema(&mut conn, &tables).await?,
    }
    Ok(())
}

fn heading(title: &str, underline: usize) {
    println!("{}", title.bold());
    println!("{}", "-".repeat(underline));
}

async fn show(conn: &mut SqliteConnection, tables: &[String], compact: bool) -> anyhow::Result<()> {
    println!("{}", "SKILL SWAP DATABASE VIEWER".bold().cyan());
    println!("{}", "=".repeat(50));
    println!("Found {} table(s): {}\n", tables.len(), tables.join(", "));

    heading("USERS", 30);
    if !tables.iter().any(|t| t == "users") {
        println!("Users table doesn't exist yet");
    } else {
        let users = viewer::users(&mut *conn).await?;
        if users.is_empty() {
            println!("No users found");
        } else if compact {
            println!("Found {} user(s):", users.len());
            for u in &users {
                println!(
                    "  ID: {}, Email: {}, Name: {}, Location: {}",
                    u.id,
                    u.email,
                    u.name,
                    render::cell(u.location.as_deref())
                );
            }
        } else {
            let rows: Vec<Vec<String>> = users
                .iter()
                .map(|u| {
                    vec![
                        u.id.to_string(),
                        u.email.clone(),
                        u.password.clone(),
                        u.name.clone(),
                        render::cell(u.location.as_deref()),
                        render::cell(u.profile_photo.as_deref()),
                        render::cell(u.availability.as_deref()),
                    ]
                })
                .collect();
            println!(
                "{}",
                render::grid(
                    &["ID", "Email", "Password", "Name", "Location", "Profile Photo", "Availability"],
                    &rows
                )
            );
        }
    }
    println!();

    heading("SKILL SWAP REQUESTS", 40);
    if !tables.iter().any(|t| t == "skill_swap_requests") {
        println!("Skill swap requests table doesn't exist yet");
    } else {
        let requests = viewer::requests(&mut *conn).await?;
        if requests.is_empty() {
            println!("No skill swap requests found");
        } else if compact {
            println!("Found {} request(s):", requests.len());
            for r in &requests {
                println!(
                    "  ID: {}, User ID: {}, Offered: {}, Wanted: {}, Status: {}",
                    r.id, r.user_id, r.skills_offered, r.skills_wanted, r.status
                );
            }
        } else {
            let rows: Vec<Vec<String>> = requests
                .iter()
                .map(|r| {
                    vec![
                        r.id.to_string(),
                        r.user_id.to_string(),
                        r.skills_offered.clone(),
                        r.skills_wanted.clone(),
                        render::cell(r.message.as_deref()),
                        r.status.clone(),
                    ]
                })
                .collect();
            println!(
                "{}",
                render::grid(
                    &["ID", "User ID", "Skills Offered", "Skills Wanted", "Message", "Status"],
                    &rows
                )
            );
        }
    }
    println!();

    schema(conn, tables).await
}

async fn schema(conn: &mut SqliteConnection, tables: &[String]) -> anyhow::Result<()> {
    heading("TABLE SCHEMAS", 20);
    for table in tables {
        println!("\n{}", format!("{} SCHEMA:", table.to_uppercase()).bold());
        for column in viewer::table_columns(&mut *conn, table).await? {
            println!("  - {}", column.describe());
        }
    }
    Ok(())
}

async fn dump(conn: &mut SqliteConnection, tables: &[String]) -> anyhow::Result<()> {
    println!("{}\n", "=== SKILL SWAP DATABASE CONTENTS ===".bold());
    for table in tables {
        println!("{}", format!("TABLE: {table}").bold());
        println!("{}", "-".repeat(50));

        println!("Columns:");
        for column in viewer::table_columns(&mut *conn, table).await? {
            println!("  - {} ({})", column.name, column.decl_type);
        }

        let rows = viewer::dump_table(&mut *conn, table).await?;
        if rows.is_empty() {
            println!("\nData: No rows found");
        } else {
            println!("\nData ({} rows):", rows.len());
            for row in &rows {
                let fields: Vec<String> = row
                    .fields
                    .iter()
                    .map(|f| format!("{}={}", f.column, render::cell(f.value.as_deref())))
                    .collect();
                println!("  {}", fields.join(", "));
            }
        }
        println!("\n{}\n", "=".repeat(60));
    }
    Ok(())
}
