//! Adhyayan CLI: inspect the built-in catalog offline and work the admin
//! review queue over the API.
//!
//! API commands read ADHYAYAN_API_URL (default http://localhost:3000) and
//! ADHYAYAN_TOKEN. Get a token with `adhyayan login`.

use adhyayan_cli::client::{ApiClient, ContentSummary};
use adhyayan_cli::{init_tracing, render_tree, truncate_string};
use adhyayan_core::matcher::ResolveQuery;
use adhyayan_core::{resolve, Catalog};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "adhyayan", about = "Adhyayan study-material platform CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the catalog tree
    Tree {
        /// Only this department (slug)
        #[arg(long)]
        department: Option<String>,
        /// Levels to print; 0 prints everything
        #[arg(long, default_value = "3")]
        depth: usize,
    },
    /// Resolve free-text classification against the catalog
    Resolve {
        #[arg(long, default_value = "")]
        department: String,
        #[arg(long, default_value = "")]
        branch: String,
        #[arg(long, default_value = "")]
        year: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long)]
        topic: Option<String>,
    },
    /// Log in and print a bearer token
    Login {
        #[arg(long)]
        email: String,
        /// Falls back to ADHYAYAN_PASSWORD
        #[arg(long)]
        password: Option<String>,
    },
    /// List the review queue
    Queue {
        /// pending, approved or rejected
        #[arg(long, default_value = "pending")]
        status: String,
        #[arg(long, default_value = "20")]
        limit: u32,
        /// Output format: json or table
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Approve pending content
    Approve {
        /// Content UUID
        id: Uuid,
    },
    /// Reject pending content
    Reject {
        /// Content UUID
        id: Uuid,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Content and user counts
    Stats,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn print_queue(items: &[ContentSummary]) {
    if items.is_empty() {
        println!("Queue is empty");
        return;
    }

    println!(
        "{:<36}  {:<10}  {:<40}  {:<8}  {:<24}  {}",
        "ID", "TYPE", "TITLE", "BRANCH", "SUBJECT", "UPLOADED"
    );
    for item in items {
        println!(
            "{:<36}  {:<10}  {:<40}  {:<8}  {:<24}  {}",
            item.id,
            item.content_type,
            truncate_string(&item.title, 40),
            truncate_string(&item.branch, 8),
            truncate_string(&item.subject, 24),
            item.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    println!("\n{} item(s)", items.len());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tree { department, depth } => {
            let catalog = Catalog::builtin();
            let nodes = match department.as_deref() {
                Some(slug) => vec![catalog
                    .department(slug)
                    .with_context(|| format!("Unknown department '{}'", slug))?
                    .clone()],
                None => catalog.departments().to_vec(),
            };
            print!("{}", render_tree(&nodes, depth));
        }
        Commands::Resolve {
            department,
            branch,
            year,
            subject,
            topic,
        } => {
            let catalog = Catalog::builtin();
            let query = ResolveQuery {
                department,
                branch,
                year,
                subject,
                topic,
            };
            let resolved = resolve(&catalog, &query.fields());
            print_json(&resolved.to_location())?;
        }
        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => std::env::var("ADHYAYAN_PASSWORD")
                    .context("Pass --password or set ADHYAYAN_PASSWORD")?,
            };
            let client = ApiClient::from_env()?;
            let login = client.login(&email, &password).await?;
            tracing::info!(expires_at = %login.expires_at, "Logged in");
            println!("{}", login.token);
        }
        Commands::Queue {
            status,
            limit,
            format,
        } => {
            let client = ApiClient::from_env()?;
            let items = client.review_queue(&status, limit).await?;
            match format.as_str() {
                "json" => print_json(&items)?,
                "table" => print_queue(&items),
                other => {
                    return Err(anyhow::anyhow!(
                        "Invalid format '{}'. Must be: json or table",
                        other
                    ))
                }
            }
        }
        Commands::Approve { id } => {
            let client = ApiClient::from_env()?;
            let item = client.approve(id).await?;
            println!("Approved '{}' ({})", item.title, item.id);
            if let Some(url) = item.canonical_url {
                println!("Filed under {}", url);
            }
        }
        Commands::Reject { id, reason } => {
            let client = ApiClient::from_env()?;
            let item = client.reject(id, reason.as_deref()).await?;
            println!("Rejected '{}' ({})", item.title, item.id);
        }
        Commands::Stats => {
            let client = ApiClient::from_env()?;
            print_json(&client.stats().await?)?;
        }
    }

    Ok(())
}
