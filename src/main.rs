use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use staffdir::engine::{Directory, RefreshScheduler};
use staffdir::sources::{HttpDirectoryClient, HttpPresenceClient};
use staffdir::{api, render};

#[derive(Parser)]
#[command(name = "staffdir")]
#[command(about = "Live employee directory aggregation service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the staffdir server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Presence refresh period in seconds
        #[arg(short, long, default_value = "60")]
        interval: u64,
    },
    /// Load the roster once and print it with the org chart
    Check,
}

/// Initialize tracing from RUST_LOG.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "staffdir=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn connect() -> Directory {
    Directory::new(
        Arc::new(HttpDirectoryClient::from_env()),
        Arc::new(HttpPresenceClient::from_env()),
    )
}

async fn serve(port: u16, interval: u64) -> anyhow::Result<()> {
    tracing::info!("Starting staffdir server on port {}", port);

    let directory = connect();

    // A failed initial load is not fatal: the service starts with an empty
    // roster and the next reload can succeed.
    if let Err(e) = directory.load().await {
        tracing::error!("Initial directory load failed: {}", e);
    }

    let _scheduler = RefreshScheduler::spawn(directory.clone(), Duration::from_secs(interval));

    let app = api::create_router(directory);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("staffdir server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    match cli.command {
        Some(Commands::Serve { port, interval }) => {
            serve(port, interval).await?;
        }
        Some(Commands::Check) => {
            let directory = connect();
            let count = directory.load().await?;
            println!("Loaded {} employees\n", count);
            print!("{}", render::render_roster(&directory.current_roster()));

            match directory.org_chart() {
                Some(root) => {
                    println!("\nOrg chart:");
                    print!("{}", render::render_org_tree(&root));
                }
                None => println!("\nNo org chart root (every employee has a manager)"),
            }
        }
        None => {
            // Default: start server with default settings
            serve(3000, 60).await?;
        }
    }

    Ok(())
}
