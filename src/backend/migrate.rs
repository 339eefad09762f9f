/**
 * notekeep-migrate
 *
 * Apply, roll back and inspect database migrations outside the server.
 * Uses the same configuration sources as the server (`DATABASE_URL` or the
 * `DB_*` variables, `.env`, `notekeep.toml`).
 */

#[cfg(feature = "ssr")]
use clap::{Parser, Subcommand};

#[cfg(feature = "ssr")]
#[derive(Parser, Debug)]
#[command(name = "notekeep-migrate", version, about = "Manage the notekeep database schema")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[cfg(feature = "ssr")]
#[derive(Subcommand, Debug)]
enum Command {
    /// Apply all pending migrations
    Up,
    /// Revert the most recent migrations
    Down {
        /// How many migrations to revert
        #[arg(long, default_value_t = 1)]
        steps: usize,
    },
    /// List migrations and whether each is applied
    Status,
}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use notekeep::backend::server::{config, migrations};
    use notekeep::shared::AppConfig;

    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let app_config = AppConfig::load()?;
    let url = app_config
        .database
        .url
        .as_deref()
        .ok_or("no database configured: set DATABASE_URL or DB_HOST/DB_NAME")?;
    let pool = config::connect(&app_config.database, url).await?;

    match cli.command {
        Command::Up => {
            migrations::run(&pool).await?;
            tracing::info!("Migrations applied");
        }
        Command::Down { steps } => {
            let reverted = migrations::revert(&pool, steps).await?;
            if reverted.is_empty() {
                println!("Nothing to revert");
            }
            for version in reverted {
                println!("reverted {}", version);
            }
        }
        Command::Status => {
            for migration in migrations::status(&pool).await? {
                let marker = if migration.applied { "applied" } else { "pending" };
                println!("{:>16}  {:<8} {}", migration.version, marker, migration.description);
            }
        }
    }

    pool.close().await;
    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("notekeep-migrate requires the 'ssr' feature to be enabled.");
    std::process::exit(1);
}
