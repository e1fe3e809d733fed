use clap::{Parser, Subcommand};
use tracing::info;

use vendorhub_intake::config::Config;
use vendorhub_intake::db::{self, AppState, DbPool};
use vendorhub_intake::handlers;
use vendorhub_intake::upstream::MarketClient;
use vendorhub_intake::util::{generate_api_key, hash_api_key};

#[derive(Parser)]
#[command(
    name = "vendorhub-intake",
    about = "Inventory intake gateway for the VendorHub marketplace"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (the default when no subcommand is given)
    Serve,
    /// Create the local database schema and exit
    InitDb,
    /// Provision a vendor and print its API key
    CreateVendor {
        #[arg(long)]
        name: String,
    },
}

fn build_pool(path: &str) -> anyhow::Result<DbPool> {
    let manager = r2d2_sqlite::SqliteConnectionManager::file(path);
    Ok(r2d2::Pool::builder().build(manager)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vendorhub_intake=debug,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::InitDb => {
            let pool = build_pool(&config.database_path)?;
            db::init_db(&*pool.get()?)?;
            info!(path = %config.database_path, "database initialized");
        }
        Command::CreateVendor { name } => {
            let pool = build_pool(&config.database_path)?;
            let conn = pool.get()?;
            db::init_db(&conn)?;

            let (key, prefix) = generate_api_key();
            let vendor = db::queries::create_vendor(&conn, &name, &hash_api_key(&key), &prefix)?;

            println!("vendor id: {}", vendor.id);
            println!("api key:   {}  (shown once, store it now)", key);
        }
        Command::Serve => {
            let pool = build_pool(&config.database_path)?;
            db::init_db(&*pool.get()?)?;

            let market = MarketClient::new(&config.market_api_url, &config.market_api_token);
            let state = AppState { db: pool, market };
            let app = handlers::router(state);

            let listener = tokio::net::TcpListener::bind(config.addr()).await?;
            info!(
                addr = %config.addr(),
                upstream = %config.market_api_url,
                dev = config.dev_mode,
                "vendorhub-intake listening"
            );
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
