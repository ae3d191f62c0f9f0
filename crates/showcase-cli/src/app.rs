//! Command dispatch for the showcase binary.

use std::sync::Arc;

use showcase_cms::{CatalogSource, PocketBaseSource};
use showcase_core::{Category, Result};
use showcase_web::AppState;
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command};
use crate::config::ShowcaseConfig;
use crate::{config_handlers, migration_handlers};

/// Initialise tracing-based logging.
///
/// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
pub fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Ignore error if a subscriber is already set (e.g. in tests).
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Run the CLI with the given arguments.
pub async fn run(args: CliArgs) -> Result<()> {
    init_logging(args.verbose, args.quiet);
    let config_path = args.config.as_deref();

    match args.command {
        Some(Command::Serve { port }) => {
            let config = load_validated(config_path)?;
            let addr = config.server.socket_addr(port)?;
            let source = PocketBaseSource::new(&config.cms)?;
            tracing::info!(cms = %source.records_url(), "Using PocketBase catalog");
            let state = AppState::new(Arc::new(source), config.site);
            showcase_web::serve(addr, state).await
        }
        Some(Command::Categories { json }) => {
            let config = load_validated(config_path)?;
            let source = PocketBaseSource::new(&config.cms)?;
            let categories = source.fetch_categories().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                print!("{}", summarize(&categories));
            }
            Ok(())
        }
        Some(Command::Migrations(cmd)) => {
            migration_handlers::handle_migrations_command(cmd.command)
        }
        Some(Command::Config(cmd)) => {
            config_handlers::handle_config_command(config_path, cmd.command)
        }
        Some(Command::Version) => {
            println!("showcase {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("showcase {}: use --help for usage", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_validated(config_path: Option<&str>) -> Result<ShowcaseConfig> {
    let config = ShowcaseConfig::load(config_path)?;
    config.validate()?;
    Ok(config)
}

/// One line per category, followed by its products indented.
pub fn summarize(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories available\n".to_string();
    }
    let mut out = String::new();
    for (index, category) in categories.iter().enumerate() {
        out.push_str(&format!(
            "{index}. {} ({} products)\n",
            category.name,
            category.products.len()
        ));
        for product in &category.products {
            let icon = if product.has_icon() { " [icon]" } else { "" };
            out.push_str(&format!("   - {}{icon}\n", product.name));
        }
    }
    out
}
