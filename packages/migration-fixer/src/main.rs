//! Migration directory fixer CLI

use anyhow::Result;
use clap::Parser;
use migration_fixer::config::DEFAULT_CONFIG_PATH;
use migration_fixer::{fix, AppContext, FixError, FixerConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "migration-fixer")]
#[command(about = "Rename a misnamed migration directory to its canonical name")]
#[command(version)]
struct Cli {
    /// Run in quiet mode (no status lines)
    #[arg(short, long)]
    quiet: bool,

    /// Config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Migrations root (overrides config)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Canonical target directory name (overrides config)
    #[arg(long)]
    target: Option<String>,

    /// Ask before removing a directory whose target already exists
    #[arg(long)]
    confirm: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.quiet, cli.confirm);

    if let Err(e) = run(&ctx, cli) {
        match e.downcast_ref::<FixError>() {
            Some(FixError::RootNotFound { path }) => {
                ctx.print_error(&format!("Migrations directory not found: {}", path.display()));
            }
            _ => eprintln!("Error: {:#}", e),
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run(ctx: &AppContext, cli: Cli) -> Result<()> {
    let config = FixerConfig::load(&cli.config)?.with_overrides(cli.root, cli.target);
    config.validate()?;

    tracing::debug!(
        root = %config.root.display(),
        target = %config.target_name,
        "scanning migrations root"
    );

    fix(ctx, &config)?;
    Ok(())
}
