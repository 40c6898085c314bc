use anyhow::Context;
use character_migration::app::{bootstrap, server};
use character_migration::core::ConfigProvider;
use character_migration::utils::error::{ErrorCategory, MigrationError};
use character_migration::utils::{logger, validation::Validate};
use character_migration::{CliConfig, Command, TomlConfig};
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting character-migration");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let command = cli.command();
    let exit_code = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path.display()))?;
            run(config, command).await
        }
        None => run(cli.clone(), command).await,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn run<C: ConfigProvider + Validate>(config: C, command: Command) -> i32 {
    // 驗證配置
    if let Err(e) = config.validate() {
        report_error(&e);
        return exit_code(&e);
    }

    let engine = match bootstrap::build_engine(&config) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            report_error(&e);
            return exit_code(&e);
        }
    };

    let shutdown = CancellationToken::new();
    spawn_signal_handler(shutdown.clone());

    match command {
        Command::Serve => match server::serve(config.bind_addr(), engine, shutdown).await {
            Ok(()) => {
                tracing::info!("Server stopped");
                0
            }
            Err(e) => {
                report_error(&e);
                exit_code(&e)
            }
        },
        Command::Migrate { kind } => match engine.migrate(kind, &shutdown).await {
            Ok(result) if result.is_success() => {
                println!("✅ {} {} records published", result.published_count, kind);
                0
            }
            Ok(result) => {
                for failure in &result.failures {
                    eprintln!("❌ {}", failure);
                }
                eprintln!(
                    "⚠️  {} of {} {} records not published",
                    result.failures.len(),
                    result.attempted(),
                    kind
                );
                2
            }
            Err(e) => {
                report_error(&e);
                exit_code(&e)
            }
        },
    }
}

fn spawn_signal_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.cancel();
        }
    });
}

fn report_error(e: &MigrationError) {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);
}

fn exit_code(e: &MigrationError) -> i32 {
    match e.category() {
        ErrorCategory::Fetch => 1,
        ErrorCategory::Publish => 2,
        ErrorCategory::Config => 3,
        ErrorCategory::Runtime => 4,
        ErrorCategory::Cancelled => 130,
    }
}
