//! CLI entrypoint for llm-fanout
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use fanout_application::{
    CompareLatestUseCase, ConnectorRegistry, ConversationLogger, NoConversationLogger,
    ResultCache, RunFanOutUseCase,
};
use fanout_domain::PromptRequest;
use fanout_infrastructure::{
    ConfigLoader, FileConfig, InMemoryResultCache, JsonlConversationLogger, Severity,
    build_connectors,
};
use fanout_presentation::{AppState, Cli, Command, ConsoleFormatter, OutputFormat, serve};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        let config = load_config(&cli)?;
        println!("\nEffective configuration:\n");
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let config = load_config(&cli)?;
    let _log_guard = init_logging(cli.verbose, config.logging.dir.as_deref());

    info!("Starting llm-fanout");
    check_config(&config)?;
    let params = config.engine_params();

    // === Dependency Injection ===
    let registry = Arc::new(ConnectorRegistry::from_connectors(build_connectors(
        &config.connectors,
        config.dispatch.timeout(),
    ))?);
    if registry.is_empty() {
        warn!("No connectors are available; every fan-out will return no responses");
    }

    let cache: Arc<dyn ResultCache> = Arc::new(InMemoryResultCache::new(params.cache_ttl));
    let conversation_logger: Arc<dyn ConversationLogger> = config
        .logging
        .conversation_log
        .as_ref()
        .and_then(JsonlConversationLogger::open)
        .map(|logger| Arc::new(logger) as Arc<dyn ConversationLogger>)
        .unwrap_or_else(|| Arc::new(NoConversationLogger));

    let fan_out = Arc::new(
        RunFanOutUseCase::new(registry.clone(), cache.clone())
            .with_conversation_logger(conversation_logger.clone())
            .with_call_deadline(params.call_deadline),
    );
    let compare = Arc::new(
        CompareLatestUseCase::new(registry.clone(), cache.clone(), &params.comparison_service)
            .with_conversation_logger(conversation_logger)
            .with_call_deadline(params.call_deadline),
    );

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C received, shutting down");
                shutdown.cancel();
            }
        }
    });

    match cli.command() {
        Command::Serve => {
            let state = AppState {
                fan_out,
                compare,
                cache,
                registry,
                shutdown,
            };
            serve(&config.server.bind_address(), state)
                .await
                .with_context(|| format!("HTTP server on {} failed", config.server.bind_address()))?;
        }
        Command::Ask {
            prompt,
            compare: with_comparison,
            instructions,
            output,
        } => {
            let mut request = PromptRequest::new(prompt)?;
            if let Some(instructions) = instructions {
                request = request.with_instructions(instructions);
            }

            let aggregation = fan_out.execute(request, &shutdown).await;
            let comparison = if with_comparison {
                Some(compare.execute(&shutdown).await)
            } else {
                None
            };

            match output {
                OutputFormat::Full => {
                    println!("{}", ConsoleFormatter::format(&aggregation));
                    match comparison {
                        Some(Ok(response)) => {
                            println!("{}", ConsoleFormatter::format_comparison(&response))
                        }
                        Some(Err(e)) => eprintln!("Comparison failed: {}", e),
                        None => {}
                    }
                }
                OutputFormat::Json => {
                    let comparison = match comparison {
                        Some(Ok(response)) => serde_json::to_value(response)?,
                        Some(Err(e)) => serde_json::json!({ "error": e.to_string() }),
                        None => serde_json::Value::Null,
                    };
                    println!(
                        "{}",
                        ConsoleFormatter::format_json(&serde_json::json!({
                            "aggregation": aggregation,
                            "comparison": comparison,
                        }))
                    );
                }
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let loaded = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    };
    let mut config = loaded.map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    Ok(config)
}

/// Log every config issue; errors abort startup
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => error!("Config error: {}", issue),
            Severity::Warning => warn!("Config warning: {}", issue),
        }
    }

    let errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    if errors > 0 {
        bail!("Configuration has {} error(s)", errors);
    }
    Ok(())
}

/// Console logging by verbosity (`RUST_LOG` wins when set), plus a daily
/// log file when `[logging] dir` is configured.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "llm-fanout.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}
