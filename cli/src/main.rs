//! CLI entrypoint for LLM Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::{
    ConversationIndex, ConversationRepository, ConversationService, CouncilConfig,
    GenerateTitleUseCase, InferenceGateway, RunCouncilUseCase, SendMessageUseCase,
};
use council_domain::{Model, Question, Severity};
use council_infrastructure::{
    ConfigLoader, FileConfig, FileConversationIndex, FileConversationRepository,
    InMemoryConversationStore, OpenRouterGateway, StorageBackend,
};
use council_presentation::{
    AppState, Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, create_router,
};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref());

    info!("Starting LLM Council");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    check_config(&config)?;

    match cli.command {
        Command::Serve { bind, ephemeral } => serve(config, bind, ephemeral).await,
        Command::Ask {
            question,
            model,
            chairman,
            output,
            quiet,
        } => ask(config, question, model, chairman, output, quiet).await,
        Command::ShowConfig => show_config(&config, cli.config.as_deref()),
    }
}

/// Console logging filtered by `-v` (or `RUST_LOG`), plus an optional
/// daily-rotated log file.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "llm-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}

/// Print warnings and refuse to start on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    let mut errors = 0;
    for issue in &issues {
        match issue.severity {
            Severity::Warning => eprintln!("Warning: {}", issue.message),
            Severity::Error => {
                eprintln!("Error: {}", issue.message);
                errors += 1;
            }
        }
    }
    if errors > 0 {
        bail!("Invalid configuration ({} error(s))", errors);
    }
    Ok(())
}

fn build_gateway(config: &FileConfig) -> Arc<dyn InferenceGateway> {
    let api_key = config.gateway.api_key();
    if api_key.is_none() {
        warn!(
            "{} is not set; every model request will fail",
            config.gateway.api_key_env
        );
    }
    Arc::new(OpenRouterGateway::new(
        config.gateway.endpoint.clone(),
        api_key,
        config.gateway.api_key_env.clone(),
    ))
}

fn build_conversations(config: &FileConfig, ephemeral: bool) -> ConversationService {
    let (backend, _) = config.storage.parse_backend();
    let (records, index): (Arc<dyn ConversationRepository>, Arc<dyn ConversationIndex>) =
        if ephemeral || backend == StorageBackend::Memory {
            info!("Conversations are kept in memory only");
            let store = Arc::new(InMemoryConversationStore::new());
            (store.clone(), store)
        } else {
            let dir = &config.storage.data_dir;
            info!("Storing conversations in {}", dir.display());
            (
                Arc::new(FileConversationRepository::new(dir)),
                Arc::new(FileConversationIndex::new(dir)),
            )
        };
    ConversationService::new(records, index)
}

async fn serve(config: FileConfig, bind: Option<String>, ephemeral: bool) -> Result<()> {
    // === Dependency Injection ===
    let gateway = build_gateway(&config);
    let council_config = config.to_council_config();

    let conversations = Arc::new(build_conversations(&config, ephemeral));
    let titles = Arc::new(GenerateTitleUseCase::new(
        gateway.clone(),
        council_config.title_model.clone(),
        council_config.title_timeout,
    ));
    let council = Arc::new(RunCouncilUseCase::new(gateway, council_config));
    let messages = Arc::new(SendMessageUseCase::new(
        council,
        titles,
        conversations.clone(),
    ));

    let app = create_router(
        AppState::new(conversations, messages),
        &config.server.allowed_origins,
    );

    let addr = bind.unwrap_or_else(|| config.server.bind.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);
    println!("LLM Council API listening on http://{}", addr);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
            signal.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn ask(
    config: FileConfig,
    question: String,
    models: Vec<String>,
    chairman: Option<String>,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let Some(question) = Question::try_new(question) else {
        bail!("Question must not be empty");
    };

    let mut council_config: CouncilConfig = config.to_council_config();
    if !models.is_empty() {
        let panel = models.iter().map(|m| Model::from(m.as_str())).collect();
        council_config = council_config.with_panel(panel);
    }
    if let Some(chairman) = chairman {
        council_config = council_config.with_chairman(Model::from(chairman.as_str()));
    }
    if let Some(issue) = council_config.validate().into_iter().find(|i| i.is_error()) {
        bail!("{}", issue.message);
    }

    if !quiet && output != OutputFormat::Json {
        println!();
        println!("Question: {}", question);
        println!(
            "Panel: {}",
            council_config
                .panel
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Chairman: {}", council_config.chairman);
        println!();
    }

    let use_case = RunCouncilUseCase::new(build_gateway(&config), council_config);

    let outcome = if quiet {
        use_case.execute(&question).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(&question, &progress).await
    };

    let text = match output {
        OutputFormat::Full => ConsoleFormatter::format(&question, &outcome),
        OutputFormat::Synthesis => ConsoleFormatter::format_synthesis_only(&question, &outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };
    println!("{}", text);

    Ok(())
}

fn show_config(config: &FileConfig, config_path: Option<&Path>) -> Result<()> {
    for line in ConfigLoader::describe_sources(config_path) {
        println!("{}", line);
    }
    println!();
    println!("Effective configuration:");
    println!();
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    println!("{}", rendered);
    Ok(())
}
