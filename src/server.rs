//! Logging setup and endpoint startup.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use tracebus_api::{ApiServer, AppState};
use tracebus_config::{Config, ConfigValidator, LoggingConfig};
use tracebus_core::default_tracer;
use tracebus_protocols::resource_type;

use crate::self_trace::{SelfTraceHandler, SELF_NAME};

/// Initialize tracing with console output and, if configured, a daily
/// rolling log file.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let console = fmt::layer()
        .with_target(true)
        .with_ansi(logging.ansi);

    let file = match &logging.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("tracebus")
                .filename_suffix("log")
                .max_log_files(logging.max_log_files)
                .build(dir)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // The guard flushes on drop; keep it for the life of the process.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file)
        .init();

    Ok(())
}

/// Console-only logging for client subcommands; stderr so output stays pipeable.
pub(crate) fn init_client_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the endpoint in foreground until Ctrl-C.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    for warning in ConfigValidator::validate_for_serve(&config).into_result()? {
        warn!("{}: {}", warning.path, warning.message);
    }

    info!("Starting tracebus v{}", env!("CARGO_PKG_VERSION"));

    let tracer = default_tracer();
    tracer.register(
        resource_type::DAEMON,
        SELF_NAME,
        Arc::new(SelfTraceHandler::new(config.clone(), &tracer)),
    )?;

    let state = Arc::new(AppState::new(tracer.clone()));
    let server = ApiServer::new(config.server.clone(), state.clone());

    let signal_state = state.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            signal_state.request_shutdown();
        }
    });

    let result = server.run().await;
    tracer.unregister(resource_type::DAEMON, SELF_NAME);
    result?;

    Ok(())
}
