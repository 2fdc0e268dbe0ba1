use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use axum::Server;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use devops_todo::{
    cli::{CliArgs, Commands, HealthcheckArgs},
    create_router, db, probe, AppState, Config, TodoStore, VERSION,
};

// Entry point of the application
#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(args.log_level.as_deref());

    let exit_code = match &args.command {
        Commands::Serve => match serve().await {
            Ok(()) => 0,
            Err(err) => {
                error!("{:#}", err);
                1
            }
        },
        Commands::Healthcheck(hc_args) => healthcheck(hc_args).await,
    };

    std::process::exit(exit_code);
}

async fn serve() -> anyhow::Result<()> {
    let config = Config::from_env().context("invalid configuration")?;
    info!("devops-todo v{} starting", VERSION);

    db::prepare_data_dir(&config.data_dir).await?;
    let store = TodoStore::connect(&config.database_url)
        .await
        .context("failed to connect to the database")?;

    let app_state = Arc::new(AppState {
        store: store.clone(),
    });
    let app = create_router(app_state, config.cors_origin.clone());

    let addr = config.bind_addr();
    let server = Server::try_bind(&addr)
        .with_context(|| format!("failed to bind {}", addr))?
        .serve(app.into_make_service());
    info!("Server listening on {}", addr);

    server.with_graceful_shutdown(shutdown_signal()).await?;

    store.close().await;
    info!("Server stopped");
    Ok(())
}

async fn healthcheck(args: &HealthcheckArgs) -> i32 {
    let url = match &args.url {
        Some(url) => url.clone(),
        None => match Config::from_env() {
            Ok(config) => config.health_url,
            Err(err) => {
                error!("{}", err);
                return 1;
            }
        },
    };

    match probe::probe(&url, Duration::from_secs(args.timeout)).await {
        Ok(report) => {
            info!(
                version = report.version.as_deref().unwrap_or("unknown"),
                "{} is {}",
                url,
                report.status
            );
            0
        }
        Err(err) => {
            error!("health check failed: {}", err);
            1
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

fn init_logging(log_level: Option<&str>) {
    let mut filter = EnvFilter::from_default_env();

    if log_level.is_some() || env::var("RUST_LOG").is_err() {
        let level = log_level.map(parse_level).unwrap_or(Level::INFO);
        for directive in [
            format!("devops_todo={}", level),
            format!("tower_http={}", level),
            "sqlx=warn".to_string(),
            "hyper=warn".to_string(),
            "reqwest=warn".to_string(),
        ] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}
