use clap::{Parser, Subcommand};

use crate::probe::DEFAULT_TIMEOUT_SECS;

/// Containerized todo web service
#[derive(Parser, Debug)]
#[command(name = "devops-todo", version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Run the web server")]
    Serve,

    #[command(
        about = "Probe a running instance's health endpoint",
        long_about = "Sends one GET to the health endpoint and exits 0 when the \
                      service reports healthy, 1 otherwise.\n\n\
                      Examples:\n  \
                      devops-todo healthcheck\n  \
                      devops-todo healthcheck --url http://localhost:5000/health --timeout 3"
    )]
    Healthcheck(HealthcheckArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct HealthcheckArgs {
    #[arg(
        long,
        value_name = "URL",
        help = "Health endpoint (defaults to TODO_HEALTH_URL or http://localhost:<TODO_PORT>/health)"
    )]
    pub url: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "Request timeout in seconds"
    )]
    pub timeout: u64,
}
