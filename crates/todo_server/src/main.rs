use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use web_service::config::{load_server_settings, ServerSettings};

/// Session-backed to-do list server.
#[derive(Debug, Parser)]
#[command(name = "todo_server", version)]
struct Args {
    /// Address to bind
    #[arg(long, env = "TODO_BIND_ADDR")]
    bind_addr: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "TODO_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    let args = Args::parse();
    let defaults = load_server_settings();
    let settings = ServerSettings {
        bind_addr: args.bind_addr.unwrap_or_else(|| defaults.bind_addr.clone()),
        port: args.port.unwrap_or(defaults.port),
        ..defaults
    };

    tracing::info!("Starting standalone to-do service...");

    if let Err(e) = web_service::server::run(settings).await {
        tracing::error!("Failed to run web service: {}", e);
        std::process::exit(1);
    }
}
