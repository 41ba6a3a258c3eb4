use clap::Parser;

use import_redirector::config::Args;
use import_redirector::observability::init_logging;
use import_redirector::{HttpServer, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("import-redirector: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.log_level, config.log_format);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        import_root = %config.mapping.import_root(),
        repo_root = %config.mapping.repo_root(),
        wildcard_depth = config.mapping.wildcard_depth(),
        vcs = %config.vcs,
        address = %config.listen_addr,
        tls = config.tls.is_some(),
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.serve(shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
