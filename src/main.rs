//! browserclaw-mcp binary entry point.

use std::sync::Arc;

use browserclaw_mcp::bridge::BridgeClient;
use browserclaw_mcp::cli::{Cli, Commands};
use browserclaw_mcp::config::AdapterConfig;
use browserclaw_mcp::mcp::{BridgeAdapter, BridgeServer};
use browserclaw_mcp::util::cache::ToolCache;
use rmcp::ServiceExt;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    let config = match AdapterConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    browserclaw_mcp::observability::init_tracing(&config.log_level);
    tracing::debug!(?config, "Loaded configuration");

    let adapter = Arc::new(BridgeAdapter::new(
        BridgeClient::from_config(&config),
        ToolCache::new(config.tool_cache_ttl()),
    ));

    let result = match cli.command() {
        Commands::Serve => serve(Arc::clone(&adapter), &config).await,
        Commands::Health => print_health(&adapter).await,
        Commands::Tools => print_tools(&adapter).await,
    };

    adapter.close();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn serve(
    adapter: Arc<BridgeAdapter>,
    config: &AdapterConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(bridge = %config.base_url(), "BrowserClaw MCP server starting");

    // Probe in the background so a slow bridge does not delay the handshake.
    let probe = Arc::clone(&adapter);
    tokio::spawn(async move {
        match probe.health().await {
            Ok(_) => tracing::info!("Bridge is reachable"),
            Err(e) => tracing::warn!(error = %e, "Bridge health check failed; tools may be unavailable"),
        }
    });

    let service = BridgeServer::new(adapter)
        .serve(rmcp::transport::stdio())
        .await?;
    let reason = service.waiting().await?;
    tracing::info!(?reason, "MCP session ended");
    Ok(())
}

async fn print_health(adapter: &BridgeAdapter) -> Result<(), Box<dyn std::error::Error>> {
    let health = adapter.health().await?;
    println!("{}", serde_json::to_string_pretty(&health)?);
    Ok(())
}

async fn print_tools(adapter: &BridgeAdapter) -> Result<(), Box<dyn std::error::Error>> {
    let tools = adapter.list_tools().await;
    println!("{}", serde_json::to_string_pretty(&tools)?);
    Ok(())
}
