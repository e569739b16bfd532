// crates/console-gate-server/src/main.rs
// ============================================================================
// Module: Gateway Entry Point
// Description: Binary bootstrap for the dashboard gateway.
// Purpose: Load configuration, build state, and serve until shutdown.
// Dependencies: console-gate-server, axum, tokio
// ============================================================================

//! ## Overview
//! The binary loads a TOML configuration (path from `CONSOLE_GATE_CONFIG`,
//! defaulting to `console-gate.toml`), builds the gateway state with no-op
//! telemetry sinks, and serves the route table until interrupted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::sync::Arc;

use console_gate_server::GatewayConfig;
use console_gate_server::GatewayState;
use console_gate_server::gateway_router;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Environment variable naming the configuration file.
const CONFIG_ENV: &str = "CONSOLE_GATE_CONFIG";

/// Configuration path used when the environment does not name one.
const DEFAULT_CONFIG_PATH: &str = "console-gate.toml";

/// Loads configuration, binds the listener, and serves requests.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = GatewayConfig::load(Path::new(&path))?;
    let state = Arc::new(GatewayState::from_config(&config)?);
    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    let router = gateway_router(state);
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

/// Resolves when the process receives an interrupt.
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
