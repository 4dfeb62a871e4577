//! Insight API server binary
//!
//! HTTP REST API for estimate vs actual spending analysis.

use clap::Parser;
use estimate_insight::api::{run_api_server, server::ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "insight-server")]
#[command(version)]
#[command(about = "Insight API Server - HTTP REST API for estimate vs actual analysis")]
#[command(long_about = r#"
Insight API Server

Provides RESTful endpoints over the analysis pipeline:
  - POST /api/v1/analyze - Analyze estimate vs actual workbooks

Additional endpoints:
  - GET  /health         - Health check
  - GET  /version        - Server version info
  - GET  /              - API documentation

Features:
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM
  - JSON response format with request IDs
  - Tracing and structured logging

Example usage:
  insight-server                           # Start on localhost:8080
  insight-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/analyze \
    -H "Content-Type: application/json" \
    -d '{"estimate_path": "estimate.xlsx", "actual_path": "actual.xlsx"}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "INSIGHT_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "INSIGHT_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config).await
}
