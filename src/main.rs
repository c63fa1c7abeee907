//! HealthAI Report Service
//!
//! An MCP server for AI-assisted disease risk reports.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use healthai::build_info;
use healthai::config::Config;
use healthai::db::Database;
use healthai::mcp::HealthAiService;
use healthai::report::{HttpProfileSource, ReportGenerator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("healthai=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("Database path: {}", config.database_path.display());
    eprintln!("Report directory: {}", config.report_dir.display());
    eprintln!("Profile endpoint base: {}", config.api_base_url);

    eprintln!("Initializing database...");
    let database = Database::open(&config.database_path)?;

    let profiles = HttpProfileSource::new(
        &config.api_base_url,
        config.session_cookie.clone(),
        config.profile_timeout,
    )?;
    let generator = ReportGenerator::new(Arc::new(profiles), config.report_dir.clone())
        .with_logo(config.logo_path.clone());

    let service = HealthAiService::new(&config, database, generator);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
