//! Utility to render a report from JSON files on disk
//!
//! Usage: render_report <disease> <form.json> <result.json> [output_dir]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use healthai::config::Config;
use healthai::models::PatientInfo;
use healthai::report::{HttpProfileSource, ReportGenerator, ReportRequest};
use tracing_subscriber::EnvFilter;

fn read_json(path: &Path) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Could not read {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&text).map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("healthai=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: render_report <disease> <form.json> <result.json> [output_dir]");
        std::process::exit(2);
    }

    let config = Config::from_env();
    let output_dir = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.report_dir.clone());

    let form = read_json(Path::new(&args[1]))?;
    let result = read_json(Path::new(&args[2]))?;
    let request = ReportRequest::from_json(&args[0], form, result, PatientInfo::default())?;

    let profiles = HttpProfileSource::new(
        &config.api_base_url,
        config.session_cookie.clone(),
        config.profile_timeout,
    )?;
    let generator = ReportGenerator::new(Arc::new(profiles), output_dir)
        .with_logo(config.logo_path.clone());

    let report = generator.generate(&request).await?;

    println!("Report generated:");
    println!("  ID: {}", report.report_id);
    println!("  Assessment: {} ({}%)", report.risk_category, report.confidence_label);
    println!("  Patient: {} (profile {})", report.patient_name, report.profile_status);
    println!("  File: {}", report.file_path);
    if report.meal_lines_dropped > 0 {
        println!("  Meal plan lines dropped: {}", report.meal_lines_dropped);
    }

    Ok(())
}
