//! Medical report pipeline
//!
//! Profile lookup, risk classification, layout and PDF rendering for the
//! single-page disease reports.

pub mod classifier;
pub mod generator;
pub mod identifier;
pub mod layout;
pub mod logo;
pub mod metrics;
pub mod patient;
pub mod render;

use thiserror::Error;

pub use classifier::{classify, RiskAssessment};
pub use generator::{report_file_name, GeneratedReport, PreparedReport, ReportGenerator, ReportRequest};
pub use identifier::new_report_id;
pub use logo::{load_logo, LogoAsset};
pub use patient::{HttpProfileSource, NoProfile, PatientIdentity, ProfileLookup, ProfileSource};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Disease '{0}' is not configured for reports")]
    UnknownDisease(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
