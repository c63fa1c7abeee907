//! HealthAI Report Service Library
//!
//! Disease risk report generation: patient resolution, risk classification,
//! single-page PDF layout, and the report history.

pub mod build_info;
pub mod config;
pub mod content;
pub mod db;
pub mod mcp;
pub mod models;
pub mod report;
pub mod tools;
