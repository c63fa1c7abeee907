//! HealthAI Status Tool
//!
//! Provides runtime status information about the report service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::Config;
use crate::db::Database;
use crate::models::ReportRecord;

/// Report generation instructions for AI assistants
pub const REPORT_INSTRUCTIONS: &str = r#"
# HealthAI Report Instructions

This guide explains how to turn a disease prediction into a PDF report.

## Overview

A report needs three things:
1. **Disease** - one of `diabetes`, `heart`, `liver`, `kidney`, `bone`
2. **Form data** - the raw inputs the prediction form submitted, as a JSON object
3. **Prediction result** - the payload the prediction endpoint returned

Call `list_diseases` to see each disease's title, the form keys printed as
clinical parameters, and the categories a prediction maps to.

---

## Prediction Result

Only three fields are read:

| Field | Meaning |
|-------|---------|
| `prediction` | `1` means the positive/elevated outcome, anything else is negative |
| `probability` | 0..1, shown as the confidence percentage |
| `confidence` | 0..1, used when `probability` is absent |

Only the number `1` is positive. Labels such as `"Fracture"`, the string
`"1"` and `true` are all negative, so pass the endpoint's numeric code.
All other fields are kept but ignored.

| Disease | prediction = 1 | otherwise |
|---------|----------------|-----------|
| diabetes, heart, kidney | high | low |
| liver | disease | normal |
| bone | fracture | normal |

Confidence is presentational only. It never changes the category.

---

## Form Data Conventions

Forms are passed through exactly as submitted. Do not normalize them.

- Heart, kidney, bone: `gender` is `"1"` for female, anything else is male
- Liver: `Gender` is `"0"` for female, anything else is male
- Diabetes: `gender` is the label `"Male"` or `"Female"`
- Heart `cholesterol` and `gluc` are level codes 1-3 and print as
  Normal / Above Normal / Well Above Normal

Keys that are missing or null are left off the report.

---

## Workflow

1. (Optional) `assess_prediction` to preview the category and text
2. `generate_medical_report` with `disease`, `form_data`, `result`, and
   optional `patient_name`, `patient_age`, `patient_gender`
3. The response carries `file_path` and `report_id`
4. `list_reports` / `get_report` find earlier reports again

Patient identity comes from the backend profile when reachable. Values passed
to `generate_medical_report` override the profile. Age and gender found in the
form override both. Anything still unknown prints as "Not Provided".

---

## Limits

- Factors are capped at 3 bullets and recommendations at 4
- The report is a single page. A long meal plan is cut at the bottom of the
  page; `meal_lines_dropped` in the response says how many lines were lost
- Reports are AI-assisted screening output, not a diagnosis
"#;

#[derive(Debug, Clone, Serialize)]
pub struct HealthAiStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub reports_recorded: Option<i64>,

    /// Report output
    pub report_dir: String,
    pub api_base_url: String,
    pub logo_path: Option<String>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    report_dir: PathBuf,
    api_base_url: String,
    logo_path: Option<PathBuf>,
}

impl StatusTracker {
    pub fn new(config: &Config) -> Self {
        Self {
            start_time: Instant::now(),
            database_path: config.database_path.clone(),
            report_dir: config.report_dir.clone(),
            api_base_url: config.api_base_url.clone(),
            logo_path: config.logo_path.clone(),
        }
    }

    /// Get the current status
    pub fn get_status(&self, database: &Database) -> HealthAiStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());
        let reports_recorded = database.with_conn(|conn| ReportRecord::count(conn)).ok();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        HealthAiStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            reports_recorded,
            report_dir: self.report_dir.display().to_string(),
            api_base_url: self.api_base_url.clone(),
            logo_path: self.logo_path.as_ref().map(|p| p.display().to_string()),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
