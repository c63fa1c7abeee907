//! HealthAI MCP Server Implementation
//!
//! Implements the MCP server with the report tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::db::Database;
use crate::models::{display_value, PatientInfo};
use crate::report::ReportGenerator;
use crate::tools::reports;
use crate::tools::status::StatusTracker;

/// HealthAI MCP Service
#[derive(Clone)]
pub struct HealthAiService {
    status_tracker: Arc<StatusTracker>,
    database: Database,
    generator: Arc<ReportGenerator>,
    tool_router: ToolRouter<HealthAiService>,
}

impl HealthAiService {
    pub fn new(config: &Config, database: Database, generator: ReportGenerator) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(config)),
            database,
            generator: Arc::new(generator),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AssessPredictionParams {
    /// diabetes, heart, liver, kidney or bone
    pub disease: String,
    /// Prediction payload: prediction, probability and/or confidence
    pub result: Value,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateMedicalReportParams {
    /// diabetes, heart, liver, kidney or bone
    pub disease: String,
    /// Raw form inputs exactly as submitted
    #[serde(default)]
    pub form_data: Value,
    /// Prediction payload: prediction, probability and/or confidence
    pub result: Value,
    pub patient_name: Option<String>,
    pub patient_age: Option<Value>,
    pub patient_gender: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListReportsParams {
    pub disease: Option<String>,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
}

fn default_list_limit() -> i64 { 20 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetReportParams {
    /// Report identifier, e.g. RPT-LQU5M2O0
    pub report_id: String,
}

#[derive(Debug, Serialize)]
struct NotFoundResponse<'a> {
    error: &'static str,
    report_id: &'a str,
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl HealthAiService {
    // --- Status ---

    #[tool(description = "Get the current status of the HealthAI report service including build info, database status, report directory, and process information")]
    async fn report_status(&self) -> Result<CallToolResult, McpError> {
        let status = self.status_tracker.get_status(&self.database);
        to_json(&status)
    }

    #[tool(description = "Get step-by-step instructions for generating medical reports. Call this before generating a report or when unsure how form data and prediction results should be passed.")]
    fn report_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::REPORT_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(REPORT_INSTRUCTIONS)]))
    }

    // --- Reports ---

    #[tool(description = "List the diseases reports can be generated for, with their clinical parameters and risk categories")]
    fn list_diseases(&self) -> Result<CallToolResult, McpError> {
        to_json(&reports::list_diseases())
    }

    #[tool(description = "Classify a prediction result and preview the risk category, factors, recommendations and meal plan a report would contain. Does not write a file.")]
    fn assess_prediction(&self, Parameters(p): Parameters<AssessPredictionParams>) -> Result<CallToolResult, McpError> {
        let result = reports::assess_prediction(&p.disease, p.result)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Generate a one-page PDF medical report from a disease prediction and record it in the report history. Patient name/age/gender override the backend profile.")]
    async fn generate_medical_report(&self, Parameters(p): Parameters<GenerateMedicalReportParams>) -> Result<CallToolResult, McpError> {
        let patient = PatientInfo {
            name: p.patient_name,
            age: p.patient_age.filter(|a| !a.is_null()).map(|a| display_value(&a)),
            gender: p.patient_gender,
        };
        let result = reports::generate_report(
            &self.database,
            &self.generator,
            &p.disease,
            p.form_data,
            p.result,
            patient,
        )
        .await
        .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "List previously generated reports, newest first, optionally filtered by disease")]
    fn list_reports(&self, Parameters(p): Parameters<ListReportsParams>) -> Result<CallToolResult, McpError> {
        let result = reports::list_reports(&self.database, p.disease.as_deref(), p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a previously generated report by its report ID")]
    fn get_report(&self, Parameters(p): Parameters<GetReportParams>) -> Result<CallToolResult, McpError> {
        let result = reports::get_report(&self.database, &p.report_id)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(record) => to_json(&record),
            None => to_json(&NotFoundResponse {
                error: "Report not found",
                report_id: &p.report_id,
            }),
        }
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for HealthAiService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "healthai".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("HealthAI Report Service".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "HealthAI Report Service - AI-assisted disease risk reports as single-page PDFs. \
                 IMPORTANT: Call report_instructions before generating reports. \
                 Catalogue: list_diseases. \
                 Preview: assess_prediction. \
                 Reports: generate_medical_report, list_reports, get_report. \
                 Status: report_status."
                    .into(),
            ),
        }
    }
}
