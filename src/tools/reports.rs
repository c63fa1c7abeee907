//! Report MCP Tools
//!
//! Disease catalogue, risk assessment preview, PDF report generation and the
//! report history.

use serde::Serialize;
use serde_json::Value;

use crate::content::{config_for, meal_plan};
use crate::db::Database;
use crate::models::{Disease, PatientInfo, PredictionResult, ReportRecord, ReportRecordCreate, NOT_PROVIDED};
use crate::report::{classify, GeneratedReport, ReportGenerator, ReportRequest};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ParameterSummary {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct DiseaseSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub parameters: Vec<ParameterSummary>,
    /// Categories with report text, including ones never selected
    pub categories: Vec<&'static str>,
    /// Category reported for a negative and a positive prediction
    pub negative_category: &'static str,
    pub positive_category: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ListDiseasesResponse {
    pub diseases: Vec<DiseaseSummary>,
}

#[derive(Debug, Serialize)]
pub struct AssessPredictionResponse {
    pub disease: &'static str,
    pub title: &'static str,
    pub risk_category: &'static str,
    pub elevated: bool,
    pub confidence: Option<f64>,
    pub confidence_label: String,
    pub factors: Vec<&'static str>,
    pub recommendations: Vec<&'static str>,
    pub meal_plan: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct GenerateReportResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: GeneratedReport,
    /// Whether the report was added to the history
    pub recorded: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ListReportsResponse {
    pub reports: Vec<ReportRecord>,
    pub total: i64,
    pub limit: i64,
}

// ============================================================================
// Tools
// ============================================================================

fn parse_disease(id: &str) -> Result<Disease, String> {
    Disease::from_str(id).ok_or_else(|| {
        format!(
            "Unknown disease '{}'. Expected one of: {}",
            id,
            Disease::ALL.map(|d| d.as_str()).join(", ")
        )
    })
}

/// Every disease a report can be generated for
pub fn list_diseases() -> ListDiseasesResponse {
    let diseases = Disease::ALL
        .iter()
        .map(|&disease| {
            let config = config_for(disease);
            let (negative, positive) = disease.selectable_categories();
            DiseaseSummary {
                id: disease.as_str(),
                title: config.title,
                parameters: config
                    .parameters
                    .iter()
                    .map(|p| ParameterSummary { key: p.key, label: p.label, unit: p.unit })
                    .collect(),
                categories: config.configured_categories().iter().map(|c| c.as_str()).collect(),
                negative_category: negative.as_str(),
                positive_category: positive.as_str(),
            }
        })
        .collect();

    ListDiseasesResponse { diseases }
}

/// Classify a prediction and return the text a report would print, without
/// rendering anything
pub fn assess_prediction(disease: &str, result: Value) -> Result<AssessPredictionResponse, String> {
    let disease = parse_disease(disease)?;
    let result: PredictionResult =
        serde_json::from_value(result).map_err(|e| format!("Invalid prediction result: {}", e))?;

    let config = config_for(disease);
    let assessment = classify(disease, &result);
    let category = assessment.category;

    Ok(AssessPredictionResponse {
        disease: disease.as_str(),
        title: config.title,
        risk_category: category.as_str(),
        elevated: category.is_elevated(),
        confidence: assessment.confidence,
        confidence_label: assessment.confidence_label(),
        factors: config.factors(category).iter().take(3).copied().collect(),
        recommendations: config.recommendations(category).iter().take(4).copied().collect(),
        meal_plan: meal_plan(disease, category).to_vec(),
    })
}

/// Generate a report PDF and record it in the history.
///
/// A history write failure is logged and reported but does not fail the
/// call; the PDF is already on disk.
pub async fn generate_report(
    db: &Database,
    generator: &ReportGenerator,
    disease: &str,
    form_data: Value,
    result: Value,
    patient: PatientInfo,
) -> Result<GenerateReportResponse, String> {
    let request = ReportRequest::from_json(disease, form_data, result, patient).map_err(|e| e.to_string())?;
    let report = generator.generate(&request).await.map_err(|e| e.to_string())?;

    let record = ReportRecordCreate {
        report_id: report.report_id.clone(),
        disease: report.disease.as_str().to_string(),
        risk_category: report.risk_category.as_str().to_string(),
        confidence: report.confidence,
        file_path: report.file_path.clone(),
        patient_name: Some(report.patient_name.clone()).filter(|n| n != NOT_PROVIDED),
        profile_status: report.profile_status.clone(),
    };

    let recorded = match db.with_conn(|conn| ReportRecord::create(conn, &record)) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(report_id = %report.report_id, error = %e, "Failed to record report in history");
            false
        }
    };

    let message = format!(
        "{} report generated: {} ({}% confidence)",
        report.title, report.risk_category, report.confidence_label
    );

    Ok(GenerateReportResponse {
        success: true,
        report,
        recorded,
        message,
    })
}

/// Most recent reports first
pub fn list_reports(db: &Database, disease: Option<&str>, limit: i64) -> Result<ListReportsResponse, String> {
    let disease = disease.map(parse_disease).transpose()?;
    let limit = limit.clamp(1, 500);

    db.with_conn(|conn| {
        let disease = disease.map(|d| d.as_str());
        let reports = ReportRecord::list_recent(conn, disease, limit)?;
        let total = ReportRecord::count_for(conn, disease)?;
        Ok(ListReportsResponse { reports, total, limit })
    })
    .map_err(|e| e.to_string())
}

/// Look up a report by its `RPT-` identifier
pub fn get_report(db: &Database, report_id: &str) -> Result<Option<ReportRecord>, String> {
    db.with_conn(|conn| ReportRecord::get_by_report_id(conn, report_id.trim()))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NoProfile;
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (tempfile::TempDir, Database, ReportGenerator) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("healthai.db")).unwrap();
        let generator = ReportGenerator::new(Arc::new(NoProfile), dir.path().join("reports"));
        (dir, db, generator)
    }

    #[test]
    fn test_list_diseases() {
        let response = list_diseases();
        assert_eq!(response.diseases.len(), 5);

        let liver = response.diseases.iter().find(|d| d.id == "liver").unwrap();
        assert_eq!(liver.positive_category, "disease");
        assert_eq!(liver.negative_category, "normal");
        assert_eq!(liver.parameters[1].label, "ALT");

        let heart = response.diseases.iter().find(|d| d.id == "heart").unwrap();
        assert!(heart.categories.contains(&"moderate"));
    }

    #[test]
    fn test_assess_prediction() {
        let response = assess_prediction("diabetes", json!({"prediction": 1, "probability": 0.5})).unwrap();
        assert_eq!(response.risk_category, "high");
        assert!(response.elevated);
        assert_eq!(response.confidence_label, "50.0");
        assert!(response.factors.len() <= 3);
        assert!(response.recommendations.len() <= 4);
        assert!(!response.meal_plan.is_empty());

        assert!(assess_prediction("pancreas", json!({"prediction": 1})).is_err());
        assert!(assess_prediction("heart", json!("oops")).is_err());
    }

    #[tokio::test]
    async fn test_generate_then_list_and_get() {
        let (_dir, db, generator) = setup();

        let response = generate_report(
            &db,
            &generator,
            "kidney",
            json!({"blood_urea": 55, "serum_creatinine": 1.9}),
            json!({"prediction": 1, "probability": 0.82}),
            PatientInfo { name: Some("Ravi".into()), ..Default::default() },
        )
        .await
        .unwrap();
        assert!(response.success);
        assert!(response.recorded);
        assert!(std::path::Path::new(&response.report.file_path).exists());

        let listed = list_reports(&db, Some("kidney"), 10).unwrap();
        assert_eq!(listed.total, 1);
        assert_eq!(listed.reports[0].report_id, response.report.report_id);
        assert_eq!(listed.reports[0].patient_name.as_deref(), Some("Ravi"));
        assert_eq!(listed.reports[0].profile_status, "unavailable");

        assert!(list_reports(&db, Some("liver"), 10).unwrap().reports.is_empty());
        assert!(list_reports(&db, Some("pancreas"), 10).is_err());

        let found = get_report(&db, &response.report.report_id).unwrap().unwrap();
        assert_eq!(found.risk_category, "high");
        assert!(get_report(&db, "RPT-MISSING").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_total_follows_disease_filter() {
        let (_dir, db, generator) = setup();
        for disease in ["kidney", "liver"] {
            generate_report(&db, &generator, disease, json!({}), json!({"prediction": 0}), PatientInfo::default())
                .await
                .unwrap();
        }

        let kidney = list_reports(&db, Some("kidney"), 10).unwrap();
        assert_eq!(kidney.total, 1);
        assert_eq!(kidney.reports.len(), 1);
        assert_eq!(list_reports(&db, Some("bone"), 10).unwrap().total, 0);
        assert_eq!(list_reports(&db, None, 10).unwrap().total, 2);
        assert_eq!(list_reports(&db, None, 1).unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_generate_unknown_disease_records_nothing() {
        let (_dir, db, generator) = setup();
        let err = generate_report(&db, &generator, "pancreas", json!({}), json!({"prediction": 0}), PatientInfo::default())
            .await
            .unwrap_err();
        assert!(err.contains("pancreas"));
        assert_eq!(list_reports(&db, None, 10).unwrap().total, 0);
    }
}
