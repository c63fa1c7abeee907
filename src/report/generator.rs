//! Report generation
//!
//! Runs the whole pipeline for one request: configuration lookup, profile
//! fetch, logo load, classification, layout, rendering, and writing the PDF.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::content::{disease_config, meal_plan, DiseaseReportConfig};
use crate::models::{Disease, FormInputs, PatientInfo, PredictionResult, RiskCategory};
use crate::report::classifier::{classify, RiskAssessment};
use crate::report::identifier::new_report_id;
use crate::report::layout::{compose, ReportContent, ReportLayout};
use crate::report::logo::{load_logo, LogoAsset};
use crate::report::patient::{resolve_identity, PatientIdentity, ProfileSource};
use crate::report::render::render_pdf;
use crate::report::ReportError;

/// One report to generate
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Disease identifier as submitted, e.g. `kidney`
    pub disease: String,
    pub form: FormInputs,
    pub result: PredictionResult,
    /// Caller-supplied identity; wins over the fetched profile
    pub patient: PatientInfo,
}

impl ReportRequest {
    /// Build from loosely typed JSON as received from a caller
    pub fn from_json(
        disease: &str,
        form: serde_json::Value,
        result: serde_json::Value,
        patient: PatientInfo,
    ) -> Result<Self, ReportError> {
        let form = match form {
            serde_json::Value::Object(map) => FormInputs::new(map),
            serde_json::Value::Null => FormInputs::default(),
            other => {
                return Err(ReportError::InvalidInput(format!(
                    "form data must be a JSON object, got {}",
                    other
                )))
            }
        };
        let result: PredictionResult = serde_json::from_value(result)
            .map_err(|e| ReportError::InvalidInput(format!("prediction result: {}", e)))?;

        Ok(Self {
            disease: disease.to_string(),
            form,
            result,
            patient,
        })
    }
}

/// Everything decided before rendering
pub struct PreparedReport {
    pub config: &'static DiseaseReportConfig,
    pub assessment: RiskAssessment,
    pub identity: PatientIdentity,
    pub profile_status: &'static str,
    pub logo: LogoAsset,
    pub content: ReportContent,
    pub layout: ReportLayout,
}

impl PreparedReport {
    pub fn disease(&self) -> Disease {
        self.config.disease
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedReport {
    pub report_id: String,
    pub file_name: String,
    pub file_path: String,
    pub disease: Disease,
    pub title: String,
    pub risk_category: RiskCategory,
    pub confidence: Option<f64>,
    pub confidence_label: String,
    pub patient_name: String,
    pub profile_status: String,
    pub logo_status: String,
    pub meal_lines_dropped: usize,
    pub bytes_written: usize,
}

/// `HealthAI_<Title_With_Underscores>_<ReportId>.pdf`
pub fn report_file_name(title: &str, report_id: &str) -> String {
    let title = title.split_whitespace().collect::<Vec<_>>().join("_");
    format!("HealthAI_{}_{}.pdf", title, report_id)
}

/// Generates reports into one output directory
pub struct ReportGenerator {
    profiles: Arc<dyn ProfileSource>,
    logo_path: Option<PathBuf>,
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(profiles: Arc<dyn ProfileSource>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            profiles,
            logo_path: None,
            output_dir: output_dir.into(),
        }
    }

    pub fn with_logo(mut self, logo_path: Option<PathBuf>) -> Self {
        self.logo_path = logo_path;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Resolve, classify and lay out a report without writing anything.
    ///
    /// Unknown diseases fail before the profile is requested.
    pub async fn prepare(&self, request: &ReportRequest) -> Result<PreparedReport, ReportError> {
        let config = disease_config(&request.disease)?;
        let disease = config.disease;

        let lookup = self.profiles.fetch_profile().await;
        let logo = load_logo(self.logo_path.as_deref()).await;

        let identity = resolve_identity(disease, &request.form, &lookup, &request.patient);
        let assessment = classify(disease, &request.result);

        let parameters = config
            .parameters
            .iter()
            .filter_map(|spec| request.form.present(spec.key).map(|value| spec.render(value)))
            .collect();

        let to_owned = |lines: &[&str]| lines.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let content = ReportContent {
            report_id: new_report_id(),
            date_label: chrono::Local::now().format("%-m/%-d/%Y").to_string(),
            title: config.title.to_string(),
            patient: identity.clone(),
            parameters,
            assessment,
            factors: to_owned(config.factors(assessment.category)),
            recommendations: to_owned(config.recommendations(assessment.category)),
            meal_plan: to_owned(meal_plan(disease, assessment.category)),
        };
        let layout = compose(&content);

        Ok(PreparedReport {
            config,
            assessment,
            identity,
            profile_status: lookup.status(),
            logo,
            content,
            layout,
        })
    }

    /// Generate and save a report
    pub async fn generate(&self, request: &ReportRequest) -> Result<GeneratedReport, ReportError> {
        let prepared = self.prepare(request).await?;
        let content = &prepared.content;

        let document_title = format!("AI-Assisted {} Report", content.title);
        let bytes = render_pdf(&prepared.layout, &document_title, prepared.logo.image())?;

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let file_name = report_file_name(&content.title, &content.report_id);
        let file_path = self.output_dir.join(&file_name);
        tokio::fs::write(&file_path, &bytes).await?;

        if prepared.layout.meal_lines_dropped > 0 {
            warn!(
                report_id = %content.report_id,
                dropped = prepared.layout.meal_lines_dropped,
                "Meal plan did not fit on the page"
            );
        }
        info!(
            report_id = %content.report_id,
            disease = %prepared.disease(),
            category = %prepared.assessment.category,
            profile = prepared.profile_status,
            path = %file_path.display(),
            "Report generated"
        );

        Ok(GeneratedReport {
            report_id: content.report_id.clone(),
            file_name,
            file_path: file_path.to_string_lossy().to_string(),
            disease: prepared.disease(),
            title: content.title.clone(),
            risk_category: prepared.assessment.category,
            confidence: prepared.assessment.confidence,
            confidence_label: prepared.assessment.confidence_label(),
            patient_name: prepared.identity.name.clone(),
            profile_status: prepared.profile_status.to_string(),
            logo_status: prepared.logo.status().to_string(),
            meal_lines_dropped: prepared.layout.meal_lines_dropped,
            bytes_written: bytes.len(),
        })
    }
}
