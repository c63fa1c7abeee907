//! Disease report configuration
//!
//! What each disease's report contains: title, which form parameters to
//! print and how, and the factor/recommendation text per risk category.
//!
//! `moderate` text exists for diabetes, heart and kidney even though the
//! classifier never selects it. It is kept so a ternary risk signal can be
//! wired in without touching the tables.

use serde_json::Value;

use crate::models::{display_value, Disease, RiskCategory};
use crate::report::ReportError;

/// One clinical parameter line in the report
pub struct ParameterSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: Option<&'static str>,
    /// Maps a raw form value to a display label; `None` keeps the raw value
    pub format: Option<fn(&Value) -> Option<String>>,
}

impl ParameterSpec {
    /// Render as `label: value[ unit]`
    pub fn render(&self, value: &Value) -> String {
        let formatted = self
            .format
            .and_then(|f| f(value))
            .unwrap_or_else(|| display_value(value));

        match self.unit {
            Some(unit) => format!("{}: {} {}", self.label, formatted, unit),
            None => format!("{}: {}", self.label, formatted),
        }
    }
}

/// Text lines keyed by risk category
pub struct CategoryText {
    pub category: RiskCategory,
    pub lines: &'static [&'static str],
}

/// Static report metadata for one disease
pub struct DiseaseReportConfig {
    pub disease: Disease,
    pub title: &'static str,
    pub parameters: &'static [ParameterSpec],
    pub factors: &'static [CategoryText],
    pub recommendations: &'static [CategoryText],
}

impl DiseaseReportConfig {
    pub fn factors(&self, category: RiskCategory) -> &'static [&'static str] {
        lines_for(self.factors, category)
    }

    pub fn recommendations(&self, category: RiskCategory) -> &'static [&'static str] {
        lines_for(self.recommendations, category)
    }

    /// Categories this config has text for, in table order
    pub fn configured_categories(&self) -> Vec<RiskCategory> {
        self.factors.iter().map(|t| t.category).collect()
    }
}

fn lines_for(table: &'static [CategoryText], category: RiskCategory) -> &'static [&'static str] {
    table
        .iter()
        .find(|t| t.category == category)
        .map(|t| t.lines)
        .unwrap_or(&[])
}

const LEVEL_LABELS: [&str; 3] = ["Normal", "Above Normal", "Well Above Normal"];

/// 1..=3 level codes used by the cardiovascular form
fn format_level(value: &Value) -> Option<String> {
    let code = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if code.fract() != 0.0 || !(1.0..=3.0).contains(&code) {
        return None;
    }
    Some(LEVEL_LABELS[code as usize - 1].to_string())
}

static DIABETES: DiseaseReportConfig = DiseaseReportConfig {
    disease: Disease::Diabetes,
    title: "Diabetes Risk Assessment",
    parameters: &[
        ParameterSpec { key: "glucose", label: "Glucose Level", unit: Some("mg/dL"), format: None },
        ParameterSpec { key: "bmi", label: "Body Mass Index", unit: None, format: None },
        ParameterSpec { key: "blood_pressure", label: "Blood Pressure", unit: Some("mm Hg"), format: None },
        ParameterSpec { key: "age", label: "Age", unit: Some("years"), format: None },
    ],
    factors: &[
        CategoryText {
            category: RiskCategory::High,
            lines: &["Elevated glucose levels", "High BMI indicating obesity", "Elevated blood pressure"],
        },
        CategoryText {
            category: RiskCategory::Moderate,
            lines: &["Borderline glucose levels", "Slightly elevated BMI"],
        },
        CategoryText {
            category: RiskCategory::Low,
            lines: &["Normal glucose levels", "Healthy BMI range"],
        },
    ],
    recommendations: &[
        CategoryText {
            category: RiskCategory::High,
            lines: &[
                "Monitor glucose daily",
                "Low-sugar diet",
                "Exercise 30 minutes daily",
                "Consult endocrinologist",
            ],
        },
        CategoryText {
            category: RiskCategory::Moderate,
            lines: &["Reduce refined carbs", "Increase physical activity"],
        },
        CategoryText {
            category: RiskCategory::Low,
            lines: &["Maintain balanced diet", "Regular exercise"],
        },
    ],
};

static HEART: DiseaseReportConfig = DiseaseReportConfig {
    disease: Disease::Heart,
    title: "Cardiovascular Disease Risk Assessment",
    parameters: &[
        ParameterSpec { key: "ap_hi", label: "Systolic BP", unit: Some("mm Hg"), format: None },
        ParameterSpec { key: "ap_lo", label: "Diastolic BP", unit: Some("mm Hg"), format: None },
        ParameterSpec { key: "cholesterol", label: "Cholesterol", unit: None, format: Some(format_level) },
        ParameterSpec { key: "gluc", label: "Glucose", unit: None, format: Some(format_level) },
    ],
    factors: &[
        CategoryText {
            category: RiskCategory::High,
            lines: &["Elevated blood pressure", "High cholesterol levels"],
        },
        CategoryText {
            category: RiskCategory::Moderate,
            lines: &["Borderline blood pressure"],
        },
        CategoryText {
            category: RiskCategory::Low,
            lines: &["Normal BP", "Healthy cholesterol"],
        },
    ],
    recommendations: &[
        CategoryText {
            category: RiskCategory::High,
            lines: &["Consult cardiologist", "Low-sodium diet", "Quit smoking"],
        },
        CategoryText {
            category: RiskCategory::Moderate,
            lines: &["Exercise 150 min/week", "Reduce salt"],
        },
        CategoryText {
            category: RiskCategory::Low,
            lines: &["Maintain heart-healthy lifestyle"],
        },
    ],
};

static LIVER: DiseaseReportConfig = DiseaseReportConfig {
    disease: Disease::Liver,
    title: "Liver Function Assessment",
    parameters: &[
        ParameterSpec { key: "Total_Bilirubin", label: "Total Bilirubin", unit: Some("mg/dL"), format: None },
        ParameterSpec { key: "Alamine_Aminotransferase", label: "ALT", unit: Some("IU/L"), format: None },
        ParameterSpec { key: "Aspartate_Aminotransferase", label: "AST", unit: Some("IU/L"), format: None },
    ],
    factors: &[
        CategoryText {
            category: RiskCategory::Disease,
            lines: &["Elevated liver enzymes", "Abnormal bilirubin levels"],
        },
        CategoryText {
            category: RiskCategory::Normal,
            lines: &["Normal enzyme levels"],
        },
    ],
    recommendations: &[
        CategoryText {
            category: RiskCategory::Disease,
            lines: &["Consult hepatologist", "Avoid alcohol completely"],
        },
        CategoryText {
            category: RiskCategory::Normal,
            lines: &["Maintain liver-friendly diet"],
        },
    ],
};

static KIDNEY: DiseaseReportConfig = DiseaseReportConfig {
    disease: Disease::Kidney,
    title: "Kidney Function Assessment",
    parameters: &[
        ParameterSpec { key: "blood_urea", label: "Blood Urea", unit: Some("mg/dL"), format: None },
        ParameterSpec { key: "serum_creatinine", label: "Serum Creatinine", unit: Some("mg/dL"), format: None },
    ],
    factors: &[
        CategoryText {
            category: RiskCategory::High,
            lines: &["Elevated creatinine levels"],
        },
        CategoryText {
            category: RiskCategory::Moderate,
            lines: &["Borderline kidney markers"],
        },
        CategoryText {
            category: RiskCategory::Low,
            lines: &["Normal kidney function"],
        },
    ],
    recommendations: &[
        CategoryText {
            category: RiskCategory::High,
            lines: &["Consult nephrologist", "Low-protein diet"],
        },
        CategoryText {
            category: RiskCategory::Moderate,
            lines: &["Quarterly checkups"],
        },
        CategoryText {
            category: RiskCategory::Low,
            lines: &["Maintain hydration"],
        },
    ],
};

static BONE: DiseaseReportConfig = DiseaseReportConfig {
    disease: Disease::Bone,
    title: "Bone Fracture Detection",
    parameters: &[ParameterSpec {
        key: "confidence",
        label: "Detection Confidence",
        unit: Some("%"),
        format: None,
    }],
    factors: &[
        CategoryText {
            category: RiskCategory::Fracture,
            lines: &["Fracture detected", "Bone discontinuity observed"],
        },
        CategoryText {
            category: RiskCategory::Normal,
            lines: &["No fracture detected"],
        },
    ],
    recommendations: &[
        CategoryText {
            category: RiskCategory::Fracture,
            lines: &["Consult orthopedic surgeon", "Immobilize affected area"],
        },
        CategoryText {
            category: RiskCategory::Normal,
            lines: &["Maintain bone health", "Adequate calcium intake"],
        },
    ],
};

/// Config for a known disease
pub fn config_for(disease: Disease) -> &'static DiseaseReportConfig {
    match disease {
        Disease::Diabetes => &DIABETES,
        Disease::Heart => &HEART,
        Disease::Liver => &LIVER,
        Disease::Kidney => &KIDNEY,
        Disease::Bone => &BONE,
    }
}

/// Config for a disease identifier; unknown identifiers are an error
pub fn disease_config(id: &str) -> Result<&'static DiseaseReportConfig, ReportError> {
    Disease::from_str(id)
        .map(config_for)
        .ok_or_else(|| ReportError::UnknownDisease(id.to_string()))
}
