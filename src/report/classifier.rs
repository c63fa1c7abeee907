//! Risk classification
//!
//! Maps a prediction payload to the risk category whose text the report
//! prints. Only the binary indicator decides the category; confidence is
//! carried along for display.

use serde::Serialize;

use crate::models::{Disease, PredictionResult, RiskCategory};

/// Category plus the confidence shown next to it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub category: RiskCategory,
    /// 0..1, `None` when the payload carried neither probability nor confidence
    pub confidence: Option<f64>,
}

impl RiskAssessment {
    /// Percentage with one decimal, or "N/A"
    pub fn confidence_label(&self) -> String {
        match self.confidence {
            Some(value) => format!("{:.1}", value * 100.0),
            None => "N/A".to_string(),
        }
    }
}

/// Classify a prediction for the given disease
pub fn classify(disease: Disease, result: &PredictionResult) -> RiskAssessment {
    let (negative, positive) = disease.selectable_categories();
    let category = if result.is_positive() {
        positive
    } else {
        negative
    };

    RiskAssessment {
        category,
        confidence: result.confidence_value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule() {
        for disease in [Disease::Diabetes, Disease::Heart, Disease::Kidney] {
            let high = classify(disease, &PredictionResult::with_prediction(1));
            let low = classify(disease, &PredictionResult::with_prediction(0));
            assert_eq!(high.category, RiskCategory::High);
            assert_eq!(low.category, RiskCategory::Low);
        }
    }

    #[test]
    fn test_liver_rule() {
        assert_eq!(
            classify(Disease::Liver, &PredictionResult::with_prediction(1)).category,
            RiskCategory::Disease
        );
        assert_eq!(
            classify(Disease::Liver, &PredictionResult::with_prediction(0)).category,
            RiskCategory::Normal
        );
    }

    #[test]
    fn test_bone_rule_reads_code_only() {
        assert_eq!(
            classify(Disease::Bone, &PredictionResult::with_prediction(1)).category,
            RiskCategory::Fracture
        );
        // The fracture endpoint's textual label is not the indicator
        assert_eq!(
            classify(Disease::Bone, &PredictionResult::with_prediction("Fracture")).category,
            RiskCategory::Normal
        );
        assert_eq!(
            classify(Disease::Bone, &PredictionResult::with_prediction("No Fracture")).category,
            RiskCategory::Normal
        );
    }

    #[test]
    fn test_string_one_is_not_positive() {
        assert_eq!(
            classify(Disease::Heart, &PredictionResult::with_prediction("1")).category,
            RiskCategory::Low
        );
    }

    #[test]
    fn test_moderate_is_never_selected() {
        let mut result = PredictionResult::with_prediction(0);
        result.probability = Some(0.5);
        result
            .extras
            .insert("risk_level".into(), serde_json::json!("Moderate Risk"));
        assert_eq!(classify(Disease::Diabetes, &result).category, RiskCategory::Low);
    }

    #[test]
    fn test_confidence_label() {
        let mut result = PredictionResult::with_prediction(1);
        result.probability = Some(0.875);
        assert_eq!(classify(Disease::Heart, &result).confidence_label(), "87.5");

        let mut result = PredictionResult::with_prediction(1);
        result.confidence = Some(0.5);
        assert_eq!(classify(Disease::Bone, &result).confidence_label(), "50.0");

        let result = PredictionResult::with_prediction(0);
        assert_eq!(classify(Disease::Kidney, &result).confidence_label(), "N/A");
    }

    #[test]
    fn test_confidence_does_not_change_category() {
        let mut result = PredictionResult::with_prediction(0);
        result.probability = Some(0.99);
        assert_eq!(classify(Disease::Heart, &result).category, RiskCategory::Low);
    }
}
