//! Prediction result model
//!
//! The payload returned by a disease-prediction endpoint. Only `prediction`,
//! `probability` and `confidence` are read; everything else is kept as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prediction payload from the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub prediction: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Disease-specific extras (risk_level, severity_level, urgency, ...)
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl PredictionResult {
    pub fn with_prediction(prediction: impl Into<Value>) -> Self {
        Self {
            prediction: prediction.into(),
            ..Default::default()
        }
    }

    /// Whether the binary indicator is set (`prediction == 1`)
    pub fn is_positive(&self) -> bool {
        match &self.prediction {
            Value::Number(n) => n.as_f64() == Some(1.0),
            _ => false,
        }
    }

    /// Probability if present, otherwise confidence
    pub fn confidence_value(&self) -> Option<f64> {
        self.probability.or(self.confidence).filter(|v| v.is_finite())
    }

    pub fn extra_text(&self, key: &str) -> Option<&str> {
        self.extras.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_keeps_extras() {
        let result: PredictionResult = serde_json::from_value(json!({
            "prediction": 1,
            "probability": 0.82,
            "risk_level": "High Risk",
            "recommendations": ["a", "b"]
        }))
        .unwrap();
        assert!(result.is_positive());
        assert_eq!(result.confidence_value(), Some(0.82));
        assert_eq!(result.extra_text("risk_level"), Some("High Risk"));
        assert!(result.extras.contains_key("recommendations"));
    }

    #[test]
    fn test_indicator_is_strict() {
        assert!(PredictionResult::with_prediction(1).is_positive());
        assert!(PredictionResult::with_prediction(1.0).is_positive());
        assert!(!PredictionResult::with_prediction(0).is_positive());
        assert!(!PredictionResult::with_prediction("1").is_positive());
        assert!(!PredictionResult::with_prediction(true).is_positive());
        assert!(!PredictionResult::default().is_positive());
    }

    #[test]
    fn test_probability_preferred_over_confidence() {
        let result = PredictionResult {
            probability: Some(0.25),
            confidence: Some(0.9),
            ..Default::default()
        };
        assert_eq!(result.confidence_value(), Some(0.25));

        let result = PredictionResult { confidence: Some(0.9), ..Default::default() };
        assert_eq!(result.confidence_value(), Some(0.9));

        assert_eq!(PredictionResult::default().confidence_value(), None);
    }
}
