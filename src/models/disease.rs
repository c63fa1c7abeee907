//! Disease and risk category models
//!
//! The closed set of diseases a report can be generated for, and the coarse
//! risk buckets a prediction is mapped into.

use serde::{Deserialize, Serialize};

/// Disease identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    Diabetes,
    Heart,
    Liver,
    Kidney,
    Bone,
}

impl Disease {
    pub const ALL: [Disease; 5] = [
        Disease::Diabetes,
        Disease::Heart,
        Disease::Liver,
        Disease::Kidney,
        Disease::Bone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Disease::Diabetes => "diabetes",
            Disease::Heart => "heart",
            Disease::Liver => "liver",
            Disease::Kidney => "kidney",
            Disease::Bone => "bone",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "diabetes" => Some(Disease::Diabetes),
            "heart" => Some(Disease::Heart),
            "liver" => Some(Disease::Liver),
            "kidney" => Some(Disease::Kidney),
            "bone" | "bone_fracture" => Some(Disease::Bone),
            _ => None,
        }
    }

    /// Risk categories the classifier can actually select for this disease
    pub fn selectable_categories(&self) -> (RiskCategory, RiskCategory) {
        match self {
            Disease::Liver => (RiskCategory::Normal, RiskCategory::Disease),
            Disease::Bone => (RiskCategory::Normal, RiskCategory::Fracture),
            Disease::Diabetes | Disease::Heart | Disease::Kidney => {
                (RiskCategory::Low, RiskCategory::High)
            }
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse risk bucket derived from a prediction result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
    Normal,
    Disease,
    Fracture,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Moderate => "moderate",
            RiskCategory::High => "high",
            RiskCategory::Normal => "normal",
            RiskCategory::Disease => "disease",
            RiskCategory::Fracture => "fracture",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(RiskCategory::Low),
            "moderate" => Some(RiskCategory::Moderate),
            "high" => Some(RiskCategory::High),
            "normal" => Some(RiskCategory::Normal),
            "disease" => Some(RiskCategory::Disease),
            "fracture" => Some(RiskCategory::Fracture),
            _ => None,
        }
    }

    /// Whether the category is rendered as an elevated (red) finding
    pub fn is_elevated(&self) -> bool {
        matches!(
            self,
            RiskCategory::High | RiskCategory::Disease | RiskCategory::Fracture
        )
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
