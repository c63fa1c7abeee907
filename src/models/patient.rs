//! Patient model
//!
//! Identity fields printed in the report header, plus the per-form gender
//! adapters. Each disease form encodes gender its own way; the encodings are
//! owned by the backend contract and are decoded here, never unified.

use serde::{Deserialize, Serialize};

use crate::models::{display_value, Disease, FormInputs};

/// Placeholder printed for identity fields nobody supplied
pub const NOT_PROVIDED: &str = "Not Provided";

/// Optional patient identity fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
}

impl PatientInfo {
    /// Overlay `overrides` on top of `self`; any non-empty override wins
    pub fn overlay(self, overrides: &PatientInfo) -> PatientInfo {
        fn pick(base: Option<String>, over: &Option<String>) -> Option<String> {
            match over {
                Some(v) if !v.trim().is_empty() => Some(v.clone()),
                _ => base.filter(|v| !v.trim().is_empty()),
            }
        }

        PatientInfo {
            name: pick(self.name, &overrides.name),
            age: pick(self.age, &overrides.age),
            gender: pick(self.gender, &overrides.gender),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.gender.is_none()
    }
}

/// Canonical gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

/// How one form writes gender into its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderEncoding {
    /// Binary code; the given code means female, anything else male
    Code { key: &'static str, female: &'static str },
    /// Literal "Male" / "Female" labels
    Label { key: &'static str },
}

impl GenderEncoding {
    /// The encoding used by a disease's own form
    pub fn for_disease(disease: Disease) -> Self {
        match disease {
            Disease::Liver => GenderEncoding::Code { key: "Gender", female: "0" },
            Disease::Diabetes => GenderEncoding::Label { key: "gender" },
            Disease::Heart | Disease::Kidney | Disease::Bone => {
                GenderEncoding::Code { key: "gender", female: "1" }
            }
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            GenderEncoding::Code { key, .. } | GenderEncoding::Label { key } => key,
        }
    }

    /// Decode the form's gender field, if it was filled in
    pub fn decode(&self, form: &FormInputs) -> Option<Gender> {
        let raw = form
            .present(self.key())
            .map(display_value)
            .filter(|raw| !raw.trim().is_empty())?;
        match self {
            GenderEncoding::Code { female, .. } => {
                if raw.trim() == *female {
                    Some(Gender::Female)
                } else {
                    Some(Gender::Male)
                }
            }
            GenderEncoding::Label { .. } => match raw.trim().to_lowercase().as_str() {
                "female" | "f" => Some(Gender::Female),
                "male" | "m" => Some(Gender::Male),
                _ => None,
            },
        }
    }
}
