//! Static report content
//!
//! Immutable tables shared by every report: per-disease configuration and
//! meal plans.

pub mod diseases;
pub mod meal_plans;

pub use diseases::{config_for, disease_config, DiseaseReportConfig, ParameterSpec};
pub use meal_plans::meal_plan;
