//! Data models
//!
//! Report inputs, derived categories, and the stored report history.

mod disease;
mod form;
mod patient;
mod prediction;
mod report_record;

pub use disease::{Disease, RiskCategory};
pub use form::{display_value, FormInputs};
pub use patient::{Gender, GenderEncoding, PatientInfo, NOT_PROVIDED};
pub use prediction::PredictionResult;
pub use report_record::{ReportRecord, ReportRecordCreate};
