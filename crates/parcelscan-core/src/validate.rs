//! Minimal-completeness validation of assembled records.

use tracing::warn;

use crate::models::config::ValidationConfig;
use crate::models::record::{LabelRecord, FIELD_BAR_CODE, FIELD_FROM_ADDRESS, FIELD_TO_ADDRESS};

/// Outcome of validating one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The record passed; holds its serialized field-per-line form, ready
    /// to hand to downstream consumers.
    Valid(String),
    /// One or more critical fields are missing, listed in check order.
    /// There is no serialized form; an incomplete record is never shipped.
    Invalid(Vec<String>),
}

impl ValidationOutcome {
    /// Whether the record passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }
}

/// Receiver for validation-failure alerts: whatever surfaces the rescan
/// prompt to the operator (display text, audio cue).
pub trait AlertSink {
    /// Called once per failed validation with the missing field names.
    fn incomplete(&self, missing: &[String]);
}

/// Checks the three critical fields against minimum plausible lengths.
///
/// A field counts as missing whether it is empty, blank, or merely too
/// short; all three mean the capture did not get enough of it. Lengths are
/// measured in characters on the trimmed value.
pub struct RecordValidator {
    min_to_address_len: usize,
    min_from_address_len: usize,
    min_barcode_len: usize,
}

impl RecordValidator {
    /// Create a validator with default thresholds.
    pub fn new() -> Self {
        Self::from_config(&ValidationConfig::default())
    }

    /// Create a validator from a validation configuration.
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self {
            min_to_address_len: config.min_to_address_len,
            min_from_address_len: config.min_from_address_len,
            min_barcode_len: config.min_barcode_len,
        }
    }

    /// Override the destination address threshold.
    pub fn with_min_to_address_len(mut self, len: usize) -> Self {
        self.min_to_address_len = len;
        self
    }

    /// Override the sender address threshold.
    pub fn with_min_from_address_len(mut self, len: usize) -> Self {
        self.min_from_address_len = len;
        self
    }

    /// Override the barcode threshold.
    pub fn with_min_barcode_len(mut self, len: usize) -> Self {
        self.min_barcode_len = len;
        self
    }

    /// Classify a record as complete or incomplete.
    pub fn validate(&self, record: &LabelRecord) -> ValidationOutcome {
        let mut missing = Vec::new();

        if !plausible(&record.to_address, self.min_to_address_len) {
            missing.push(FIELD_TO_ADDRESS.to_string());
        }
        if !plausible(&record.from_address, self.min_from_address_len) {
            missing.push(FIELD_FROM_ADDRESS.to_string());
        }
        if !plausible(&record.bar_code, self.min_barcode_len) {
            missing.push(FIELD_BAR_CODE.to_string());
        }

        if missing.is_empty() {
            ValidationOutcome::Valid(record.to_display_text())
        } else {
            warn!("Record incomplete, missing: {}", missing.join(", "));
            ValidationOutcome::Invalid(missing)
        }
    }

    /// Classify a record and, on failure, notify the alert sink.
    pub fn validate_with_alert(
        &self,
        record: &LabelRecord,
        alert: &dyn AlertSink,
    ) -> ValidationOutcome {
        let outcome = self.validate(record);
        if let ValidationOutcome::Invalid(missing) = &outcome {
            alert.incomplete(missing);
        }
        outcome
    }
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn plausible(value: &str, min_len: usize) -> bool {
    value.trim().chars().count() >= min_len
}
