//! Core library for shipping-label OCR extraction.
//!
//! This crate provides:
//! - Document normalization: ordering raw recognizer output top to bottom
//! - Field location: one pass finding where each field's pattern first appears
//! - Field extraction: reading the ten record fields out of the located document
//! - Record validation: checking the critical fields before a record ships
//! - Capture orchestration: joining async recognition results, gating preview frames

pub mod document;
pub mod error;
pub mod label;
pub mod models;
pub mod session;
pub mod validate;

pub use document::{CaptureSnapshot, Document, DocumentBlock, RecognizedBlock, RecognizedLine};
pub use error::{Result, ScanError};
pub use label::{locate_fields, LabelParser, LabelScanner, LocationIndex, ScanResult};
pub use models::config::{ExtractionConfig, ScanConfig, ValidationConfig};
pub use models::record::LabelRecord;
pub use session::{contains_postal_code, frame_has_postal_code, RecognitionGate, ScanSession};
pub use validate::{AlertSink, RecordValidator, ValidationOutcome};
