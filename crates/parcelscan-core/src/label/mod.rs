//! Label scanning: field location, extraction, and record assembly.

mod extract;
pub mod locator;
pub mod rules;

pub use locator::{locate_fields, LocationIndex};

use std::time::Instant;

use tracing::{debug, info};

use crate::document::Document;
use crate::models::config::ExtractionConfig;
use crate::models::record::{self, LabelRecord};

/// Result of one scan cycle over a normalized document.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// The assembled ten-field record.
    pub record: LabelRecord,
    /// One "fieldName: value" entry per text-derived field, in record
    /// order. A diagnostic mirror of the extraction pass; the record is
    /// the authoritative output.
    pub field_log: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for turning one capture's recognition results into a record.
pub trait LabelParser {
    /// Extract a label record from a normalized document plus the barcode
    /// payload supplied by the barcode provider.
    fn parse(&self, document: &Document, barcode: &str) -> ScanResult;
}

/// Rule-based scanner for the supported label layout.
///
/// Runs the single location pass, then every field extractor, and carries
/// the barcode through untouched. Extraction never fails; fields that
/// cannot be found come back empty and validation happens downstream.
pub struct LabelScanner {
    /// How many blocks above the weight header to search for the weight
    /// figure.
    weight_search_window: usize,
}

impl LabelScanner {
    /// Create a scanner with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a scanner from an extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            weight_search_window: config.weight_search_window,
        }
    }

    /// Override the weight backward-search window.
    pub fn with_weight_search_window(mut self, window: usize) -> Self {
        self.weight_search_window = window;
        self
    }
}

impl Default for LabelScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelParser for LabelScanner {
    fn parse(&self, document: &Document, barcode: &str) -> ScanResult {
        let start = Instant::now();

        info!("Scanning document with {} blocks", document.len());

        let index = locate_fields(document);

        let product_type = extract::service_type(document, &index);
        let to_address = extract::to_address(document, &index);
        let dest_postal_code = extract::postal_code(document, &index);
        let track_pin = extract::track_pin(document, &index);
        let from_address = extract::from_address(document, &index);
        let product_dimension = extract::dimension(document, &index);
        let product_weight = extract::weight(document, &index, self.weight_search_window);
        let product_instruction = extract::instruction(document, &index);
        let reference = extract::reference(document, &index);

        // Every text-derived field gets a log entry, found or not, so a
        // diagnostic readout always shows the same nine lines.
        let field_log = vec![
            format!("{}: {}", record::FIELD_PRODUCT_TYPE, product_type),
            format!("{}: {}", record::FIELD_TO_ADDRESS, to_address),
            format!("{}: {}", record::FIELD_DEST_POSTAL_CODE, dest_postal_code),
            format!("{}: {}", record::FIELD_TRACK_PIN, track_pin),
            format!("{}: {}", record::FIELD_FROM_ADDRESS, from_address),
            format!("{}: {}", record::FIELD_PRODUCT_DIMENSION, product_dimension),
            format!("{}: {}", record::FIELD_PRODUCT_WEIGHT, product_weight),
            format!("{}: {}", record::FIELD_PRODUCT_INSTRUCTION, product_instruction),
            format!("{}: {}", record::FIELD_REFERENCE, reference),
        ];

        let record = LabelRecord {
            product_type,
            to_address,
            dest_postal_code,
            track_pin,
            bar_code: barcode.to_string(),
            from_address,
            product_dimension,
            product_weight,
            product_instruction,
            reference,
        };

        let processing_time_ms = start.elapsed().as_millis() as u64;
        debug!("Assembled record in {}ms", processing_time_ms);

        ScanResult {
            record,
            field_log,
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{RecognizedBlock, RecognizedLine};
    use pretty_assertions::assert_eq;

    fn doc(blocks: &[&[&str]]) -> Document {
        let raw = blocks
            .iter()
            .enumerate()
            .map(|(b, lines)| RecognizedBlock {
                top: b as f32 * 10.0,
                lines: lines
                    .iter()
                    .enumerate()
                    .map(|(l, text)| RecognizedLine {
                        text: (*text).to_string(),
                        top: b as f32 * 10.0 + l as f32,
                    })
                    .collect(),
            })
            .collect();
        Document::normalize(raw)
    }

    #[test]
    fn test_parse_assembles_full_record() {
        let document = doc(&[
            &["Xpresspost"],
            &["TO: À"],
            &["Julie Tester"],
            &["4811 Churchill Place"],
            &["Laval, QC, H7W 4H4"],
            &["LEAVE AT DOOR"],
            &["FROM / DE"],
            &["Canada Post Warehouse"],
            &["23x18x11 cm"],
            &["1.588 KG"],
            &["123 Main Street"],
            &["Ottawa, ON, K1A 0B1"],
            &["PIN: 1234 5678 9012 3456"],
            &["Ref./Réf.: ORDER-100"],
        ]);

        let scanner = LabelScanner::new();
        let result = scanner.parse(&document, "PHWH7447023210235282270000200");

        assert_eq!(result.record.product_type, "Xpresspost");
        assert_eq!(
            result.record.to_address,
            "Julie Tester, 4811 Churchill Place, Laval, QC, H7W 4H4"
        );
        assert_eq!(result.record.dest_postal_code, "H7W 4H4");
        assert_eq!(result.record.track_pin, "1234 5678 9012 3456");
        assert_eq!(result.record.bar_code, "PHWH7447023210235282270000200");
        assert_eq!(
            result.record.from_address,
            "Canada Post Warehouse, 123 Main Street, Ottawa, ON, K1A 0B1"
        );
        assert_eq!(result.record.product_dimension, "23x18x11 cm");
        assert_eq!(result.record.product_weight, "1.588kg");
        assert_eq!(result.record.product_instruction, "LEAVE AT DOOR");
        assert_eq!(result.record.reference, "ORDER-100");
    }

    #[test]
    fn test_parse_empty_document_keeps_barcode() {
        let scanner = LabelScanner::new();
        let result = scanner.parse(&Document::default(), "PHWH7447023210235282270000200");

        assert_eq!(result.record.bar_code, "PHWH7447023210235282270000200");
        assert_eq!(result.record.to_address, "");
        assert_eq!(result.record.from_address, "");
    }

    #[test]
    fn test_field_log_has_entry_per_text_field() {
        let scanner = LabelScanner::new();
        let result = scanner.parse(&doc(&[&["Priority"]]), "");

        assert_eq!(result.field_log.len(), 9);
        assert_eq!(result.field_log[0], "productType: Priority");
        assert_eq!(result.field_log[1], "toAddress: ");
        assert_eq!(result.field_log[8], "reference: ");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let document = doc(&[
            &["Regular Parcel"],
            &["TO: À", "Julie Tester"],
            &["Laval, QC, H7W 4H4"],
        ]);
        let scanner = LabelScanner::new();

        let first = scanner.parse(&document, "1234567");
        let second = scanner.parse(&document, "1234567");

        assert_eq!(first.record, second.record);
        assert_eq!(first.field_log, second.field_log);
    }
}
