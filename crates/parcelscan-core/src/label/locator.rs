//! Single-pass field location over the normalized document.
//!
//! Location and extraction are separate steps: this pass only decides WHERE
//! each field's defining pattern first appears, recording block (and for
//! headers, line) indices. Extraction then reads values out of the located
//! neighborhoods.

use tracing::debug;

use crate::document::Document;

use super::rules::patterns::*;
use super::rules::{HandlingInstruction, ServiceType};

/// Where each field's defining pattern was first seen.
///
/// One slot per locatable field. The barcode is supplied by the barcode
/// provider and has no slot here. Slots are write-once: the first match in
/// document order wins and later matches are ignored, so a spurious repeat
/// further down the label cannot displace the real location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationIndex {
    /// Block whose sole line carries the postal code.
    pub postal_code: Option<usize>,
    /// Block whose sole line carries the tracking PIN.
    pub track_pin: Option<usize>,
    /// Block whose sole line carries the dimension string.
    pub dimension: Option<usize>,
    /// Block containing a service name.
    pub service: Option<usize>,
    /// Block and line of the destination header.
    pub to_header: Option<(usize, usize)>,
    /// Block and line of the sender header.
    pub from_header: Option<(usize, usize)>,
    /// Block containing the weight unit token.
    pub weight_unit: Option<usize>,
    /// Block containing a handling instruction.
    pub instruction: Option<usize>,
    /// Block and line of the reference header.
    pub reference: Option<(usize, usize)>,
}

/// Assign `value` to `slot` unless the slot already holds a location.
fn record_once<T>(slot: &mut Option<T>, value: T) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

/// One forward pass over the document, assigning each field the first
/// location whose text satisfies its matcher.
///
/// The pass never exits early: a field that never matches keeps its `None`
/// slot while the rest of the document is still scanned for the others.
/// The short patterns that could fire inside an address paragraph (postal
/// code, tracking PIN, dimensions) are only accepted in blocks that hold
/// exactly one line; the label layout isolates those values on lines of
/// their own.
pub fn locate_fields(document: &Document) -> LocationIndex {
    let mut index = LocationIndex::default();

    for (block_idx, block) in document.blocks.iter().enumerate() {
        let single_line = block.is_single_line();

        for (line_idx, line) in block.lines.iter().enumerate() {
            if single_line {
                if POSTAL_CODE.is_match(line) {
                    record_once(&mut index.postal_code, block_idx);
                }
                if TRACK_PIN.is_match(line) {
                    record_once(&mut index.track_pin, block_idx);
                }
                if DIMENSION.is_match(line) {
                    record_once(&mut index.dimension, block_idx);
                }
            }

            if ServiceType::find_in(line).is_some() {
                record_once(&mut index.service, block_idx);
            }
            if TO_HEADER.is_match(line) {
                record_once(&mut index.to_header, (block_idx, line_idx));
            }
            if FROM_HEADER.is_match(line) {
                record_once(&mut index.from_header, (block_idx, line_idx));
            }
            if line.contains(WEIGHT_UNIT) {
                record_once(&mut index.weight_unit, block_idx);
            }
            if HandlingInstruction::match_line(line).is_some() {
                record_once(&mut index.instruction, block_idx);
            }
            if REF_HEADER.is_match(line) {
                record_once(&mut index.reference, (block_idx, line_idx));
            }
        }
    }

    debug!("Located fields: {:?}", index);

    index
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
    fn test_locates_each_field_kind() {
        let document = doc(&[
            &["Xpresspost"],
            &["TO: À"],
            &["Julie Tester", "4811 Churchill Place"],
            &["H7W 4H4"],
            &["LEAVE AT DOOR"],
            &["FROM / DE"],
            &["23x18x11 cm"],
            &["1.588 KG"],
            &["PIN: 1234 5678 9012 3456"],
            &["Ref./Réf.: ORDER-100"],
        ]);

        let index = locate_fields(&document);

        assert_eq!(index.service, Some(0));
        assert_eq!(index.to_header, Some((1, 0)));
        assert_eq!(index.postal_code, Some(3));
        assert_eq!(index.instruction, Some(4));
        assert_eq!(index.from_header, Some((5, 0)));
        assert_eq!(index.dimension, Some(6));
        assert_eq!(index.weight_unit, Some(7));
        assert_eq!(index.track_pin, Some(8));
        assert_eq!(index.reference, Some((9, 0)));
    }

    #[test]
    fn test_first_match_wins() {
        let document = doc(&[&["H7W 4H4"], &["K1A 0B1"]]);
        let index = locate_fields(&document);
        assert_eq!(index.postal_code, Some(0));
    }

    #[test]
    fn test_postal_code_ignored_in_multi_line_block() {
        // Inside an address paragraph the pattern must not claim the block.
        let document = doc(&[
            &["Julie Tester", "Laval, QC, H7W 4H4"],
            &["H7W 4H4"],
        ]);
        let index = locate_fields(&document);
        assert_eq!(index.postal_code, Some(1));
    }

    #[test]
    fn test_postal_code_accepts_letter_o_for_zero() {
        let document = doc(&[&["K1A OB1"]]);
        let index = locate_fields(&document);
        assert_eq!(index.postal_code, Some(0));
    }

    #[test]
    fn test_header_records_block_and_line() {
        let document = doc(&[&["Shipping label", "TO: À", "Julie Tester"]]);
        let index = locate_fields(&document);
        assert_eq!(index.to_header, Some((0, 1)));
    }

    #[test]
    fn test_first_matching_line_wins_within_block() {
        let document = doc(&[&["TO: À", "TO: À again"]]);
        let index = locate_fields(&document);
        assert_eq!(index.to_header, Some((0, 0)));
    }

    #[test]
    fn test_pass_continues_after_unmatched_fields() {
        // No service name and no headers anywhere; later fields still land.
        let document = doc(&[&["nothing here"], &["1234 5678 9012 3456"]]);
        let index = locate_fields(&document);
        assert_eq!(index.service, None);
        assert_eq!(index.to_header, None);
        assert_eq!(index.track_pin, Some(1));
    }

    #[test]
    fn test_reference_header_tolerates_missing_accents() {
        let document = doc(&[&["Ref: Ref: ABC"]]);
        let index = locate_fields(&document);
        assert_eq!(index.reference, Some((0, 0)));
    }

    #[test]
    fn test_empty_document_locates_nothing() {
        let index = locate_fields(&Document::default());
        assert_eq!(index, LocationIndex::default());
    }
}
