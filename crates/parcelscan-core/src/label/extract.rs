//! Per-field extraction strategies over a located document.
//!
//! Every extractor takes the normalized document plus the location index
//! and returns a `String`. A field whose location slot is empty, or whose
//! located neighborhood yields nothing, comes back as an empty string; the
//! validator decides later whether that matters.

use crate::document::{Document, DocumentBlock};

use super::locator::LocationIndex;
use super::rules::patterns::{
    DECIMAL_NUMBER, DIMENSION, MANIFEST_TOKEN, POSTAL_CODE, WEIGHT_UNIT,
};
use super::rules::{HandlingInstruction, ServiceType};

/// Separator between accumulated address fragments.
const FRAGMENT_SEPARATOR: &str = ", ";

/// The located block's sole line, when the slot holds a location.
fn located_line(document: &Document, slot: Option<usize>) -> Option<&str> {
    document
        .block(slot?)?
        .lines
        .first()
        .map(String::as_str)
}

/// The located block's lines, or an empty slice when the slot is empty.
fn located_lines(document: &Document, slot: Option<usize>) -> &[String] {
    slot.and_then(|idx| document.block(idx))
        .map(|block| block.lines.as_slice())
        .unwrap_or(&[])
}

/// Text after the last colon when one is present, the whole line otherwise.
/// Strips "PIN:"-style label prefixes off value lines.
fn after_last_colon(line: &str) -> String {
    match line.rfind(':') {
        Some(pos) => line[pos + 1..].trim().to_string(),
        None => line.to_string(),
    }
}

/// Append `line` to `address`, separating fragments with ", ".
fn push_fragment(address: &mut String, line: &str) {
    if !address.is_empty() {
        address.push_str(FRAGMENT_SEPARATOR);
    }
    address.push_str(line);
}

/// Service type: the first vocabulary name found in the located block.
pub(crate) fn service_type(document: &Document, index: &LocationIndex) -> String {
    located_lines(document, index.service)
        .iter()
        .find_map(|line| ServiceType::find_in(line))
        .map(|service| service.as_str().to_string())
        .unwrap_or_default()
}

/// Handling instruction: the canonical vocabulary form of the located line.
pub(crate) fn instruction(document: &Document, index: &LocationIndex) -> String {
    located_lines(document, index.instruction)
        .iter()
        .find_map(|line| HandlingInstruction::match_line(line))
        .map(|instruction| instruction.as_str().to_string())
        .unwrap_or_default()
}

/// Postal code: the pattern match inside the located block's sole line.
pub(crate) fn postal_code(document: &Document, index: &LocationIndex) -> String {
    located_line(document, index.postal_code)
        .and_then(|line| POSTAL_CODE.find(line))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Dimensions: the located block's sole line, verbatim.
pub(crate) fn dimension(document: &Document, index: &LocationIndex) -> String {
    located_line(document, index.dimension)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Tracking PIN: the located line minus any label prefix.
pub(crate) fn track_pin(document: &Document, index: &LocationIndex) -> String {
    located_line(document, index.track_pin)
        .map(after_last_colon)
        .unwrap_or_default()
}

/// Reference: the header line's text after its last colon.
pub(crate) fn reference(document: &Document, index: &LocationIndex) -> String {
    let Some((block_idx, line_idx)) = index.reference else {
        return String::new();
    };
    document
        .block(block_idx)
        .and_then(|block| block.lines.get(line_idx))
        .map(|line| after_last_colon(line))
        .unwrap_or_default()
}

/// Destination address: every line after the header, walking forward across
/// blocks, until the accumulated text carries a postal code or a handling
/// instruction block is reached. Instruction blocks are excluded entirely;
/// the label prints handling tags directly beneath the destination and they
/// are never part of the address.
pub(crate) fn to_address(document: &Document, index: &LocationIndex) -> String {
    let Some((header_block, header_line)) = index.to_header else {
        return String::new();
    };

    let mut address = String::new();

    if let Some(block) = document.block(header_block) {
        for line in block.lines.iter().skip(header_line + 1) {
            push_fragment(&mut address, line);
        }
    }

    for block in document.blocks.iter().skip(header_block + 1) {
        if POSTAL_CODE.is_match(&address) {
            break;
        }
        if holds_instruction(block) {
            break;
        }
        for line in &block.lines {
            push_fragment(&mut address, line);
        }
    }

    address
}

/// Sender address: the same forward walk as the destination, except that
/// package metadata blocks interleaved with the sender section (dimensions,
/// weight figures, manifest tags) are skipped without ending the walk.
pub(crate) fn from_address(document: &Document, index: &LocationIndex) -> String {
    let Some((header_block, header_line)) = index.from_header else {
        return String::new();
    };

    let mut address = String::new();

    if let Some(block) = document.block(header_block) {
        for line in block.lines.iter().skip(header_line + 1) {
            push_fragment(&mut address, line);
        }
    }

    for block in document.blocks.iter().skip(header_block + 1) {
        if POSTAL_CODE.is_match(&address) {
            break;
        }
        if is_package_metadata(block) {
            continue;
        }
        for line in &block.lines {
            push_fragment(&mut address, line);
        }
    }

    address
}

/// Weight: a decimal figure on or near the weight-unit header line, with
/// the fixed "kg" suffix appended. On most labels the figure shares the
/// header line ("1.588 KG"); on the rest it sits in one of the few blocks
/// printed just above, with the dimension and sender-header blocks
/// interleaved between.
pub(crate) fn weight(
    document: &Document,
    index: &LocationIndex,
    search_window: usize,
) -> String {
    let Some(header_block) = index.weight_unit else {
        return String::new();
    };

    if let Some(first) = document.block(header_block).and_then(|b| b.lines.first()) {
        if let Some(m) = DECIMAL_NUMBER.find(first) {
            return format!("{}kg", m.as_str());
        }
    }

    let skip_dimension = index.dimension;
    let skip_from = index.from_header.map(|(block, _)| block);

    for offset in 1..=search_window {
        let Some(block_idx) = header_block.checked_sub(offset) else {
            break;
        };
        if Some(block_idx) == skip_dimension || Some(block_idx) == skip_from {
            continue;
        }
        let Some(block) = document.block(block_idx) else {
            continue;
        };
        if let Some(m) = block.lines.iter().find_map(|line| DECIMAL_NUMBER.find(line)) {
            return format!("{}kg", m.as_str());
        }
    }

    // No bare unit suffix: either a figure was found or the field is empty.
    String::new()
}

fn holds_instruction(block: &DocumentBlock) -> bool {
    block
        .lines
        .iter()
        .any(|line| HandlingInstruction::match_line(line).is_some())
}

/// Package metadata printed between the sender header and the rest of the
/// sender address: dimension strings, weight figures, the weight unit line,
/// manifest tags.
fn is_package_metadata(block: &DocumentBlock) -> bool {
    block.lines.iter().any(|line| {
        DIMENSION.is_match(line)
            || line.contains(WEIGHT_UNIT)
            || DECIMAL_NUMBER.is_match(line)
            || line.to_uppercase().contains(MANIFEST_TOKEN)
    })
}
