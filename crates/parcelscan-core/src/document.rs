//! Recognized-text input shapes and the normalized document.
//!
//! The text-recognition provider reports blocks in no guaranteed order, and
//! lines inside a block arrive unordered too. Everything downstream wants a
//! stable top-to-bottom reading of the label, so [`Document::normalize`] is
//! the single place that ordering happens.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScanError};

/// One recognized text line with the top coordinate of its bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedLine {
    /// Recognized text content.
    pub text: String,
    /// Top edge of the line's bounding box, in image coordinates.
    pub top: f32,
}

/// One recognized text block as segmented by the recognition provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedBlock {
    /// Top edge of the block's bounding box. Independent of the line
    /// coordinates; block order is decided by this value alone.
    pub top: f32,
    /// Recognized lines, in whatever order the provider produced them.
    pub lines: Vec<RecognizedLine>,
}

/// The two recognition results for one finalized capture, as serialized by
/// the capture pipeline.
///
/// `barcode` is absent when the barcode provider recognized nothing. That
/// is not a failure; it becomes an empty field and the validator reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureSnapshot {
    /// Text blocks from the text-recognition provider.
    pub blocks: Vec<RecognizedBlock>,
    /// Barcode payload from the barcode provider, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

impl CaptureSnapshot {
    /// Decode a snapshot from its JSON form.
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| ScanError::Snapshot(e.to_string()))
    }

    /// Encode the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScanError::Snapshot(e.to_string()))
    }

    /// The recognized barcode payload, or an empty string when the barcode
    /// provider reported nothing.
    pub fn barcode_value(&self) -> &str {
        self.barcode.as_deref().unwrap_or("")
    }
}

/// One block of the normalized document: its line texts in vertical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentBlock {
    /// Line texts, top to bottom.
    pub lines: Vec<String>,
}

impl DocumentBlock {
    /// Whether the block holds exactly one line.
    pub fn is_single_line(&self) -> bool {
        self.lines.len() == 1
    }
}

/// The vertically ordered document produced from one recognition pass.
///
/// Built once per capture and only ever borrowed afterwards; the field
/// locator and extractors read it, nothing mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Blocks in vertical order.
    pub blocks: Vec<DocumentBlock>,
}

impl Document {
    /// Order raw recognition output into a stable top-to-bottom document.
    ///
    /// Blocks sort by their own top coordinate and each block's lines by
    /// theirs. Both sorts are stable, so blocks with equal tops keep the
    /// provider's relative order and repeated runs over the same input
    /// yield the same document.
    pub fn normalize(mut blocks: Vec<RecognizedBlock>) -> Self {
        blocks.sort_by(|a, b| a.top.partial_cmp(&b.top).unwrap_or(Ordering::Equal));

        let blocks: Vec<DocumentBlock> = blocks
            .into_iter()
            .map(|mut block| {
                block
                    .lines
                    .sort_by(|a, b| a.top.partial_cmp(&b.top).unwrap_or(Ordering::Equal));
                DocumentBlock {
                    lines: block.lines.into_iter().map(|line| line.text).collect(),
                }
            })
            .collect();

        debug!("Normalized document with {} blocks", blocks.len());

        Document { blocks }
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when the recognition pass produced no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The block at `index`, if in range.
    pub fn block(&self, index: usize) -> Option<&DocumentBlock> {
        self.blocks.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(text: &str, top: f32) -> RecognizedLine {
        RecognizedLine {
            text: text.to_string(),
            top,
        }
    }

    #[test]
    fn test_normalize_orders_blocks_by_top() {
        let blocks = vec![
            RecognizedBlock {
                top: 300.0,
                lines: vec![line("bottom", 300.0)],
            },
            RecognizedBlock {
                top: 10.0,
                lines: vec![line("top", 10.0)],
            },
            RecognizedBlock {
                top: 120.0,
                lines: vec![line("middle", 120.0)],
            },
        ];

        let doc = Document::normalize(blocks);

        assert_eq!(doc.blocks[0].lines, vec!["top".to_string()]);
        assert_eq!(doc.blocks[1].lines, vec!["middle".to_string()]);
        assert_eq!(doc.blocks[2].lines, vec!["bottom".to_string()]);
    }

    #[test]
    fn test_normalize_orders_lines_within_block() {
        let blocks = vec![RecognizedBlock {
            top: 50.0,
            lines: vec![
                line("third", 90.0),
                line("first", 50.0),
                line("second", 70.0),
            ],
        }];

        let doc = Document::normalize(blocks);

        assert_eq!(
            doc.blocks[0].lines,
            vec![
                "first".to_string(),
                "second".to_string(),
                "third".to_string()
            ]
        );
    }

    #[test]
    fn test_normalize_is_stable_for_equal_tops() {
        let blocks = vec![
            RecognizedBlock {
                top: 40.0,
                lines: vec![line("seen first", 40.0)],
            },
            RecognizedBlock {
                top: 40.0,
                lines: vec![line("seen second", 40.0)],
            },
        ];

        let doc = Document::normalize(blocks);

        assert_eq!(doc.blocks[0].lines, vec!["seen first".to_string()]);
        assert_eq!(doc.blocks[1].lines, vec!["seen second".to_string()]);
    }

    #[test]
    fn test_normalize_empty_input() {
        let doc = Document::normalize(vec![]);
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_snapshot_from_json() {
        let data = r#"{
            "blocks": [
                {"top": 10.0, "lines": [{"text": "Xpresspost", "top": 10.0}]}
            ],
            "barcode": "PHWH7447023210235282270000200"
        }"#;

        let snapshot = CaptureSnapshot::from_json(data).unwrap();
        assert_eq!(snapshot.blocks.len(), 1);
        assert_eq!(snapshot.barcode_value(), "PHWH7447023210235282270000200");
    }

    #[test]
    fn test_snapshot_without_barcode() {
        let data = r#"{"blocks": []}"#;
        let snapshot = CaptureSnapshot::from_json(data).unwrap();
        assert_eq!(snapshot.barcode_value(), "");
    }

    #[test]
    fn test_snapshot_rejects_malformed_json() {
        let result = CaptureSnapshot::from_json("{not json");
        assert!(result.is_err());
    }
}
