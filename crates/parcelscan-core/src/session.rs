//! Per-capture orchestration state.
//!
//! Text recognition and barcode recognition run as independent asynchronous
//! operations against their providers, while the extraction engine itself
//! is synchronous and pure. These types carry the small amount of state the
//! surrounding event-driven pipeline needs: joining the two results for one
//! image, dropping preview frames while a recognition is still in flight,
//! and spotting the postal-code hint that promotes live preview to full
//! capture.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::document::{Document, RecognizedBlock};
use crate::label::rules::patterns::POSTAL_CODE;
use crate::label::{LabelParser, ScanResult};

/// Join point for the two recognition results of one finalized capture.
///
/// Either result may arrive first; [`ScanSession::assemble`] produces a
/// scan only once both are in. Abandoning a capture is a [`reset`]; results
/// that arrive for an abandoned capture land in a fresh session and are
/// never combined with stale ones.
///
/// [`reset`]: ScanSession::reset
#[derive(Debug, Default)]
pub struct ScanSession {
    document: Option<Document>,
    barcode: Option<String>,
}

impl ScanSession {
    /// Start a fresh session for one capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the normalized text-recognition result.
    pub fn text_ready(&mut self, document: Document) {
        debug!("Text recognition ready ({} blocks)", document.len());
        self.document = Some(document);
    }

    /// Record a barcode payload. Repeated calls overwrite: when the
    /// provider reports several barcodes for one image, the last one wins.
    pub fn barcode_ready(&mut self, value: impl Into<String>) {
        self.barcode = Some(value.into());
    }

    /// Whether both recognition results have arrived.
    pub fn is_complete(&self) -> bool {
        self.document.is_some() && self.barcode.is_some()
    }

    /// Run the parser once both results are in; `None` while either is
    /// still outstanding.
    pub fn assemble(&self, parser: &dyn LabelParser) -> Option<ScanResult> {
        let document = self.document.as_ref()?;
        let barcode = self.barcode.as_deref()?;
        Some(parser.parse(document, barcode))
    }

    /// Abandon the capture, discarding any result already received.
    pub fn reset(&mut self) {
        debug!("Scan session reset");
        self.document = None;
        self.barcode = None;
    }
}

/// Single-slot guard keeping at most one preview recognition in flight.
///
/// A frame arriving while the slot is taken is dropped, not queued; the
/// camera will deliver a fresher one by the time the slot frees up.
#[derive(Debug, Default)]
pub struct RecognitionGate {
    in_flight: AtomicBool,
}

impl RecognitionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot. Returns `false` when a recognition is already in
    /// flight, in which case the caller drops its frame.
    pub fn try_begin(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Release the slot once the recognition completed or failed.
    pub fn finish(&self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

/// Whether `text` carries a postal-code-shaped substring.
pub fn contains_postal_code(text: &str) -> bool {
    POSTAL_CODE.is_match(text)
}

/// Live-preview trigger: whether any block of a preview frame carries a
/// postal-code-shaped substring. Each block is tested on its own joined
/// text; the pattern never matches across a line break, so a code split
/// over two lines does not trigger capture.
pub fn frame_has_postal_code(blocks: &[RecognizedBlock]) -> bool {
    blocks.iter().any(|block| {
        let text = block
            .lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        contains_postal_code(&text)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RecognizedLine;
    use crate::label::LabelScanner;
    use pretty_assertions::assert_eq;

    fn postal_block() -> RecognizedBlock {
        RecognizedBlock {
            top: 0.0,
            lines: vec![RecognizedLine {
                text: "Laval, QC, H7W 4H4".to_string(),
                top: 0.0,
            }],
        }
    }

    #[test]
    fn test_assemble_requires_both_results() {
        let scanner = LabelScanner::new();
        let mut session = ScanSession::new();

        assert!(session.assemble(&scanner).is_none());

        session.text_ready(Document::normalize(vec![postal_block()]));
        assert!(!session.is_complete());
        assert!(session.assemble(&scanner).is_none());

        session.barcode_ready("PHWH7447023210235282270000200");
        assert!(session.is_complete());

        let result = session.assemble(&scanner).unwrap();
        assert_eq!(result.record.bar_code, "PHWH7447023210235282270000200");
        assert_eq!(result.record.dest_postal_code, "H7W 4H4");
    }

    #[test]
    fn test_assemble_order_does_not_matter() {
        let scanner = LabelScanner::new();
        let mut session = ScanSession::new();

        session.barcode_ready("1234567");
        assert!(session.assemble(&scanner).is_none());

        session.text_ready(Document::normalize(vec![postal_block()]));
        let result = session.assemble(&scanner).unwrap();
        assert_eq!(result.record.bar_code, "1234567");
    }

    #[test]
    fn test_last_barcode_wins() {
        let scanner = LabelScanner::new();
        let mut session = ScanSession::new();

        session.text_ready(Document::default());
        session.barcode_ready("first scan");
        session.barcode_ready("second scan");

        let result = session.assemble(&scanner).unwrap();
        assert_eq!(result.record.bar_code, "second scan");
    }

    #[test]
    fn test_reset_discards_partial_results() {
        let scanner = LabelScanner::new();
        let mut session = ScanSession::new();

        session.text_ready(Document::default());
        session.reset();

        session.barcode_ready("1234567");
        assert!(!session.is_complete());
        assert!(session.assemble(&scanner).is_none());
    }

    #[test]
    fn test_gate_admits_one_recognition_at_a_time() {
        let gate = RecognitionGate::new();

        assert!(gate.try_begin());
        assert!(!gate.try_begin());

        gate.finish();
        assert!(gate.try_begin());
    }

    #[test]
    fn test_frame_trigger_on_postal_code() {
        assert!(frame_has_postal_code(&[postal_block()]));
        assert!(!frame_has_postal_code(&[]));
        assert!(!frame_has_postal_code(&[RecognizedBlock {
            top: 0.0,
            lines: vec![RecognizedLine {
                text: "no code here".to_string(),
                top: 0.0,
            }],
        }]));
    }

    #[test]
    fn test_frame_trigger_ignores_code_split_across_lines() {
        let block = RecognizedBlock {
            top: 0.0,
            lines: vec![
                RecognizedLine {
                    text: "H7W".to_string(),
                    top: 0.0,
                },
                RecognizedLine {
                    text: "4H4".to_string(),
                    top: 10.0,
                },
            ],
        };

        assert!(!frame_has_postal_code(&[block]));
    }
}
