//! Handling-instruction vocabulary.

/// The closed set of handling instructions printed beneath the destination
/// address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlingInstruction {
    Signature,
    AdultSignature18,
    AdultSignature19,
    AdultSignature21,
    CardForPickup,
    DeliverToPo,
    LeaveAtDoor,
    DoNotSafeDrop,
}

impl HandlingInstruction {
    /// All vocabulary entries.
    pub const ALL: [HandlingInstruction; 8] = [
        HandlingInstruction::Signature,
        HandlingInstruction::AdultSignature18,
        HandlingInstruction::AdultSignature19,
        HandlingInstruction::AdultSignature21,
        HandlingInstruction::CardForPickup,
        HandlingInstruction::DeliverToPo,
        HandlingInstruction::LeaveAtDoor,
        HandlingInstruction::DoNotSafeDrop,
    ];

    /// The instruction exactly as printed on the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlingInstruction::Signature => "SIGNATURE",
            HandlingInstruction::AdultSignature18 => "18+ SIGNATURE",
            HandlingInstruction::AdultSignature19 => "19+ SIGNATURE",
            HandlingInstruction::AdultSignature21 => "21+ SIGNATURE",
            HandlingInstruction::CardForPickup => "CARD FOR PICKUP",
            HandlingInstruction::DeliverToPo => "DELIVER TO PO",
            HandlingInstruction::LeaveAtDoor => "LEAVE AT DOOR",
            HandlingInstruction::DoNotSafeDrop => "DO NOT SAFE DROP",
        }
    }

    /// Match a whole line against the vocabulary, ignoring case and
    /// surrounding whitespace. Whole-line equality, not containment; an
    /// address line mentioning a signature is not an instruction.
    pub fn match_line(line: &str) -> Option<HandlingInstruction> {
        let trimmed = line.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|i| trimmed.eq_ignore_ascii_case(i.as_str()))
    }
}

impl std::fmt::Display for HandlingInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
