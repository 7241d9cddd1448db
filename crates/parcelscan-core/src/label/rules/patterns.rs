//! Regex patterns and fixed tokens for the supported label layout.

use lazy_static::lazy_static;
use regex::Regex;

/// Unit token marking the weight header line. Printed uppercase on the
/// label; matched case-sensitively so street names like "Kingsway" never
/// trip it.
pub const WEIGHT_UNIT: &str = "KG";

/// Token marking manifest metadata blocks interleaved with the sender
/// address. Matched case-insensitively.
pub const MANIFEST_TOKEN: &str = "MANIFEST";

lazy_static! {
    /// Canadian postal-code shape: letter, digit, letter, optional space or
    /// hyphen, digit, letter, digit. The letter O is accepted wherever a
    /// digit belongs, since recognizers routinely read 0 as O on label
    /// stock. The tolerance is match-only; the extracted text keeps
    /// whatever characters were recognized.
    pub static ref POSTAL_CODE: Regex =
        Regex::new(r"[A-Za-z][0-9Oo][A-Za-z][ -]?[0-9Oo][A-Za-z][0-9Oo]").unwrap();

    /// Tracking PIN: four groups of four digits separated by single spaces.
    pub static ref TRACK_PIN: Regex = Regex::new(r"\d{4} \d{4} \d{4} \d{4}").unwrap();

    /// Package dimensions: LxWxH with optional decimals and an optional
    /// "cm" suffix, e.g. "23x18x11 cm".
    pub static ref DIMENSION: Regex =
        Regex::new(r"\d+(\.\d+)?x\d+(\.\d+)?x\d+(\.\d+)?( ?cm)?").unwrap();

    /// Bilingual destination header: "TO" followed by "À", with any run of
    /// punctuation or whitespace between the two tokens.
    pub static ref TO_HEADER: Regex = Regex::new(r"(?i)\bTO\b[^\p{L}\p{N}]*À").unwrap();

    /// Bilingual sender header: "FROM" followed by "DE".
    pub static ref FROM_HEADER: Regex = Regex::new(r"(?i)\bFROM\b[^\p{L}\p{N}]*DE\b").unwrap();

    /// Bilingual reference header: "Ref" followed by "Réf", accent optional
    /// on both sides since it is frequently lost in recognition.
    pub static ref REF_HEADER: Regex =
        Regex::new(r"(?i)\bR[ée]f\b[^\p{L}\p{N}]*R[ée]f\b").unwrap();

    /// A decimal number, the shape weight figures take on the label.
    pub static ref DECIMAL_NUMBER: Regex = Regex::new(r"\d+\.\d+").unwrap();
}
