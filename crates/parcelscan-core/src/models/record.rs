//! The structured label record.

use serde::{Deserialize, Serialize};

/// External field names, in the record's canonical order. These are the
/// names downstream consumers key on; renaming one is a breaking change.
pub const FIELD_PRODUCT_TYPE: &str = "productType";
pub const FIELD_TO_ADDRESS: &str = "toAddress";
pub const FIELD_DEST_POSTAL_CODE: &str = "destPostalCode";
pub const FIELD_TRACK_PIN: &str = "trackPin";
pub const FIELD_BAR_CODE: &str = "barCode";
pub const FIELD_FROM_ADDRESS: &str = "fromAddress";
pub const FIELD_PRODUCT_DIMENSION: &str = "productDimension";
pub const FIELD_PRODUCT_WEIGHT: &str = "productWeight";
pub const FIELD_PRODUCT_INSTRUCTION: &str = "productInstruction";
pub const FIELD_REFERENCE: &str = "reference";

/// The ten fields read off one shipping label.
///
/// Fields that could not be extracted hold empty strings; whether the
/// record is usable anyway is the validator's call, not the extractor's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelRecord {
    /// Service type, e.g. "Xpresspost".
    pub product_type: String,
    /// Destination address, fragments joined with ", ".
    pub to_address: String,
    /// Destination postal code.
    pub dest_postal_code: String,
    /// Tracking PIN, e.g. "1234 5678 9012 3456".
    pub track_pin: String,
    /// Barcode payload from the barcode provider, carried through verbatim.
    pub bar_code: String,
    /// Sender address, fragments joined with ", ".
    pub from_address: String,
    /// Package dimensions, e.g. "23x18x11 cm".
    pub product_dimension: String,
    /// Package weight with unit suffix, e.g. "1.588kg".
    pub product_weight: String,
    /// Handling instruction in canonical form, e.g. "LEAVE AT DOOR".
    pub product_instruction: String,
    /// Sender reference, e.g. an order number.
    pub reference: String,
}

impl LabelRecord {
    /// Field name/value pairs in canonical order.
    pub fn fields(&self) -> [(&'static str, &str); 10] {
        [
            (FIELD_PRODUCT_TYPE, self.product_type.as_str()),
            (FIELD_TO_ADDRESS, self.to_address.as_str()),
            (FIELD_DEST_POSTAL_CODE, self.dest_postal_code.as_str()),
            (FIELD_TRACK_PIN, self.track_pin.as_str()),
            (FIELD_BAR_CODE, self.bar_code.as_str()),
            (FIELD_FROM_ADDRESS, self.from_address.as_str()),
            (FIELD_PRODUCT_DIMENSION, self.product_dimension.as_str()),
            (FIELD_PRODUCT_WEIGHT, self.product_weight.as_str()),
            (FIELD_PRODUCT_INSTRUCTION, self.product_instruction.as_str()),
            (FIELD_REFERENCE, self.reference.as_str()),
        ]
    }

    /// Render the record in its field-per-line "name: value" text form.
    pub fn to_display_text(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.fields() {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}
