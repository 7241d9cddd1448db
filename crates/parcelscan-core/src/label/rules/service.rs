//! Service-type vocabulary.

/// The closed set of service names printed on the supported label family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Priority,
    RegularParcel,
    Xpresspost,
    ExpeditedParcel,
}

impl ServiceType {
    /// All vocabulary entries. A label prints exactly one service name, so
    /// the order here is not a tie-break in practice.
    pub const ALL: [ServiceType; 4] = [
        ServiceType::Priority,
        ServiceType::RegularParcel,
        ServiceType::Xpresspost,
        ServiceType::ExpeditedParcel,
    ];

    /// The name exactly as printed on the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Priority => "Priority",
            ServiceType::RegularParcel => "Regular Parcel",
            ServiceType::Xpresspost => "Xpresspost",
            ServiceType::ExpeditedParcel => "Expedited Parcel",
        }
    }

    /// First vocabulary entry contained in `line`, if any. Case-sensitive;
    /// the label prints these names in mixed case exactly as listed.
    pub fn find_in(line: &str) -> Option<ServiceType> {
        Self::ALL.iter().copied().find(|s| line.contains(s.as_str()))
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_in_exact_name() {
        assert_eq!(ServiceType::find_in("Xpresspost"), Some(ServiceType::Xpresspost));
    }

    #[test]
    fn test_find_in_substring() {
        assert_eq!(
            ServiceType::find_in("Expedited Parcel / Colis accélérés"),
            Some(ServiceType::ExpeditedParcel)
        );
    }

    #[test]
    fn test_find_in_is_case_sensitive() {
        assert_eq!(ServiceType::find_in("XPRESSPOST"), None);
        assert_eq!(ServiceType::find_in("regular parcel"), None);
    }

    #[test]
    fn test_find_in_no_match() {
        assert_eq!(ServiceType::find_in("123 Main Street"), None);
    }

    #[test]
    fn test_display_matches_printed_name() {
        assert_eq!(ServiceType::RegularParcel.to_string(), "Regular Parcel");
    }
}
