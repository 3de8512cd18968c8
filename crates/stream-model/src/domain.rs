//! Enumerated option domains.

/// An option whose value must come from a fixed, named set.
///
/// `VARIANTS` pairs each accepted spelling with its value.
pub trait OptionDomain: Sized + Copy + PartialEq + 'static {
    const VARIANTS: &'static [(&'static str, Self)];

    /// Look up a value by name, ignoring ASCII case and surrounding whitespace.
    fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::VARIANTS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }

    /// Human-readable list of accepted names, for error messages.
    fn allowed() -> String {
        Self::VARIANTS
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
