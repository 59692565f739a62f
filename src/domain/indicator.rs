use serde::{Deserialize, Serialize};

/// Identity of one series in the warehouse extract, e.g. "german_interest"
/// for a macro indicator or "TELCO_MEAN_CAP" for an entity aggregate.
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct IndicatorId {
    pub name: String,
}

impl IndicatorId {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    // Finds the measure suffix at the end of the indicator name and returns it.
    // Returns None if no known suffix matches.
    pub fn get_measure(text: &str) -> Option<&str> {
        static MEASURE_SUFFIXES: &[&str] = &["_interest", "_cpi", "_breakeven", "_mean_cap"];
        MEASURE_SUFFIXES
            .iter()
            .find(|&&suffix| text.ends_with(suffix))
            .copied()
    }

    pub fn get_region(text: &str) -> Option<&str> {
        let measure = Self::get_measure(text)?;
        // `strip_suffix` returns `None` if the suffix is not at the end,
        // which cannot happen here since get_measure already matched it.
        text.strip_suffix(measure)
    }

    /// Split an indicator name into its (region, measure) parts, e.g.
    /// "german_interest" -> ("german", "_interest").
    pub fn split_name(name: &str) -> (&str, &str) {
        match (Self::get_region(name), Self::get_measure(name)) {
            (Some(region), Some(measure)) => (region, measure),
            _ => (name, ""),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Which side of the pairwise scan a series belongs to: reference series
/// are the macro indicators, target series the per-entity aggregates.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum SeriesGroup {
    Reference,
    Target,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_known_suffix() {
        assert_eq!(
            IndicatorId::split_name("german_interest"),
            ("german", "_interest")
        );
    }

    #[test]
    fn test_split_unknown_suffix_returns_whole_name() {
        assert_eq!(IndicatorId::split_name("wilshire5000"), ("wilshire5000", ""));
    }

    #[test]
    fn test_series_group_round_trips_through_strings() {
        use std::str::FromStr;
        assert_eq!(SeriesGroup::Reference.to_string(), "Reference");
        assert_eq!(
            SeriesGroup::from_str("Target").unwrap(),
            SeriesGroup::Target
        );
    }
}
