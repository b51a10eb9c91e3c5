use super::{CountryResolver, OTHER_COUNTRY};

/// Prefix table from the campaign operations team, in priority order: the
/// first matching prefix wins. `201` covers Egyptian mobile numbers written
/// internationally (country code 20 followed by carrier prefix 1x).
const PREFIX_TABLE: &[(&str, &str)] = &[
    ("971", "UAE"),
    ("201", "Egypt"),
    ("973", "Bahrain"),
    ("964", "Iraq"),
    ("974", "Qatar"),
    ("965", "Kuwait"),
    ("968", "Oman"),
];

pub struct GulfPrefixResolver;

impl CountryResolver for GulfPrefixResolver {
    fn name(&self) -> &'static str {
        "gulf_prefix"
    }

    fn resolve(&self, identifier: &str) -> &'static str {
        let digits = identifier.trim();
        for &(prefix, country) in PREFIX_TABLE {
            if digits.starts_with(prefix) {
                return country;
            }
        }
        OTHER_COUNTRY
    }
}
