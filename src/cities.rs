//! Fixed table of cities the bot can serve.
//!
//! Adding a city is a data entry here, not a new dispatch branch.

/// One selectable city. The set is fixed at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    /// Exact text a user must send to select this city.
    pub display_name: &'static str,
    /// Canonical name sent to the weather provider. Equal to the display
    /// name today; reserved for transliteration.
    pub query_name: &'static str,
    /// Static editorial remark appended to every forecast reply.
    pub remark: &'static str,
}

/// Cities offered on the reply keyboard, in button order.
pub const CITIES: &[City] = &[
    City {
        display_name: "Москва",
        query_name: "Москва",
        remark: "Москва ждёт вас с распростёртыми объятиями! 🏙️",
    },
    City {
        display_name: "Пушкино",
        query_name: "Пушкино",
        remark: "Пушкино - прекрасный уголок, наполненный уютом ❤️",
    },
    City {
        display_name: "Донецк",
        query_name: "Донецк",
        remark: "В Донецке солнечно и тепло в сердце 🌞",
    },
];

/// Exact-match lookup by display name. Case- and whitespace-sensitive.
#[must_use]
pub fn find(text: &str) -> Option<&'static City> {
    CITIES.iter().find(|city| city.display_name == text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn display_names_are_unique() {
        let names: HashSet<_> = CITIES.iter().map(|city| city.display_name).collect();
        assert_eq!(names.len(), CITIES.len());
    }

    #[test]
    fn find_is_exact_match_only() {
        assert!(find("Москва").is_some());
        assert!(find("москва").is_none());
        assert!(find("Москва ").is_none());
        assert!(find("Моск").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn every_city_has_a_remark() {
        for city in CITIES {
            assert!(!city.remark.is_empty(), "{} has no remark", city.display_name);
        }
    }
}
