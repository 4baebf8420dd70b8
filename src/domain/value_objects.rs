//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use std::collections::{BTreeMap, HashSet};

/// Locale used when the country's own code has no translated name.
pub const DEFAULT_LOCALE: &str = "en";

/// The single locale chosen for one response.
///
/// Derived from the country ISO code and reused for both the country and
/// the city name, so a response never mixes languages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Pick the locale for a record.
    ///
    /// The lowercased ISO code wins when the country names contain it,
    /// otherwise [`DEFAULT_LOCALE`] is used.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeMap;
    /// use ipinfo::domain::value_objects::Locale;
    ///
    /// let mut names = BTreeMap::new();
    /// names.insert("en".to_string(), "Sweden".to_string());
    /// assert_eq!(Locale::resolve("SE", &names).as_str(), "en");
    ///
    /// names.insert("se".to_string(), "Sverige".to_string());
    /// assert_eq!(Locale::resolve("SE", &names).as_str(), "se");
    /// ```
    pub fn resolve(country_iso_code: &str, country_names: &BTreeMap<String, String>) -> Self {
        let code = country_iso_code.to_lowercase();
        if country_names.contains_key(&code) {
            Self(code)
        } else {
            Self(DEFAULT_LOCALE.to_string())
        }
    }

    /// Name for this locale, or an empty string when it is not translated.
    pub fn pick<'a>(&self, names: &'a BTreeMap<String, String>) -> &'a str {
        names.get(&self.0).map(String::as_str).unwrap_or("")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(DEFAULT_LOCALE.to_string())
    }
}

/// Header names excluded from filtered request output.
///
/// Built once from configuration; names are stored uppercase and matched
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    names: HashSet<String>,
}

impl IgnoreSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_uppercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Whether `name` is ignored, regardless of its case.
    pub fn contains(&self, name: &str) -> bool {
        !self.names.is_empty() && self.names.contains(&name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
