/// Whether a license string and a blacklist entry match.
///
/// Either string containing the other counts as a match. Case-sensitive, no
/// normalization, and composite `AND`/`OR` expressions are matched as plain
/// text.
// TODO: evaluate "OR" expressions so "MIT OR GPL-2.0" is only flagged when no alternative is allowed
pub fn license_matches(license: &str, entry: &str) -> bool {
    license.contains(entry) || entry.contains(license)
}

/// Ordered list of forbidden license substrings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blacklist {
    entries: Vec<String>,
}

impl Blacklist {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Every blacklist entry the license string matches, in blacklist order.
    pub fn matches<'a>(&'a self, license: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(move |entry| license_matches(license, entry))
    }
}
