//! Request locale.
//!
//! The locale is resolved once per request from `Accept-Language` and carried
//! explicitly in the request context rather than through a global.

use std::fmt;

use crate::validation::validate_language_code;

/// A lowercase language tag known to be well-formed (`en`, `uz`, `pt-br`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    /// Parse a tag, normalising case and `_` separators. Returns `None` for
    /// anything that is not a plausible language tag.
    pub fn parse(tag: &str) -> Option<Self> {
        let normalised = tag.trim().replace('_', "-").to_ascii_lowercase();
        validate_language_code(&normalised).ok()?;
        Some(Self(normalised))
    }

    /// Pick the highest-weighted usable tag from an `Accept-Language` value.
    ///
    /// Wildcards, malformed tags and entries whose `q` is not a number in
    /// `0..=1` are skipped. Among equal weights the first listed wins.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        let mut best: Option<(f32, Locale)> = None;

        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let tag = parts.next().unwrap_or_default().trim();
            if tag.is_empty() || tag == "*" {
                continue;
            }

            let weight = match parts.find_map(|p| p.trim().strip_prefix("q=")) {
                None => 1.0,
                Some(q) => match q.trim().parse::<f32>() {
                    Ok(q) if (0.0..=1.0).contains(&q) => q,
                    _ => continue,
                },
            };
            if weight <= 0.0 {
                continue;
            }

            let Some(locale) = Locale::parse(tag) else {
                continue;
            };

            match &best {
                Some((w, _)) if *w >= weight => {}
                _ => best = Some((weight, locale)),
            }
        }

        best.map(|(_, locale)| locale)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalises() {
        assert_eq!(Locale::parse(" pt_BR ").unwrap().as_str(), "pt-br");
        assert_eq!(Locale::parse("EN").unwrap().as_str(), "en");
        assert!(Locale::parse("not a tag").is_none());
    }

    #[test]
    fn highest_weight_wins() {
        let locale = Locale::from_accept_language("en;q=0.5, uz, ru;q=0.8").unwrap();
        assert_eq!(locale.as_str(), "uz");
    }

    #[test]
    fn first_wins_on_ties() {
        let locale = Locale::from_accept_language("ru, en").unwrap();
        assert_eq!(locale.as_str(), "ru");
    }

    #[test]
    fn wildcards_zero_weights_and_garbage_are_skipped() {
        assert!(Locale::from_accept_language("*, en;q=0").is_none());
        assert_eq!(
            Locale::from_accept_language("!!, *, de;q=0.1").unwrap().as_str(),
            "de"
        );
        assert!(Locale::from_accept_language("").is_none());
    }

    #[test]
    fn unparseable_weight_does_not_outrank() {
        let locale = Locale::from_accept_language("en;q=abc, uz;q=0.9").unwrap();
        assert_eq!(locale.as_str(), "uz");
        assert_eq!(
            Locale::from_accept_language("ru;q=2, de;q=nan, fr;q=0.2").unwrap().as_str(),
            "fr"
        );
        assert!(Locale::from_accept_language("en;q=").is_none());
    }
}
