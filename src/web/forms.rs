//! `application/x-www-form-urlencoded` bodies.
//!
//! Parsed by hand rather than through `Form<T>` because fields repeat
//! (`qualifikationen`) and numeric fields must tolerate junk input.

use axum::body::Bytes;
use std::str::FromStr;

#[derive(Debug, Default, Clone)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    #[must_use]
    pub fn parse(body: &[u8]) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// First value for `key`, untrimmed.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `key`, trimmed; empty if absent.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(str::trim).unwrap_or_default().to_string()
    }

    /// Every value for a repeated `key`, in submission order.
    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parses `key` as a number, falling back when it is missing or malformed.
    pub fn number_or<T: FromStr>(&self, key: &str, fallback: T) -> T {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(fallback)
    }
}

impl From<Bytes> for FormData {
    fn from(body: Bytes) -> Self {
        Self::parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keys() {
        let form = FormData::parse(b"name=+Anna+&qualifikationen=TM&qualifikationen=AGT");
        assert_eq!(form.text("name"), "Anna");
        assert_eq!(form.all("qualifikationen").collect::<Vec<_>>(), ["TM", "AGT"]);
        assert_eq!(form.all("missing").count(), 0);
    }

    #[test]
    fn test_number_fallback() {
        let form = FormData::parse(b"besatzung=abc&min_agt=+4&min_gf=");
        assert_eq!(form.number_or("besatzung", 0u32), 0);
        assert_eq!(form.number_or("min_agt", 2u32), 4);
        assert_eq!(form.number_or("min_gf", 1u32), 1);
        assert_eq!(form.number_or("absent", 7u32), 7);
        assert_eq!(form.number_or("besatzung", 5u32), 5);
    }

    #[test]
    fn test_percent_decoding() {
        let form = FormData::parse(b"funk=Florian%20Schwedt%201%2F46%2F1&name=K%C3%B6nig");
        assert_eq!(form.text("funk"), "Florian Schwedt 1/46/1");
        assert_eq!(form.text("name"), "König");
    }
}
