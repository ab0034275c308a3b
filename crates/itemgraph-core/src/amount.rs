//! Lenient numeric values.
//!
//! Quantities, prices and counts arrive from scraped pages. Most are plain
//! integers, but some come through as strings ("1,500", "x2", "3/3"). A value
//! that reads as a non-negative integer becomes [`Amount::Count`]; anything
//! else is kept verbatim as [`Amount::Text`] instead of being rejected.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// An integer count, or the raw text it could not be parsed from.
///
/// Serializes untagged: `2` or `"x2"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Count(u64),
    Text(String),
}

impl Amount {
    /// Parses a textual value, degrading to [`Amount::Text`] on failure.
    ///
    /// Surrounding whitespace and thousands separators are ignored.
    pub fn parse(raw: &str) -> Self {
        let digits: String = raw.trim().chars().filter(|c| *c != ',').collect();
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = digits.parse::<u64>() {
                return Amount::Count(n);
            }
        }
        Amount::Text(raw.to_string())
    }

    /// True if the value was kept as raw text.
    pub fn is_text(&self) -> bool {
        matches!(self, Amount::Text(_))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Count(n) => write!(f, "{}", n),
            Amount::Text(s) => write!(f, "{}", s),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Unsigned(u64),
            Signed(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Unsigned(n) => Amount::Count(n),
            Raw::Signed(n) => Amount::Text(n.to_string()),
            Raw::Float(x) if x.fract() == 0.0 && (0.0..u64::MAX as f64).contains(&x) => {
                Amount::Count(x as u64)
            }
            Raw::Float(x) => Amount::Text(x.to_string()),
            Raw::Text(s) => Amount::parse(&s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(Amount::parse("25"), Amount::Count(25));
        assert_eq!(Amount::parse(" 7 "), Amount::Count(7));
    }

    #[test]
    fn test_parse_thousands_separator() {
        assert_eq!(Amount::parse("1,500"), Amount::Count(1500));
    }

    #[test]
    fn test_parse_keeps_unparseable_text() {
        assert_eq!(Amount::parse("x2"), Amount::Text("x2".to_string()));
        assert_eq!(Amount::parse("3/3"), Amount::Text("3/3".to_string()));
        assert_eq!(Amount::parse(""), Amount::Text(String::new()));
        assert!(Amount::parse("-4").is_text());
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let values: Vec<Amount> =
            serde_json::from_str(r#"[3, "12", "x10", 4.0, 2.5, -1]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Amount::Count(3),
                Amount::Count(12),
                Amount::Text("x10".to_string()),
                Amount::Count(4),
                Amount::Text("2.5".to_string()),
                Amount::Text("-1".to_string()),
            ]
        );
    }

    #[test]
    fn test_large_whole_float_matches_integer() {
        let float: Amount = serde_json::from_str("5000000000.0").unwrap();
        let integer: Amount = serde_json::from_str("5000000000").unwrap();
        assert_eq!(float, Amount::Count(5_000_000_000));
        assert_eq!(float, integer);

        let huge: Amount = serde_json::from_str("1e30").unwrap();
        assert!(huge.is_text());
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&vec![Amount::Count(500), Amount::parse("3/3")]).unwrap();
        assert_eq!(json, r#"[500,"3/3"]"#);
    }
}
