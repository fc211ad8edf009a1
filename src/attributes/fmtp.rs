use crate::errors::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// `a=fmtp:<payload type> <config>`. `config` is kept raw here; the ST 2110
/// typers (`crate::st2110`) run it through [`FmtpParams::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fmtp {
    pub payload_type: u8,
    pub config: String,
}

impl FromStr for Fmtp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (pt, config) = s
            .split_once(' ')
            .ok_or_else(|| Error::malformed_compound("fmtp", s))?;
        let payload_type = pt
            .parse::<u8>()
            .map_err(|_| Error::malformed_compound("fmtp", s))?;
        Ok(Fmtp {
            payload_type,
            config: config.to_string(),
        })
    }
}

impl fmt::Display for Fmtp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a=fmtp:{} {}", self.payload_type, self.config)
    }
}

/// A single `key=value` token from an fmtp `config` string. The raw text
/// is always kept, and a numeric coercion is attempted alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct FmtpToken {
    pub raw: String,
    pub numeric: Option<f64>,
}

impl FmtpToken {
    fn new(raw: &str) -> Self {
        FmtpToken {
            raw: raw.to_string(),
            numeric: raw.parse::<f64>().ok(),
        }
    }
}

/// The fmtp mini-parser's output: a string-keyed map of tokens. Keys are
/// case-sensitive, matching the SMPTE convention (`sampling` vs `PM` vs `TP`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FmtpParams(BTreeMap<String, FmtpToken>);

impl FmtpParams {
    /// Splits `config` on `;`, trims whitespace around each `key=value`
    /// pair, and records both the raw and (attempted) numeric form of the
    /// value. A bare token with no `=` is recorded with an empty value.
    pub fn parse(config: &str) -> Self {
        let mut map = BTreeMap::new();
        for entry in config.split(';') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (key, value) = entry.split_once('=').unwrap_or((entry, ""));
            map.insert(key.trim().to_string(), FmtpToken::new(value.trim()));
        }
        FmtpParams(map)
    }

    pub fn get(&self, key: &str) -> Option<&FmtpToken> {
        self.0.get(key)
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|t| t.raw.as_str())
    }

    pub fn require(&self, key: &str, context: &str) -> Result<&FmtpToken> {
        self.0
            .get(key)
            .ok_or_else(|| Error::missing(key, context))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims_pairs() {
        let params = FmtpParams::parse(" sampling=YCbCr-4:2:2; width=1920 ; height = 1080;");
        assert_eq!(params.raw("sampling"), Some("YCbCr-4:2:2"));
        assert_eq!(params.raw("width"), Some("1920"));
        assert_eq!(params.raw("height"), Some("1080"));
    }

    #[test]
    fn coerces_numeric_values() {
        let params = FmtpParams::parse("depth=10;exactframerate=50");
        assert_eq!(params.get("depth").unwrap().numeric, Some(10.0));
        assert_eq!(params.get("exactframerate").unwrap().numeric, Some(50.0));
    }

    #[test]
    fn keeps_non_numeric_raw_without_numeric_form() {
        let params = FmtpParams::parse("colorimetry=BT709");
        let token = params.get("colorimetry").unwrap();
        assert_eq!(token.raw, "BT709");
        assert_eq!(token.numeric, None);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let params = FmtpParams::parse("PM=2110GPM;pm=lowercase");
        assert_eq!(params.raw("PM"), Some("2110GPM"));
        assert_eq!(params.raw("pm"), Some("lowercase"));
    }
}
