//! Job key: the 8-character Base62 identifier of a monitored job.

use crate::error::ValidationError;
use std::fmt;
use std::str::FromStr;

const JOB_KEY_LEN: usize = 8;

/// A validated job key. Can only be obtained through [`JobKey::parse`], so any
/// value of this type is known to be well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobKey(String);

impl JobKey {
    /// Validate `key` as exactly 8 ASCII alphanumeric characters.
    pub fn parse(key: &str) -> Result<Self, ValidationError> {
        if key.len() == JOB_KEY_LEN && key.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(Self(key.to_string()))
        } else {
            Err(ValidationError::JobKey)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for JobKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for JobKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_eight_alphanumerics() {
        for key in ["abc123de", "ABCDEFGH", "00000000", "aZ9bY8cX"] {
            let parsed = JobKey::parse(key).unwrap();
            assert_eq!(parsed.as_str(), key);
        }
    }

    #[test]
    fn rejects_wrong_length() {
        for key in ["", "abc123d", "abc123def", "invalid-key"] {
            assert_eq!(JobKey::parse(key), Err(ValidationError::JobKey), "{key:?}");
        }
    }

    #[test]
    fn rejects_non_alphanumeric() {
        for key in ["abc-23de", "abc 23de", "abc_23de", "abc123d!"] {
            assert_eq!(JobKey::parse(key), Err(ValidationError::JobKey), "{key:?}");
        }
    }

    #[test]
    fn rejects_multibyte_even_with_eight_chars() {
        // 8 chars but not ASCII.
        assert!(JobKey::parse("abc123dé").is_err());
        assert!(JobKey::parse("ａｂｃ１２３ｄｅ").is_err());
    }

    #[test]
    fn from_str_matches_parse() {
        let key: JobKey = "abc123de".parse().unwrap();
        assert_eq!(key.to_string(), "abc123de");
        assert!("nope".parse::<JobKey>().is_err());
    }
}
