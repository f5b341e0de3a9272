//! Record identity system using type-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Record type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordPrefix {
    /// Industry segment (top-level classification)
    Seg,
    /// Domain group
    Grp,
    /// Category
    Cat,
    /// Sub-category
    Sub,
    /// Capability level
    Lvl,
    /// Country
    Cty,
    /// Organization type
    Org,
}

impl RecordPrefix {
    /// Get the string representation of the prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordPrefix::Seg => "SEG",
            RecordPrefix::Grp => "GRP",
            RecordPrefix::Cat => "CAT",
            RecordPrefix::Sub => "SUB",
            RecordPrefix::Lvl => "LVL",
            RecordPrefix::Cty => "CTY",
            RecordPrefix::Org => "ORG",
        }
    }

    /// Get all valid prefixes
    pub fn all() -> &'static [RecordPrefix] {
        &[
            RecordPrefix::Seg,
            RecordPrefix::Grp,
            RecordPrefix::Cat,
            RecordPrefix::Sub,
            RecordPrefix::Lvl,
            RecordPrefix::Cty,
            RecordPrefix::Org,
        ]
    }
}

impl fmt::Display for RecordPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SEG" => Ok(RecordPrefix::Seg),
            "GRP" => Ok(RecordPrefix::Grp),
            "CAT" => Ok(RecordPrefix::Cat),
            "SUB" => Ok(RecordPrefix::Sub),
            "LVL" => Ok(RecordPrefix::Lvl),
            "CTY" => Ok(RecordPrefix::Cty),
            "ORG" => Ok(RecordPrefix::Org),
            _ => Err(IdParseError::InvalidPrefix(s.to_string())),
        }
    }
}

/// A unique record identifier combining a type prefix and ULID
///
/// Serialized as its string form ("GRP-01HQ..."), so persisted documents
/// carry opaque string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId {
    prefix: RecordPrefix,
    ulid: Ulid,
}

impl RecordId {
    /// Create a new RecordId with the given prefix
    pub fn new(prefix: RecordPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    /// Get the record prefix
    pub fn prefix(&self) -> RecordPrefix {
        self.prefix
    }

    /// Parse a RecordId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for RecordId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let prefix = prefix_str.parse()?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { prefix, ulid })
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing record IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid record prefix: '{0}' (valid: SEG, GRP, CAT, SUB, LVL, CTY, ORG)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in record ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_generation() {
        let id = RecordId::new(RecordPrefix::Grp);
        assert!(id.to_string().starts_with("GRP-"));
        assert_eq!(id.to_string().len(), 30); // GRP- (4) + ULID (26) = 30
    }

    #[test]
    fn test_record_id_parsing() {
        let original = RecordId::new(RecordPrefix::Seg);
        let id_str = original.to_string();
        let parsed = RecordId::parse(&id_str).unwrap();
        assert_eq!(parsed.prefix(), RecordPrefix::Seg);
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_record_id_invalid_prefix() {
        let err = RecordId::parse("XXX-01HQ3K4N5M6P7R8S9T0UVWXY").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_record_id_missing_delimiter() {
        let err = RecordId::parse("GRP01HQ3K4N5M6P7R8S9T0UVWXY").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_record_id_invalid_ulid() {
        let err = RecordId::parse("GRP-notaulid").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidUlid(_, _)));
    }

    #[test]
    fn test_all_prefixes_parse() {
        for prefix in RecordPrefix::all() {
            let id = RecordId::new(*prefix);
            let parsed = RecordId::parse(&id.to_string()).unwrap();
            assert_eq!(parsed.prefix(), *prefix);
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let id = RecordId::new(RecordPrefix::Cat);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
