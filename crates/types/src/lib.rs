/// Errors that can occur when validating identifier tokens.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// The input was empty or contained only whitespace
    #[error("identifier cannot be empty")]
    Empty,
    /// The input exceeded the maximum identifier length
    #[error("identifier exceeds 64 characters")]
    TooLong,
    /// The input contained a character outside the permitted set
    #[error("identifier contains characters outside [0-9A-Za-z._-]")]
    InvalidCharacter,
}

/// An opaque, validated patient reference.
///
/// Patient identifiers are minted by the hospital platform, not by this module; the dashboard
/// only ever passes them back to the platform's services and echoes them into URLs. Validation
/// therefore restricts the token to a conservative URL-safe shape rather than imposing any
/// particular numbering scheme:
///
/// - trimmed of leading and trailing whitespace
/// - non-empty, at most 64 characters
/// - characters limited to `0-9`, `A-Z`, `a-z`, `.`, `-` and `_`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatientId(String);

impl PatientId {
    /// Maximum accepted identifier length.
    pub const MAX_LEN: usize = 64;

    /// Parses and validates a patient identifier.
    ///
    /// The input is trimmed of leading and trailing whitespace before validation.
    ///
    /// # Errors
    ///
    /// Returns [`IdError`] if the trimmed input is empty, too long, or contains a character
    /// outside the permitted set.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, IdError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(IdError::TooLong);
        }

        let ok = trimmed
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));
        if !ok {
            return Err(IdError::InvalidCharacter);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for PatientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PatientId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PatientId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_and_trims_plain_tokens() {
        let id = PatientId::parse("  1042 ").expect("valid identifier");
        assert_eq!(id.as_str(), "1042");
        assert_eq!(id.to_string(), "1042");
    }

    #[test]
    fn parse_accepts_the_full_permitted_character_set() {
        let id = PatientId::parse("MRN-00042.v2_a").expect("valid identifier");
        assert_eq!(id.as_str(), "MRN-00042.v2_a");
    }

    #[test]
    fn parse_rejects_empty_and_whitespace_input() {
        assert!(matches!(PatientId::parse(""), Err(IdError::Empty)));
        assert!(matches!(PatientId::parse("   "), Err(IdError::Empty)));
    }

    #[test]
    fn parse_rejects_overlong_input() {
        let long = "x".repeat(PatientId::MAX_LEN + 1);
        assert!(matches!(PatientId::parse(long), Err(IdError::TooLong)));
    }

    #[test]
    fn parse_rejects_unsafe_characters() {
        for input in ["10 42", "10/42", "10?42", "id=42", "naïve"] {
            assert!(
                matches!(PatientId::parse(input), Err(IdError::InvalidCharacter)),
                "expected rejection for {input:?}"
            );
        }
    }

    #[test]
    fn serde_round_trips_and_validates_on_the_way_in() {
        let id = PatientId::parse("1042").expect("valid identifier");
        let json = serde_json::to_string(&id).expect("serialise");
        assert_eq!(json, "\"1042\"");

        let back: PatientId = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, id);

        let err = serde_json::from_str::<PatientId>("\"10 42\"");
        assert!(err.is_err(), "embedded space must be rejected");
    }
}
