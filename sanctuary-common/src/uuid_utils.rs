//! UUID utilities

use uuid::Uuid;

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse UUID from string
///
/// Surrounding whitespace is ignored; any of the textual forms accepted by
/// [`Uuid::parse_str`] (hyphenated, simple, braced, urn) are allowed.
pub fn parse(s: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(s.trim())
}

/// Canonical storage form: lowercase hyphenated, always 36 characters
pub fn to_db_string(id: &Uuid) -> String {
    id.as_hyphenated().to_string()
}

/// Parse a stored key
///
/// Only the exact form written by [`to_db_string`] is accepted, so a loaded
/// record always saves back under the same key.
pub fn parse_db_string(s: &str) -> Option<Uuid> {
    Uuid::parse_str(s).ok().filter(|id| to_db_string(id) == s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique_v4() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
        assert_eq!(a.get_version_num(), 4);
    }

    #[test]
    fn test_db_string_round_trip() {
        let id = generate();
        let s = to_db_string(&id);
        assert_eq!(s.len(), 36);
        assert_eq!(parse(&s).unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("not-a-uuid").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_parse_accepts_padded_and_simple_forms() {
        let id = parse("a1b2c3d4-e5f6-7890-1234-567890abcdef").unwrap();
        assert_eq!(parse("  a1b2c3d4-e5f6-7890-1234-567890abcdef ").unwrap(), id);
        assert_eq!(parse("a1b2c3d4e5f678901234567890abcdef").unwrap(), id);
    }

    #[test]
    fn test_db_string_parse_is_strict() {
        let canonical = "a1b2c3d4-e5f6-7890-1234-567890abcdef";
        let id = parse_db_string(canonical).unwrap();
        assert_eq!(to_db_string(&id), canonical);

        for other in [
            "A1B2C3D4-E5F6-7890-1234-567890ABCDEF",
            "a1b2c3d4e5f678901234567890abcdef",
            "{a1b2c3d4-e5f6-7890-1234-567890abcdef}",
            "urn:uuid:a1b2c3d4-e5f6-7890-1234-567890abcdef",
            " a1b2c3d4-e5f6-7890-1234-567890abcdef",
            "not-a-uuid",
        ] {
            assert_eq!(parse_db_string(other), None, "{} should be rejected", other);
        }
    }
}
