//! Numeric ids embedded in cross-reference locators such as
//! `https://pokeapi.co/api/v2/ability/65/`.

use crate::error::{Error, Result};

/// Extract the trailing numeric segment of a locator. Trailing `/` are tolerated.
pub fn id_from_locator(locator: &str) -> Result<u16> {
    let trimmed = locator.trim_end_matches('/');
    let segment = match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => return Err(Error::MalformedLocator(locator.to_string())),
    };
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedLocator(locator.to_string()));
    }
    segment
        .parse::<u16>()
        .map_err(|_| Error::MalformedLocator(locator.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trailing_segment_with_and_without_slash() {
        assert_eq!(
            id_from_locator("https://pokeapi.co/api/v2/ability/65/").unwrap(),
            65
        );
        assert_eq!(id_from_locator("/api/v2/move/33").unwrap(), 33);
        assert_eq!(id_from_locator("/api/v2/move/33///").unwrap(), 33);
    }

    #[test]
    fn rejects_non_numeric_or_missing_segment() {
        for bad in ["", "65", "/api/v2/move/", "/api/v2/move/tackle/", "/api/v2/move/-3/"] {
            assert!(
                matches!(id_from_locator(bad), Err(Error::MalformedLocator(_))),
                "expected MalformedLocator for {bad:?}"
            );
        }
    }

    #[test]
    fn rejects_ids_wider_than_identifier() {
        assert!(id_from_locator("/api/v2/move/70000/").is_err());
    }
}
