//! Identifier rules and short id derivation.

use crate::error::{CfStructError, Result};

/// Whether `s` is a valid identifier: a letter or `_` followed by letters,
/// digits or `_`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Return `s` unchanged if it is a valid identifier.
pub fn check_identifier(s: &str) -> Result<&str> {
    if s.is_empty() {
        return Err(CfStructError::invalid_identifier(s, "empty"));
    }
    if s.starts_with(|c: char| c.is_numeric()) {
        return Err(CfStructError::invalid_identifier(s, "starts with a digit"));
    }
    if !is_identifier(s) {
        return Err(CfStructError::invalid_identifier(
            s,
            "only letters, digits and `_` are allowed",
        ));
    }
    Ok(s)
}

/// Derive a short lowercase id from a variable name.
///
/// A single word is kept whole. With several words each contributes its
/// first letter, except words starting with a digit which are kept whole:
/// `sea_ice_concentration` gives `sic`, `wind_speed_10m` gives `ws10m`.
pub fn abbreviate(name: &str) -> Result<String> {
    let lower = name.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let id = match words.as_slice() {
        [] => String::new(),
        [single] => single.to_string(),
        several => several
            .iter()
            .map(|w| {
                if w.starts_with(|c: char| c.is_numeric()) {
                    w.to_string()
                } else {
                    w.chars().take(1).collect()
                }
            })
            .collect(),
    };

    check_identifier(&id).map_err(|_| {
        CfStructError::invalid_identifier(
            id.clone(),
            format!("cannot derive an id from variable name {:?}", name),
        )
    })?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_identifier("time"));
        assert!(is_identifier("_FillValue"));
        assert!(is_identifier("sic_2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("10"));
        assert!(!is_identifier("some-var_id"));
        assert!(!is_identifier("a b"));
    }

    #[test]
    fn abbreviations() {
        assert_eq!(abbreviate("sea_ice_concentration").unwrap(), "sic");
        assert_eq!(abbreviate("Sea Ice Concentration").unwrap(), "sic");
        assert_eq!(abbreviate("time").unwrap(), "time");
        assert_eq!(abbreviate("Time").unwrap(), "time");
        assert_eq!(abbreviate("wind_speed_10m").unwrap(), "ws10m");
        assert_eq!(abbreviate("some_name").unwrap(), "sn");
        assert_eq!(abbreviate("_private_").unwrap(), "private");
    }

    #[test]
    fn names_without_a_usable_id_are_rejected() {
        assert!(abbreviate("10m_wind").is_err());
        assert!(abbreviate("---").is_err());
        assert!(abbreviate("").is_err());
    }
}
