//! Provider model identifiers.

use atmo_common::{AtmoError, AtmoResult};

/// The provider's spelling of the Icon Europe model.
pub const ICON_EU: &str = "iconEu";

/// A model identifier in the form the provider expects in its URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelName(String);

impl ModelName {
    /// Lower-case the caller's identifier, then apply the one provider quirk:
    /// a name ending in `u` (Icon Europe) gets its fifth character upper-cased,
    /// so `ICONEU` and `iconeu` both become `iconEu`.
    pub fn normalize(raw: &str) -> AtmoResult<Self> {
        let lower = raw.to_lowercase();
        if lower.is_empty() {
            return Err(AtmoError::invalid_input("model name is empty"));
        }

        if lower.ends_with('u') && lower.chars().count() > 4 {
            let rewritten: String = lower
                .chars()
                .enumerate()
                .map(|(i, c)| if i == 4 { c.to_ascii_uppercase() } else { c })
                .collect();
            return Ok(Self(rewritten));
        }

        Ok(Self(lower))
    }

    /// Coordinates outside Europe make this model fail at the provider.
    pub fn is_icon_eu(&self) -> bool {
        self.0 == ICON_EU
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModelName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_eu_rewrite() {
        assert_eq!(ModelName::normalize("iconeu").unwrap().as_str(), "iconEu");
        assert_eq!(ModelName::normalize("ICONEU").unwrap().as_str(), "iconEu");
        assert!(ModelName::normalize("IconEu").unwrap().is_icon_eu());
    }

    #[test]
    fn test_plain_models_lowercased() {
        assert_eq!(ModelName::normalize("ECMWF").unwrap().as_str(), "ecmwf");
        assert_eq!(ModelName::normalize("gfs").unwrap().as_str(), "gfs");
        assert_eq!(ModelName::normalize("Icon").unwrap().as_str(), "icon");
        assert!(!ModelName::normalize("gfs").unwrap().is_icon_eu());
    }

    #[test]
    fn test_short_name_ending_in_u_unchanged() {
        assert_eq!(ModelName::normalize("nau").unwrap().as_str(), "nau");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            ModelName::normalize(""),
            Err(AtmoError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_whitespace_not_trimmed() {
        assert_eq!(ModelName::normalize(" GFS").unwrap().as_str(), " gfs");
    }
}
