use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Serialize, Serializer};

/// How a wallpaper image is laid out on the screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Style {
    /// Leave the configured layout untouched.
    #[default]
    Current,
    /// Scale to cover the screen, keeping aspect ratio and cropping the overflow.
    Fill,
    /// Scale to fit inside the screen, keeping aspect ratio.
    Fit,
    /// Deform the image to cover the screen exactly.
    Stretch,
    /// Center the image without resizing it.
    Center,
    /// Repeat the image horizontally and vertically.
    Tile,
    /// Lower-cased token that matched no known layout. Rejected by [`Style::is_valid`].
    Unknown(String),
}

impl Style {
    /// Every canonical variant, `Current` included.
    pub const ALL: [Style; 6] = [
        Style::Current,
        Style::Fill,
        Style::Fit,
        Style::Stretch,
        Style::Center,
        Style::Tile,
    ];

    /// Interprets a user supplied token. Never fails: unrecognized input is kept
    /// (lower-cased) and rejected later, where a native encoding is needed.
    pub fn parse(s: &str) -> Self {
        let lowered = s.to_lowercase();
        match lowered.as_str() {
            "" | "current" => Self::Current,
            "fill" => Self::Fill,
            "fit" => Self::Fit,
            "stretch" => Self::Stretch,
            "center" => Self::Center,
            "tile" => Self::Tile,
            _ => Self::Unknown(lowered),
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    pub fn is_current(&self) -> bool {
        matches!(self, Self::Current)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Current => "current",
            Self::Fill => "fill",
            Self::Fit => "fit",
            Self::Stretch => "stretch",
            Self::Center => "center",
            Self::Tile => "tile",
            Self::Unknown(raw) => raw,
        }
    }
}

impl FromStr for Style {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Style {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKENS: [&str; 7] = ["fill", "fit", "stretch", "center", "tile", "current", ""];

    #[test]
    fn parse_ignores_case() {
        for token in TOKENS {
            assert_eq!(Style::parse(&token.to_uppercase()), Style::parse(token));
        }
        assert_eq!(Style::parse("TiLe"), Style::Tile);
        assert_eq!(Style::parse("CURRENT"), Style::Current);
    }

    #[test]
    fn parse_is_idempotent_through_canonical_token() {
        for token in TOKENS {
            let parsed = Style::parse(token);
            assert_eq!(Style::parse(parsed.as_str()), parsed, "token {token:?}");
        }
    }

    #[test]
    fn empty_and_current_both_mean_current() {
        assert_eq!(Style::parse(""), Style::Current);
        assert_eq!(Style::parse("current"), Style::Current);
        assert_eq!(Style::Current.to_string(), "current");
    }

    #[test]
    fn unknown_tokens_pass_through_lower_cased() {
        let style = Style::parse("Span");
        assert_eq!(style, Style::Unknown("span".to_string()));
        assert_eq!(style.as_str(), "span");
        assert!(!style.is_valid());
    }

    #[test]
    fn only_canonical_variants_are_valid() {
        for style in Style::ALL {
            assert!(style.is_valid(), "{style} should be valid");
        }
        for raw in ["zoom", "fill ", "centre", "10"] {
            assert!(!Style::parse(raw).is_valid(), "{raw:?} should be invalid");
        }
    }

    #[test]
    fn serializes_as_canonical_token() {
        let json = serde_json::to_string(&Style::Stretch).unwrap();
        assert_eq!(json, "\"stretch\"");
    }
}
