//! Board appearance settings: palette theme and backdrop.
//!
//! Both settings only change colors; they never affect board contents. Neither
//! is persisted by the running application: toggling them in the UI lasts for
//! the session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Light or dark palette.
///
/// # Examples
///
/// ```
/// use corkboard_config::Theme;
///
/// assert_eq!(Theme::default(), Theme::Light);
/// assert_eq!(Theme::Light.toggled(), Theme::Dark);
/// assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark text on a light background.
    #[default]
    Light,
    /// Light text on a dark background.
    Dark,
}

impl Theme {
    /// Returns the other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns the lowercase name used in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ConfigError::InvalidTheme(s.to_string())),
        }
    }
}

/// Background behind the board columns.
///
/// `Default` uses the theme's plain background; `Cork` swaps in a warm
/// pin-board tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    /// Theme background.
    #[default]
    Default,
    /// Cork-colored background.
    Cork,
}

impl Backdrop {
    /// Returns the next backdrop in the selector.
    #[must_use]
    pub const fn cycled(self) -> Self {
        match self {
            Self::Default => Self::Cork,
            Self::Cork => Self::Default,
        }
    }

    /// Returns the label shown in the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Cork => "Cork",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggle_is_an_involution() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.toggled().toggled(), theme);
            assert_ne!(theme.toggled(), theme);
        }
    }

    #[test]
    fn theme_parse_rejects_unknown() {
        assert_eq!(" light ".parse::<Theme>().unwrap(), Theme::Light);
        let err = "solarized".parse::<Theme>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTheme(ref s) if s == "solarized"));
    }

    #[test]
    fn theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), r#""dark""#);
        assert_eq!(Theme::Dark.to_string(), "dark");
    }

    #[test]
    fn backdrop_cycles_between_two_values() {
        assert_eq!(Backdrop::Default.cycled(), Backdrop::Cork);
        assert_eq!(Backdrop::Cork.cycled(), Backdrop::Default);
        assert_eq!(Backdrop::Cork.label(), "Cork");
    }

    #[test]
    fn backdrop_deserializes_lowercase() {
        let backdrop: Backdrop = serde_json::from_str(r#""cork""#).unwrap();
        assert_eq!(backdrop, Backdrop::Cork);
    }
}
