//! Assignable people with flexible parsing.
//!
//! This module provides the [`Person`] type which supports two formats:
//!
//! - Short format: `"Persona1"` string, using the default avatar
//! - Full format: `{ "name": "...", "avatar": "..." }` object
//!
//! # Examples
//!
//! ```
//! use corkboard_config::Person;
//!
//! let person: Person = serde_json::from_str(r#""Persona1""#).unwrap();
//! assert_eq!(person.name(), "Persona1");
//! assert!(person.avatar().is_none());
//!
//! let person: Person = serde_json::from_str(r#"{"name": "Persona2", "avatar": "●"}"#).unwrap();
//! assert_eq!(person.avatar(), Some("●"));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// Badge shown for assignees that are not configured or have no avatar.
pub const DEFAULT_AVATAR: &str = "○";

/// A person tasks can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: String,
    avatar: Option<String>,
}

impl Person {
    /// Creates a person without a dedicated avatar.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }

    /// Creates a person with an avatar badge.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_config::Person;
    ///
    /// let person = Person::with_avatar("Persona1", "◆");
    /// assert_eq!(person.badge(), "◆");
    /// ```
    #[must_use]
    pub fn with_avatar(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: Some(avatar.into()),
        }
    }

    /// Parses a person from the short (name only) format.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank.
    pub fn parse_short(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(ConfigError::InvalidPerson(
                "name cannot be empty".to_string(),
            ));
        }
        Ok(Self::new(name))
    }

    /// Returns the name stored in a task's `assignedTo` field.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configured avatar, if any.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Returns the avatar, or [`DEFAULT_AVATAR`] when none is configured.
    #[must_use]
    pub fn badge(&self) -> &str {
        self.avatar().unwrap_or(DEFAULT_AVATAR)
    }

    /// The three people every fresh configuration starts with.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::with_avatar("Persona1", "◆"),
            Self::with_avatar("Persona2", "▲"),
            Self::with_avatar("Persona3", "●"),
        ]
    }
}

impl Serialize for Person {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.avatar {
            None => serializer.serialize_str(&self.name),
            Some(avatar) => {
                use serde::ser::SerializeStruct;
                let mut state = serializer.serialize_struct("Person", 2)?;
                state.serialize_field("name", &self.name)?;
                state.serialize_field("avatar", avatar)?;
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Person {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};

        struct PersonVisitor;

        impl<'de> Visitor<'de> for PersonVisitor {
            type Value = Person;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a name or an object with name and optional avatar fields")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Person::parse_short(v).map_err(de::Error::custom)
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut avatar: Option<String> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => {
                            if name.is_some() {
                                return Err(de::Error::duplicate_field("name"));
                            }
                            name = Some(map.next_value()?);
                        }
                        "avatar" => {
                            if avatar.is_some() {
                                return Err(de::Error::duplicate_field("avatar"));
                            }
                            avatar = map.next_value()?;
                        }
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                let name = name.ok_or_else(|| de::Error::missing_field("name"))?;
                let mut person = Person::parse_short(&name).map_err(de::Error::custom)?;
                person.avatar = avatar.filter(|a| !a.trim().is_empty());
                Ok(person)
            }
        }

        deserializer.deserialize_any(PersonVisitor)
    }
}
