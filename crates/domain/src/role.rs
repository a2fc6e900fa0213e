use std::fmt::{Display, Formatter};
use std::str::FromStr;

use ipa_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Identifier of the reserved administrator role.
pub const RESERVED_ADMIN_ROLE_ID: &str = "admin";

/// Stable role identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleId(String);

impl RoleId {
    /// Creates a validated role identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::for_field("role id", value)?.into()))
    }

    /// Derives the identifier for a role name.
    ///
    /// The name is trimmed, lowercased and every whitespace run becomes a
    /// single `_`, so `"Corp FA"` maps to `corp_fa`.
    pub fn from_name(name: &str) -> AppResult<Self> {
        let slug = name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("_");

        Self::new(slug)
    }

    /// Returns the identifier of the reserved administrator role.
    #[must_use]
    pub fn admin() -> Self {
        Self(RESERVED_ADMIN_ROLE_ID.to_owned())
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether this is the reserved administrator role.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.as_str() == RESERVED_ADMIN_ROLE_ID
    }
}

impl TryFrom<String> for RoleId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleId> for String {
    fn from(value: RoleId) -> Self {
        value.0
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Presentation colour attached to a role card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    /// Red.
    Red,
    /// Blue.
    Blue,
    /// Purple.
    Purple,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Indigo.
    Indigo,
    /// Pink.
    Pink,
    /// Teal.
    Teal,
    /// Orange.
    Orange,
    /// Cyan.
    Cyan,
    /// Neutral colour used when none was picked.
    #[default]
    Gray,
}

impl ColorTag {
    /// Returns a stable storage value for this colour.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Indigo => "indigo",
            Self::Pink => "pink",
            Self::Teal => "teal",
            Self::Orange => "orange",
            Self::Cyan => "cyan",
            Self::Gray => "gray",
        }
    }

    /// Returns the colours offered when creating a role.
    #[must_use]
    pub fn palette() -> &'static [Self] {
        const PALETTE: &[ColorTag] = &[
            ColorTag::Red,
            ColorTag::Blue,
            ColorTag::Purple,
            ColorTag::Green,
            ColorTag::Yellow,
            ColorTag::Indigo,
            ColorTag::Pink,
            ColorTag::Teal,
            ColorTag::Orange,
            ColorTag::Cyan,
        ];

        PALETTE
    }
}

impl FromStr for ColorTag {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            "purple" => Ok(Self::Purple),
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "indigo" => Ok(Self::Indigo),
            "pink" => Ok(Self::Pink),
            "teal" => Ok(Self::Teal),
            "orange" => Ok(Self::Orange),
            "cyan" => Ok(Self::Cyan),
            "gray" => Ok(Self::Gray),
            _ => Err(AppError::Validation(format!(
                "unknown color tag '{value}'"
            ))),
        }
    }
}

/// Named permission group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    id: RoleId,
    name: NonEmptyString,
    display_name: NonEmptyString,
    color: ColorTag,
}

impl RoleDefinition {
    /// Creates a validated role whose identifier is derived from its name.
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        color: ColorTag,
    ) -> AppResult<Self> {
        let name = NonEmptyString::for_field("role name", name)?;
        let display_name = NonEmptyString::for_field("role display name", display_name)?;

        Ok(Self {
            id: RoleId::from_name(name.as_str())?,
            name,
            display_name,
            color,
        })
    }

    /// Returns the stable role identifier.
    #[must_use]
    pub fn id(&self) -> &RoleId {
        &self.id
    }

    /// Returns the unique role name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the role display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the presentation colour.
    #[must_use]
    pub fn color(&self) -> ColorTag {
        self.color
    }

    /// Returns whether `name` equals this role's name ignoring case.
    #[must_use]
    pub fn name_collides_with(&self, name: &str) -> bool {
        self.name.as_str().trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Returns a copy with new presentation attributes; identity is unchanged.
    pub fn with_presentation(
        &self,
        display_name: impl Into<String>,
        color: ColorTag,
    ) -> AppResult<Self> {
        Ok(Self {
            id: self.id.clone(),
            name: self.name.clone(),
            display_name: NonEmptyString::for_field("role display name", display_name)?,
            color,
        })
    }
}
