//! Contribution role vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Closed set of roles a person can hold on a book.
///
/// Stored in the database as the upper-case variant name ("AUTHOR").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Author,
    Editor,
    Translator,
    Contributor,
    Illustrator,
    Other,
}

impl Role {
    /// Storage code for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Author => "AUTHOR",
            Role::Editor => "EDITOR",
            Role::Translator => "TRANSLATOR",
            Role::Contributor => "CONTRIBUTOR",
            Role::Illustrator => "ILLUSTRATOR",
            Role::Other => "OTHER",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Author => "Author",
            Role::Editor => "Editor",
            Role::Translator => "Translator",
            Role::Contributor => "Contributor",
            Role::Illustrator => "Illustrator",
            Role::Other => "Other",
        }
    }

    /// Lenient parse for free-form contributor input: anything that is
    /// not a known role collapses to [`Role::Other`].
    pub fn parse_or_other(s: &str) -> Role {
        s.parse().unwrap_or(Role::Other)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AUTHOR" => Ok(Role::Author),
            "EDITOR" => Ok(Role::Editor),
            "TRANSLATOR" => Ok(Role::Translator),
            "CONTRIBUTOR" => Ok(Role::Contributor),
            "ILLUSTRATOR" => Ok(Role::Illustrator),
            "OTHER" => Ok(Role::Other),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("author".parse::<Role>(), Ok(Role::Author));
        assert_eq!("Editor".parse::<Role>(), Ok(Role::Editor));
        assert_eq!("TRANSLATOR".parse::<Role>(), Ok(Role::Translator));
        assert!(" illustrator ".parse::<Role>().is_ok());
        assert!("narrator".parse::<Role>().is_err());
    }

    #[test]
    fn test_parse_or_other_fallback() {
        assert_eq!(Role::parse_or_other("contributor"), Role::Contributor);
        assert_eq!(Role::parse_or_other("narrator"), Role::Other);
        assert_eq!(Role::parse_or_other(""), Role::Other);
    }

    #[test]
    fn test_storage_roundtrip() {
        for role in [
            Role::Author,
            Role::Editor,
            Role::Translator,
            Role::Contributor,
            Role::Illustrator,
            Role::Other,
        ] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }
}
