//! Identity role as reported by the external identity provider.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Role attached to an authenticated identity's profile.
///
/// The provider stores roles as free-form strings; the known values are
/// `user`, `admin` and the legacy `delivery`. Anything else is preserved in
/// [`Role::Other`] so profiles round-trip unchanged. Only [`Role::Admin`]
/// grants catalog-mutating privilege.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Admin,
    Delivery,
    Other(String),
}

impl Role {
    /// Whether this role grants privileged (catalog-mutating) access.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// The provider-facing string form of this role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Delivery => "delivery",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "user" => Self::User,
            "admin" => Self::Admin,
            "delivery" => Self::Delivery,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

impl std::str::FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
