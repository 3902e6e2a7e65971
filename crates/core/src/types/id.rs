//! Newtype ID for type-safe catalog references.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when a string is not a valid [`FoodId`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid food id: {0}")]
pub struct ParseFoodIdError(String);

/// Unique identifier of a catalog food item.
///
/// Assigned by the store at creation time and immutable afterwards. The
/// identifier is opaque to callers; the UUID representation is an
/// implementation detail of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(Uuid);

impl FoodId {
    /// Generate a fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a `FoodId` from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFoodIdError`] if the input is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, ParseFoodIdError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ParseFoodIdError(s.to_owned()))
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FoodId {
    type Err = ParseFoodIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Uuid> for FoodId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<FoodId> for Uuid {
    fn from(id: FoodId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_string_form() {
        let id = FoodId::generate();
        let parsed = FoodId::parse(&id.to_string()).expect("own string form must parse");
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_garbage() {
        assert!(FoodId::parse("not-a-uuid").is_err());
        assert!(FoodId::parse("").is_err());
    }

    #[test]
    fn serializes_transparently() {
        let id = FoodId::generate();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{id}\""));
    }
}
