//! Identifier types used throughout lib.reviews.
//!
//! Record identifiers are random UUIDs (v4). Revision identifiers use UUID v7
//! so that a record's revisions sort in creation order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $generator:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new, globally unique identifier.
            #[must_use]
            pub fn new() -> Self {
                Self($generator())
            }

            /// Creates an identifier from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }

            /// Parses an identifier from a string.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id!(
    /// Identifier of a review subject ("thing").
    ThingId,
    Uuid::new_v4
);

define_id!(
    /// Identifier of a review.
    ReviewId,
    Uuid::new_v4
);

define_id!(
    /// Identifier of a registered user.
    UserId,
    Uuid::new_v4
);

define_id!(
    /// Identifier of one revision of a record.
    /// Time-ordered, so later revisions compare greater.
    RevisionId,
    Uuid::now_v7
);
